// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers.
//!
//! Each handler resolves its inputs, locks the persistence layer for the
//! duration of the call, and delegates to the API layer.

use axum::{
    Json,
    extract::{Path, State as AxumState},
    http::StatusCode,
};
use reserva_api::handlers::{auth, departments, reservations, spaces, users};
use reserva_api::{
    AvailabilityQuery, AvailabilityResponse, BootstrapRequest, ChangePasswordRequest,
    CreateReservationRequest, CreateUserRequest, DepartmentInfo, DepartmentRequest,
    ListDepartmentsResponse, ListReservationsQuery, ListReservationsResponse, ListSpacesQuery,
    ListSpacesResponse, ListUsersQuery, ListUsersResponse, LoginRequest, LoginResponse,
    MeResponse, MessageResponse, ReservationInfo, SpaceInfo, SpaceRequest,
    UpdateReservationRequest, UpdateUserRequest, UserInfo,
};
use serde::Serialize;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::extract::{JsonBody, QueryParams};
use crate::session::SessionUser;
use crate::{AppState, HttpError};

/// The server's notion of today, in UTC.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// Handler for GET `/health` endpoint.
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// ============================================================================
// Authentication
// ============================================================================

/// Handler for POST `/auth/bootstrap` endpoint.
///
/// Creates the first administrator and logs them in. Closed once any
/// administrator exists.
pub async fn handle_bootstrap(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<BootstrapRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), HttpError> {
    info!(email = %req.email, "Handling bootstrap request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        auth::bootstrap(&mut persistence, &app_state.tokens, &req, OffsetDateTime::now_utc())?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for POST `/auth/login` endpoint.
pub async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let mut persistence = app_state.persistence.lock().await;
    let response: LoginResponse =
        auth::login(&mut persistence, &app_state.tokens, &req, OffsetDateTime::now_utc())?;

    Ok(Json(response))
}

/// Handler for GET `/auth/me` endpoint.
pub async fn handle_me(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
) -> Result<Json<MeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::me(&mut persistence, &actor)?))
}

/// Handler for PUT `/auth/password` endpoint.
pub async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    JsonBody(req): JsonBody<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(user_id = actor.id, "Handling change_password request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(auth::change_password(&mut persistence, &actor, &req)?))
}

// ============================================================================
// Users
// ============================================================================

/// Handler for GET `/users` endpoint.
pub async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    QueryParams(query): QueryParams<ListUsersQuery>,
) -> Result<Json<ListUsersResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::list_users(&mut persistence, &actor, &query)?))
}

/// Handler for POST `/users` endpoint.
pub async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserInfo>), HttpError> {
    info!(
        actor_id = actor.id,
        email = %req.email,
        role = %req.role,
        "Handling create_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let user: UserInfo = users::create_user(&mut persistence, &actor, &req)?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for GET `/users/{user_id}` endpoint.
pub async fn handle_get_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::get_user(&mut persistence, &actor, user_id)?))
}

/// Handler for PUT `/users/{user_id}` endpoint.
pub async fn handle_update_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(user_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    info!(actor_id = actor.id, user_id, "Handling update_user request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::update_user(
        &mut persistence,
        &actor,
        user_id,
        &req,
    )?))
}

/// Handler for DELETE `/users/{user_id}` endpoint.
pub async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(user_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(actor_id = actor.id, user_id, "Handling delete_user request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(users::delete_user(&mut persistence, &actor, user_id)?))
}

// ============================================================================
// Departments
// ============================================================================

/// Handler for GET `/departments` endpoint.
pub async fn handle_list_departments(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor): SessionUser,
) -> Result<Json<ListDepartmentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(departments::list_departments(&mut persistence)?))
}

/// Handler for POST `/departments` endpoint.
pub async fn handle_create_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    JsonBody(req): JsonBody<DepartmentRequest>,
) -> Result<(StatusCode, Json<DepartmentInfo>), HttpError> {
    info!(actor_id = actor.id, code = %req.code, "Handling create_department request");

    let mut persistence = app_state.persistence.lock().await;
    let department: DepartmentInfo =
        departments::create_department(&mut persistence, &actor, &req)?;

    Ok((StatusCode::CREATED, Json(department)))
}

/// Handler for GET `/departments/{department_id}` endpoint.
pub async fn handle_get_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor): SessionUser,
    Path(department_id): Path<i64>,
) -> Result<Json<DepartmentInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(departments::get_department(
        &mut persistence,
        department_id,
    )?))
}

/// Handler for PUT `/departments/{department_id}` endpoint.
pub async fn handle_update_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(department_id): Path<i64>,
    JsonBody(req): JsonBody<DepartmentRequest>,
) -> Result<Json<DepartmentInfo>, HttpError> {
    info!(
        actor_id = actor.id,
        department_id, "Handling update_department request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(departments::update_department(
        &mut persistence,
        &actor,
        department_id,
        &req,
    )?))
}

/// Handler for DELETE `/departments/{department_id}` endpoint.
pub async fn handle_delete_department(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(department_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(
        actor_id = actor.id,
        department_id, "Handling delete_department request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(departments::delete_department(
        &mut persistence,
        &actor,
        department_id,
    )?))
}

// ============================================================================
// Spaces
// ============================================================================

/// Handler for GET `/spaces` endpoint.
pub async fn handle_list_spaces(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor): SessionUser,
    QueryParams(query): QueryParams<ListSpacesQuery>,
) -> Result<Json<ListSpacesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(spaces::list_spaces(&mut persistence, &query)?))
}

/// Handler for POST `/spaces` endpoint.
pub async fn handle_create_space(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    JsonBody(req): JsonBody<SpaceRequest>,
) -> Result<(StatusCode, Json<SpaceInfo>), HttpError> {
    info!(actor_id = actor.id, name = %req.name, "Handling create_space request");

    let mut persistence = app_state.persistence.lock().await;
    let space: SpaceInfo = spaces::create_space(&mut persistence, &actor, &req)?;

    Ok((StatusCode::CREATED, Json(space)))
}

/// Handler for GET `/spaces/{space_id}` endpoint.
pub async fn handle_get_space(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor): SessionUser,
    Path(space_id): Path<i64>,
) -> Result<Json<SpaceInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(spaces::get_space(&mut persistence, space_id)?))
}

/// Handler for PUT `/spaces/{space_id}` endpoint.
pub async fn handle_update_space(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(space_id): Path<i64>,
    JsonBody(req): JsonBody<SpaceRequest>,
) -> Result<Json<SpaceInfo>, HttpError> {
    info!(actor_id = actor.id, space_id, "Handling update_space request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(spaces::update_space(
        &mut persistence,
        &actor,
        space_id,
        &req,
    )?))
}

/// Handler for DELETE `/spaces/{space_id}` endpoint.
pub async fn handle_delete_space(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(space_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(actor_id = actor.id, space_id, "Handling delete_space request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(spaces::delete_space(&mut persistence, &actor, space_id)?))
}

/// Handler for GET `/spaces/{space_id}/availability` endpoint.
///
/// Answers whether a slot could be booked right now. Nothing is reserved.
pub async fn handle_space_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(_actor): SessionUser,
    Path(space_id): Path<i64>,
    QueryParams(query): QueryParams<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(spaces::get_availability(
        &mut persistence,
        space_id,
        &query,
        today(),
    )?))
}

// ============================================================================
// Reservations
// ============================================================================

/// Handler for GET `/reservations` endpoint.
///
/// Teachers only ever see their own reservations.
pub async fn handle_list_reservations(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    QueryParams(query): QueryParams<ListReservationsQuery>,
) -> Result<Json<ListReservationsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reservations::list(
        &mut persistence,
        &actor,
        &query,
        today(),
    )?))
}

/// Handler for POST `/reservations` endpoint.
pub async fn handle_create_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    JsonBody(req): JsonBody<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationInfo>), HttpError> {
    info!(
        actor_id = actor.id,
        space_id = req.space_id,
        date = %req.date,
        time_range = %req.time_range,
        "Handling create_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let reservation: ReservationInfo =
        reservations::create(&mut persistence, &actor, &req, today())?;

    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Handler for GET `/reservations/{reservation_id}` endpoint.
pub async fn handle_get_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reservations::get(
        &mut persistence,
        &actor,
        reservation_id,
        today(),
    )?))
}

/// Handler for PUT `/reservations/{reservation_id}` endpoint.
pub async fn handle_update_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(reservation_id): Path<i64>,
    JsonBody(req): JsonBody<UpdateReservationRequest>,
) -> Result<Json<ReservationInfo>, HttpError> {
    info!(
        actor_id = actor.id,
        reservation_id, "Handling update_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reservations::update(
        &mut persistence,
        &actor,
        reservation_id,
        &req,
        today(),
    )?))
}

/// Handler for DELETE `/reservations/{reservation_id}` endpoint.
pub async fn handle_delete_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<MessageResponse>, HttpError> {
    info!(
        actor_id = actor.id,
        reservation_id, "Handling delete_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reservations::delete(
        &mut persistence,
        &actor,
        reservation_id,
        today(),
    )?))
}

/// Handler for POST `/reservations/{reservation_id}/approve` endpoint.
pub async fn handle_approve_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationInfo>, HttpError> {
    info!(
        actor_id = actor.id,
        reservation_id, "Handling approve_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reservations::approve(
        &mut persistence,
        &actor,
        reservation_id,
        today(),
    )?))
}

/// Handler for POST `/reservations/{reservation_id}/reject` endpoint.
pub async fn handle_reject_reservation(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(actor): SessionUser,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationInfo>, HttpError> {
    info!(
        actor_id = actor.id,
        reservation_id, "Handling reject_reservation request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(reservations::reject(
        &mut persistence,
        &actor,
        reservation_id,
        today(),
    )?))
}
