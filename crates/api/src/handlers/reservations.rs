// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation handlers.
//!
//! These translate DTOs into lifecycle requests; every rule about who may
//! do what to a reservation is enforced by the lifecycle manager.

use reserva::{
    CreateReservation, Principal, ReservationFilter, UpdateReservation, approve_reservation,
    create_reservation, delete_reservation, get_reservation, list_reservations,
    reject_reservation, update_reservation,
};
use reserva_domain::{ReservationState, ReservationView, parse_date};
use reserva_persistence::Persistence;
use time::Date;

use super::{parse_enum, parse_optional_date, reservation_info};
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::request_response::{
    CreateReservationRequest, ListReservationsQuery, ListReservationsResponse, MessageResponse,
    ReservationInfo, UpdateReservationRequest,
};

/// Creates a pending reservation.
///
/// The owner defaults to the caller.
///
/// # Errors
///
/// Returns an error if the request is malformed or the lifecycle manager
/// refuses it.
pub fn create(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &CreateReservationRequest,
    today: Date,
) -> Result<ReservationInfo, ApiError> {
    let principal: Principal = actor.principal();
    let date: Date = parse_date(&request.date)?;

    let view: ReservationView = create_reservation(
        persistence,
        &principal,
        &CreateReservation {
            user_id: request.user_id.unwrap_or(actor.id),
            space_id: request.space_id,
            date,
            time_range: request.time_range.clone(),
            description: request.description.clone(),
        },
        today,
    )?;

    Ok(reservation_info(view, &principal, today))
}

/// Fetches one reservation.
///
/// # Errors
///
/// Returns an error if the reservation does not exist or is not visible to
/// the caller.
pub fn get(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    reservation_id: i64,
    today: Date,
) -> Result<ReservationInfo, ApiError> {
    let principal: Principal = actor.principal();
    let view: ReservationView = get_reservation(persistence, &principal, reservation_id)?;
    Ok(reservation_info(view, &principal, today))
}

/// Lists reservations visible to the caller.
///
/// # Errors
///
/// Returns an error if a filter value is malformed.
pub fn list(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    query: &ListReservationsQuery,
    today: Date,
) -> Result<ListReservationsResponse, ApiError> {
    let principal: Principal = actor.principal();
    let filter: ReservationFilter = ReservationFilter {
        user_id: query.user_id,
        space_id: query.space_id,
        state: query
            .state
            .as_deref()
            .map(parse_enum::<ReservationState>)
            .transpose()?,
        from: parse_optional_date(query.from.as_deref())?,
        to: parse_optional_date(query.to.as_deref())?,
    };

    let views: Vec<ReservationView> = list_reservations(persistence, &principal, &filter)?;
    Ok(ListReservationsResponse {
        reservations: views
            .into_iter()
            .map(|view| reservation_info(view, &principal, today))
            .collect(),
    })
}

/// Edits a reservation.
///
/// # Errors
///
/// Returns an error if the request is malformed or the lifecycle manager
/// refuses it.
pub fn update(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    reservation_id: i64,
    request: &UpdateReservationRequest,
    today: Date,
) -> Result<ReservationInfo, ApiError> {
    let principal: Principal = actor.principal();

    let changes: UpdateReservation = UpdateReservation {
        reservation_id: request.reservation_id,
        user_id: request.user_id,
        space_id: request.space_id,
        date: parse_optional_date(request.date.as_deref())?,
        time_range: request.time_range.clone(),
        state: request
            .state
            .as_deref()
            .map(parse_enum::<ReservationState>)
            .transpose()?,
        description: request.description.clone(),
    };

    let view: ReservationView =
        update_reservation(persistence, &principal, reservation_id, &changes, today)?;
    Ok(reservation_info(view, &principal, today))
}

/// Approves a pending reservation.
///
/// # Errors
///
/// Returns an error unless the caller is an Administrator and the
/// reservation is pending.
pub fn approve(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    reservation_id: i64,
    today: Date,
) -> Result<ReservationInfo, ApiError> {
    let principal: Principal = actor.principal();
    let view: ReservationView = approve_reservation(persistence, &principal, reservation_id)?;
    Ok(reservation_info(view, &principal, today))
}

/// Rejects a pending reservation.
///
/// # Errors
///
/// Returns an error unless the caller is an Administrator and the
/// reservation is pending.
pub fn reject(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    reservation_id: i64,
    today: Date,
) -> Result<ReservationInfo, ApiError> {
    let principal: Principal = actor.principal();
    let view: ReservationView = reject_reservation(persistence, &principal, reservation_id)?;
    Ok(reservation_info(view, &principal, today))
}

/// Deletes a reservation.
///
/// # Errors
///
/// Returns an error if the reservation does not exist or the caller may
/// not delete it.
pub fn delete(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    reservation_id: i64,
    today: Date,
) -> Result<MessageResponse, ApiError> {
    delete_reservation(persistence, &actor.principal(), reservation_id, today)?;
    Ok(MessageResponse {
        message: format!("Reservation {reservation_id} deleted"),
    })
}
