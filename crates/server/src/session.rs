// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller authentication at the server boundary.
//!
//! This module provides the Axum extractor that turns an
//! `Authorization: Bearer <token>` header into an authenticated user.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use reserva_api::{ApiError, AuthenticatedUser, AuthenticationService};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for authenticated callers.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionUser(actor): SessionUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // actor: AuthenticatedUser
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Authentication Flow
///
/// 1. Extract the `Authorization` header
/// 2. Verify the bearer token's signature and expiry
/// 3. Reload the account so the stored role applies
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if the header is missing or unreadable,
/// the token does not verify, or the account has been deleted.
pub struct SessionUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header: &str = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                debug!("Missing Authorization header");
                SessionError::MissingAuthorizationHeader
            })?
            .to_str()
            .map_err(|_| {
                warn!("Invalid Authorization header encoding");
                SessionError::InvalidAuthorizationHeader
            })?;

        let mut persistence = state.persistence.lock().await;
        let user: AuthenticatedUser =
            AuthenticationService::resolve(&mut persistence, &state.tokens, Some(auth_header))
                .map_err(|e| {
                    debug!(error = %e, "Session rejected");
                    SessionError::Rejected(e)
                })?;
        drop(persistence);

        debug!(user_id = user.id, role = %user.role, "Session validated");

        Ok(Self(user))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header is not valid ASCII.
    InvalidAuthorizationHeader,
    /// The token or account did not check out.
    Rejected(ApiError),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let error: HttpError = match self {
            Self::MissingAuthorizationHeader => HttpError::new(
                StatusCode::UNAUTHORIZED,
                String::from("Missing Authorization header"),
            ),
            Self::InvalidAuthorizationHeader => HttpError::new(
                StatusCode::UNAUTHORIZED,
                String::from("Invalid Authorization header. Expected: 'Bearer <token>'"),
            ),
            Self::Rejected(err) => HttpError::from(err),
        };

        error.into_response()
    }
}
