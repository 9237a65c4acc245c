// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Reserva system.
//!
//! This crate owns the request and response contract, token-based
//! authentication, password policy, and entity management. Reservation
//! rules are delegated to the `reserva` lifecycle manager; this layer only
//! parses input and translates errors.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
pub mod handlers;
mod password_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedUser, AuthenticationService, AuthorizationService, Claims, IssuedToken,
    TokenService,
};
pub use capabilities::compute_reservation_capabilities;
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AvailabilityQuery, AvailabilityResponse, BootstrapRequest, ChangePasswordRequest,
    ConflictInfo, CreateReservationRequest, CreateUserRequest, DepartmentInfo, DepartmentRequest,
    ListDepartmentsResponse, ListReservationsQuery, ListReservationsResponse, ListSpacesQuery,
    ListSpacesResponse, ListUsersQuery, ListUsersResponse, LoginRequest, LoginResponse,
    MeResponse, MessageResponse, ReservationCapabilities, ReservationInfo, SpaceInfo,
    SpaceRequest, UpdateReservationRequest, UpdateUserRequest, UserInfo,
};

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
