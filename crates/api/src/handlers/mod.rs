// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Handlers take the persistence layer, the authenticated caller and a
//! request DTO, and return a response DTO or an `ApiError`. Clock values
//! are passed in so date rules are deterministic.

pub mod auth;
pub mod departments;
pub mod reservations;
pub mod spaces;
pub mod users;

use std::str::FromStr;

use reserva::Principal;
use reserva_domain::{
    Department, DomainError, ReservationView, Space, User, format_date, parse_date,
};
use time::Date;

use crate::capabilities::compute_reservation_capabilities;
use crate::error::ApiError;
use crate::request_response::{DepartmentInfo, ReservationInfo, SpaceInfo, UserInfo};

pub(crate) fn user_info(user: User) -> UserInfo {
    UserInfo {
        user_id: user.user_id,
        name: user.name,
        email: user.email,
        role: user.role.as_str().to_string(),
        department_id: user.department_id,
    }
}

pub(crate) fn department_info(department: Department) -> DepartmentInfo {
    DepartmentInfo {
        department_id: department.department_id,
        name: department.name,
        code: department.code,
        department_type: department.department_type.as_str().to_string(),
        description: department.description,
        head_user_id: department.head_user_id,
    }
}

pub(crate) fn space_info(space: Space) -> SpaceInfo {
    SpaceInfo {
        space_id: space.space_id,
        name: space.name,
        space_type: space.space_type.as_str().to_string(),
        capacity: space.capacity,
        location: space.location,
        description: space.description,
        is_available: space.is_available,
    }
}

pub(crate) fn reservation_info(
    view: ReservationView,
    principal: &Principal,
    today: Date,
) -> ReservationInfo {
    let capabilities = compute_reservation_capabilities(principal, &view.reservation, today);
    let reservation = view.reservation;
    ReservationInfo {
        reservation_id: reservation.reservation_id,
        user_id: reservation.user_id,
        user_name: view.user_name,
        user_email: view.user_email,
        space_id: reservation.space_id,
        space_name: view.space_name,
        date: format_date(reservation.date),
        time_range: reservation.time_range,
        state: reservation.state.as_str().to_string(),
        description: reservation.description,
        capabilities,
    }
}

/// Parses an enumeration name supplied by a client.
pub(crate) fn parse_enum<T>(value: &str) -> Result<T, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    T::from_str(value).map_err(ApiError::from)
}

/// Parses an optional `YYYY-MM-DD` date.
pub(crate) fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value.map(parse_date).transpose().map_err(ApiError::from)
}
