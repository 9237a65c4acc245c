// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod time_range;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use time_range::{
    CLOSING_MINUTE, MIN_DURATION_MINUTES, OPENING_MINUTE, TimeRange, TimeRangeError,
};
pub use types::{
    Department, DepartmentType, NewReservation, Reservation, ReservationState, ReservationView,
    Role, Space, SpaceType, User,
};
pub use validation::{
    CAPACITY_RANGE, MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, format_date, parse_date,
    validate_capacity, validate_department_code, validate_description, validate_email,
    validate_name, validate_not_past,
};
