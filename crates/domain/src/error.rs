// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use time::Date;

use crate::time_range::TimeRangeError;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A time range failed to parse or validate.
    #[error(transparent)]
    InvalidTimeRange(#[from] TimeRangeError),
    /// A name-like field is empty or too long.
    #[error("Invalid {field}: {reason}")]
    InvalidName {
        /// The offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
    /// An email address is malformed.
    #[error("Invalid email address '{0}'")]
    InvalidEmail(String),
    /// Space capacity is outside 1..=1000.
    #[error("Capacity must be between 1 and 1000, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: i64,
    },
    /// A department code is malformed.
    #[error("Invalid department code '{0}': use 2 to 10 letters or digits")]
    InvalidDepartmentCode(String),
    /// A free-text description exceeds its limit.
    #[error("Description is too long: {length} characters, maximum is {max}")]
    DescriptionTooLong {
        /// Actual length in characters.
        length: usize,
        /// Maximum length in characters.
        max: usize,
    },
    /// Unknown role name.
    #[error("Invalid role '{0}': expected Teacher, Coordinator or Administrator")]
    InvalidRole(String),
    /// Unknown space type name.
    #[error("Invalid space type '{0}': expected Classroom, Laboratory or Auditorium")]
    InvalidSpaceType(String),
    /// Unknown department type name.
    #[error(
        "Invalid department type '{0}': expected Academic, Administrative, Research or Support"
    )]
    InvalidDepartmentType(String),
    /// Unknown reservation state name.
    #[error("Invalid reservation state '{0}': expected Pending, Approved or Rejected")]
    InvalidReservationState(String),
    /// A date string is not `YYYY-MM-DD`.
    #[error("Failed to parse date '{date_string}': {error}")]
    DateParseError {
        /// The rejected input.
        date_string: String,
        /// The parser's message.
        error: String,
    },
    /// A reservation date lies before today.
    #[error("Cannot reserve {date}: the date is in the past")]
    DateInPast {
        /// The rejected date.
        date: Date,
    },
}
