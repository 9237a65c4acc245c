// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_domain::DomainError;

use crate::availability::Conflict;

/// Errors produced by the reservation engine.
///
/// Each variant maps onto one category of the external error contract:
/// validation, not found, forbidden, conflict, or an internal store failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated (bad time range, past date, and so on).
    DomainViolation(DomainError),
    /// The request is malformed in a way no domain rule covers.
    Validation(String),
    /// A referenced entity does not exist.
    NotFound {
        /// The kind of entity.
        resource: &'static str,
        /// The id that was looked up.
        id: i64,
    },
    /// The principal may not perform this operation.
    Forbidden(String),
    /// The slot is already taken by another reservation.
    ReservationConflict(Conflict),
    /// The operation conflicts with the current state.
    Conflict(String),
    /// The entity store failed.
    Store(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::Validation(msg) | Self::Forbidden(msg) | Self::Conflict(msg) => {
                write!(f, "{msg}")
            }
            Self::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            Self::ReservationConflict(conflict) => write!(f, "{conflict}"),
            Self::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<Conflict> for CoreError {
    fn from(conflict: Conflict) -> Self {
        Self::ReservationConflict(conflict)
    }
}
