// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for error translation.

use reserva::{Conflict, ConflictKind, CoreError};
use reserva_domain::{DomainError, ReservationState, TimeRangeError};
use reserva_persistence::PersistenceError;

use crate::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};

#[test]
fn test_time_range_messages_pass_through() {
    let err = DomainError::from(TimeRangeError::Format {
        input: String::from("9-10"),
    });
    let expected: String = err.to_string();

    assert_eq!(
        translate_domain_error(&err),
        ApiError::InvalidInput { message: expected }
    );
}

#[test]
fn test_core_errors_map_to_categories() {
    assert!(matches!(
        translate_core_error(CoreError::Validation(String::from("bad"))),
        ApiError::InvalidInput { .. }
    ));
    assert_eq!(
        translate_core_error(CoreError::NotFound {
            resource: "Space",
            id: 4
        }),
        ApiError::ResourceNotFound {
            resource_type: String::from("Space"),
            message: String::from("Space 4 not found"),
        }
    );
    assert!(matches!(
        translate_core_error(CoreError::Forbidden(String::from("no"))),
        ApiError::Forbidden { .. }
    ));
    assert!(matches!(
        translate_core_error(CoreError::Conflict(String::from("Reservation 1 is already Approved"))),
        ApiError::Conflict { ref rule, .. } if rule == "reservation_state"
    ));
    assert!(matches!(
        translate_core_error(CoreError::Store(String::from("disk"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_user_conflict_names_the_space() {
    let err = CoreError::ReservationConflict(Conflict {
        kind: ConflictKind::User,
        reservation_id: 3,
        time_range: String::from("10:00-11:00"),
        counterpart: String::from("Room B"),
        state: ReservationState::Approved,
    });

    assert_eq!(
        translate_core_error(err),
        ApiError::Conflict {
            rule: String::from("user_double_booking"),
            message: String::from(
                "User already has a reservation from 10:00-11:00 in Room B (Approved)"
            ),
        }
    );
}

#[test]
fn test_persistence_errors_map_to_categories() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::UniqueViolation(String::from("email"))),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::NotFound(String::from("user 3"))),
        ApiError::ResourceNotFound { .. }
    ));
    assert!(matches!(
        translate_persistence_error(PersistenceError::QueryFailed(String::from("locked"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_auth_errors() {
    let unauthorized: ApiError = AuthError::Unauthorized {
        action: String::from("manage_spaces"),
        required_role: String::from("Administrator"),
    }
    .into();
    assert_eq!(
        unauthorized.to_string(),
        "Unauthorized: 'manage_spaces' requires Administrator role"
    );
    assert!(matches!(unauthorized, ApiError::Forbidden { .. }));

    let failed: ApiError = AuthError::AuthenticationFailed {
        reason: String::from("A valid bearer token is required"),
    }
    .into();
    assert!(matches!(failed, ApiError::AuthenticationFailed { .. }));
}
