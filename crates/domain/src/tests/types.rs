// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DepartmentType, DomainError, ReservationState, Role, SpaceType};

#[test]
fn test_role_round_trips_through_strings() {
    for role in Role::ALL {
        assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        assert_eq!(role.to_string(), role.as_str());
    }
}

#[test]
fn test_role_parse_is_case_insensitive() {
    assert_eq!("teacher".parse::<Role>().unwrap(), Role::Teacher);
    assert_eq!(
        "ADMINISTRATOR".parse::<Role>().unwrap(),
        Role::Administrator
    );
}

#[test]
fn test_role_parse_rejects_unknown_role() {
    let err = "Janitor".parse::<Role>().unwrap_err();
    assert_eq!(err, DomainError::InvalidRole(String::from("Janitor")));
}

#[test]
fn test_space_type_parse() {
    assert_eq!(
        "laboratory".parse::<SpaceType>().unwrap(),
        SpaceType::Laboratory
    );
    assert!(matches!(
        "Gym".parse::<SpaceType>(),
        Err(DomainError::InvalidSpaceType(_))
    ));
}

#[test]
fn test_department_type_parse() {
    for kind in DepartmentType::ALL {
        assert_eq!(kind.as_str().parse::<DepartmentType>().unwrap(), kind);
    }
    assert!(matches!(
        "Sales".parse::<DepartmentType>(),
        Err(DomainError::InvalidDepartmentType(_))
    ));
}

#[test]
fn test_reservation_state_defaults_to_pending() {
    assert_eq!(ReservationState::default(), ReservationState::Pending);
}

#[test]
fn test_reservation_state_transitions_only_from_pending() {
    use ReservationState::{Approved, Pending, Rejected};

    assert!(Pending.can_transition_to(Approved));
    assert!(Pending.can_transition_to(Rejected));

    assert!(!Pending.can_transition_to(Pending));
    assert!(!Approved.can_transition_to(Rejected));
    assert!(!Approved.can_transition_to(Approved));
    assert!(!Rejected.can_transition_to(Approved));
    assert!(!Approved.can_transition_to(Pending));
}

#[test]
fn test_rejected_reservations_are_not_active() {
    assert!(ReservationState::Pending.is_active());
    assert!(ReservationState::Approved.is_active());
    assert!(!ReservationState::Rejected.is_active());
}
