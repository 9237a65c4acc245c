// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_domain::{DomainError, ReservationState, Role, TimeRangeError};

use super::helpers::{DAY, MemoryStore, TODAY};
use crate::{
    ConflictKind, CoreError, CreateReservation, ReservationFilter, approve_reservation,
    create_reservation, delete_reservation, get_reservation, list_reservations,
    reject_reservation,
};

fn request(user_id: i64, space_id: i64, time_range: &str) -> CreateReservation {
    CreateReservation {
        user_id,
        space_id,
        date: DAY,
        time_range: time_range.to_string(),
        description: None,
    }
}

// ============================================================================
// Create
// ============================================================================

#[test]
fn test_create_reservation_starts_pending() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");

    let view = create_reservation(
        &mut store,
        &teacher,
        &request(teacher.user_id(), room, "8:00-9:00"),
        TODAY,
    )
    .unwrap();

    assert_eq!(view.reservation.state, ReservationState::Pending);
    assert_eq!(view.reservation.time_range, "08:00-09:00");
    assert_eq!(view.user_name, "Alice");
    assert_eq!(view.space_name, "Room A");
    assert_eq!(store.reservation_count(), 1);
}

#[test]
fn test_create_for_someone_else_is_forbidden() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let admin = store.add_user("Root", Role::Administrator);
    let room = store.add_space("Room A");

    let err = create_reservation(
        &mut store,
        &admin,
        &request(teacher.user_id(), room, "08:00-09:00"),
        TODAY,
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::Forbidden(_)));
}

#[test]
fn test_create_for_someone_else_is_forbidden_even_with_invalid_fields() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);

    let err = create_reservation(
        &mut store,
        &teacher,
        &request(999, 999, "not a range"),
        TODAY,
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::Forbidden(_)));
}

#[test]
fn test_create_rejects_unknown_space() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);

    let err = create_reservation(
        &mut store,
        &teacher,
        &request(teacher.user_id(), 42, "08:00-09:00"),
        TODAY,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CoreError::NotFound {
            resource: "Space",
            id: 42
        }
    );
}

#[test]
fn test_create_rejects_unavailable_space() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    store.set_space_available(room, false);

    let err = create_reservation(
        &mut store,
        &teacher,
        &request(teacher.user_id(), room, "08:00-09:00"),
        TODAY,
    )
    .unwrap_err();

    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn test_create_rejects_invalid_time_range() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");

    let err = create_reservation(
        &mut store,
        &teacher,
        &request(teacher.user_id(), room, "08:00-08:15"),
        TODAY,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::InvalidTimeRange(
            TimeRangeError::Duration { .. }
        ))
    ));
}

#[test]
fn test_create_rejects_past_date() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let mut past = request(teacher.user_id(), room, "08:00-09:00");
    past.date = TODAY.previous_day().unwrap();

    let err = create_reservation(&mut store, &teacher, &past, TODAY).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::DateInPast { .. })
    ));
}

#[test]
fn test_create_allows_today() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let mut same_day = request(teacher.user_id(), room, "08:00-09:00");
    same_day.date = TODAY;

    assert!(create_reservation(&mut store, &teacher, &same_day, TODAY).is_ok());
}

#[test]
fn test_create_rejects_overlong_description() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let mut wordy = request(teacher.user_id(), room, "08:00-09:00");
    wordy.description = Some("a".repeat(501));

    let err = create_reservation(&mut store, &teacher, &wordy, TODAY).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::DescriptionTooLong { .. })
    ));
    assert_eq!(store.reservation_count(), 0);
}

#[test]
fn test_create_rejects_user_double_booking() {
    let mut store = MemoryStore::new();
    let teacher = store.add_user("Alice", Role::Teacher);
    let room_a = store.add_space("Room A");
    let room_b = store.add_space("Room B");
    store.seed(&teacher, room_a, DAY, "08:00-09:00", ReservationState::Pending);

    let err = create_reservation(
        &mut store,
        &teacher,
        &request(teacher.user_id(), room_b, "08:30-09:30"),
        TODAY,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        CoreError::ReservationConflict(conflict) if conflict.kind == ConflictKind::User
    ));
    assert_eq!(store.reservation_count(), 1);
}

#[test]
fn test_create_ignores_rejected_reservation_in_slot() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("Alice", Role::Teacher);
    let bob = store.add_user("Bob", Role::Teacher);
    let room = store.add_space("Room A");
    store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Rejected);

    let view = create_reservation(
        &mut store,
        &bob,
        &request(bob.user_id(), room, "08:00-09:00"),
        TODAY,
    )
    .unwrap();

    assert_eq!(view.reservation.state, ReservationState::Pending);
}

// ============================================================================
// Approve / reject
// ============================================================================

#[test]
fn test_end_to_end_booking_flow() {
    let mut store = MemoryStore::new();
    let admin = store.add_user("Root", Role::Administrator);
    let alice = store.add_user("Alice", Role::Teacher);
    let bob = store.add_user("Bob", Role::Teacher);
    let room = store.add_space("Room A");

    let first = create_reservation(
        &mut store,
        &alice,
        &request(alice.user_id(), room, "08:00-09:00"),
        TODAY,
    )
    .unwrap();
    assert_eq!(first.reservation.state, ReservationState::Pending);

    let err = create_reservation(
        &mut store,
        &bob,
        &request(bob.user_id(), room, "08:30-09:30"),
        TODAY,
    )
    .unwrap_err();
    match err {
        CoreError::ReservationConflict(conflict) => {
            assert_eq!(conflict.kind, ConflictKind::Space);
            assert_eq!(conflict.counterpart, "Alice");
            assert_eq!(conflict.state, ReservationState::Pending);
        }
        other => panic!("expected a space conflict, got {other:?}"),
    }

    let approved =
        approve_reservation(&mut store, &admin, first.reservation.reservation_id).unwrap();
    assert_eq!(approved.reservation.state, ReservationState::Approved);

    let err =
        approve_reservation(&mut store, &admin, first.reservation.reservation_id).unwrap_err();
    assert!(matches!(err, CoreError::Conflict(message) if message.contains("already Approved")));
}

#[test]
fn test_reject_sets_rejected() {
    let mut store = MemoryStore::new();
    let admin = store.add_user("Root", Role::Administrator);
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Pending);

    let view = reject_reservation(&mut store, &admin, id).unwrap();
    assert_eq!(view.reservation.state, ReservationState::Rejected);

    assert!(matches!(
        approve_reservation(&mut store, &admin, id),
        Err(CoreError::Conflict(_))
    ));
}

#[test]
fn test_only_administrators_review() {
    let mut store = MemoryStore::new();
    let coordinator = store.add_user("Carol", Role::Coordinator);
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Pending);

    for principal in [&coordinator, &alice] {
        assert!(matches!(
            approve_reservation(&mut store, principal, id),
            Err(CoreError::Forbidden(_))
        ));
        assert!(matches!(
            reject_reservation(&mut store, principal, id),
            Err(CoreError::Forbidden(_))
        ));
    }
    assert_eq!(
        store.reservation(id).unwrap().state,
        ReservationState::Pending
    );
}

#[test]
fn test_review_unknown_reservation_is_not_found() {
    let mut store = MemoryStore::new();
    let admin = store.add_user("Root", Role::Administrator);

    assert_eq!(
        approve_reservation(&mut store, &admin, 77).unwrap_err(),
        CoreError::NotFound {
            resource: "Reservation",
            id: 77
        }
    );
}

// ============================================================================
// Delete
// ============================================================================

#[test]
fn test_teacher_deletes_own_pending_reservation() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Pending);

    delete_reservation(&mut store, &alice, id, TODAY).unwrap();
    assert!(store.reservation(id).is_none());
}

#[test]
fn test_teacher_cannot_delete_others_reservation() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("Alice", Role::Teacher);
    let bob = store.add_user("Bob", Role::Teacher);
    let room = store.add_space("Room A");
    let id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Pending);

    assert!(matches!(
        delete_reservation(&mut store, &bob, id, TODAY),
        Err(CoreError::Forbidden(_))
    ));
    assert!(store.reservation(id).is_some());
}

#[test]
fn test_teacher_cannot_delete_own_approved_reservation() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Approved);

    assert!(matches!(
        delete_reservation(&mut store, &alice, id, TODAY),
        Err(CoreError::Forbidden(_))
    ));
}

#[test]
fn test_coordinator_deletes_future_approved_but_not_past_approved() {
    let mut store = MemoryStore::new();
    let coordinator = store.add_user("Carol", Role::Coordinator);
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let past = TODAY.previous_day().unwrap();
    let future_id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Approved);
    let past_id = store.seed(&alice, room, past, "08:00-09:00", ReservationState::Approved);

    delete_reservation(&mut store, &coordinator, future_id, TODAY).unwrap();
    assert!(matches!(
        delete_reservation(&mut store, &coordinator, past_id, TODAY),
        Err(CoreError::Forbidden(_))
    ));
}

#[test]
fn test_administrator_deletes_past_approved() {
    let mut store = MemoryStore::new();
    let admin = store.add_user("Root", Role::Administrator);
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let past = TODAY.previous_day().unwrap();
    let id = store.seed(&alice, room, past, "08:00-09:00", ReservationState::Approved);

    delete_reservation(&mut store, &admin, id, TODAY).unwrap();
    assert!(store.reservation(id).is_none());
}

#[test]
fn test_past_rejected_reservation_deletable_by_owner() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("Alice", Role::Teacher);
    let room = store.add_space("Room A");
    let past = TODAY.previous_day().unwrap();
    let id = store.seed(&alice, room, past, "08:00-09:00", ReservationState::Rejected);

    assert!(delete_reservation(&mut store, &alice, id, TODAY).is_ok());
}

// ============================================================================
// Read
// ============================================================================

#[test]
fn test_teacher_sees_only_own_reservations() {
    let mut store = MemoryStore::new();
    let alice = store.add_user("Alice", Role::Teacher);
    let bob = store.add_user("Bob", Role::Teacher);
    let room = store.add_space("Room A");
    let alice_id = store.seed(&alice, room, DAY, "08:00-09:00", ReservationState::Pending);
    let bob_id = store.seed(&bob, room, DAY, "10:00-11:00", ReservationState::Pending);

    let filter = ReservationFilter {
        user_id: Some(bob.user_id()),
        ..ReservationFilter::default()
    };
    let listed = list_reservations(&mut store, &alice, &filter).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].reservation.reservation_id, alice_id);

    assert!(get_reservation(&mut store, &alice, alice_id).is_ok());
    assert!(matches!(
        get_reservation(&mut store, &alice, bob_id),
        Err(CoreError::Forbidden(_))
    ));
}

#[test]
fn test_coordinator_lists_with_filters() {
    let mut store = MemoryStore::new();
    let coordinator = store.add_user("Carol", Role::Coordinator);
    let alice = store.add_user("Alice", Role::Teacher);
    let room_a = store.add_space("Room A");
    let room_b = store.add_space("Room B");
    store.seed(&alice, room_a, DAY, "08:00-09:00", ReservationState::Pending);
    store.seed(&alice, room_b, DAY, "10:00-11:00", ReservationState::Approved);
    store.seed(&alice, room_a, TODAY, "12:00-13:00", ReservationState::Approved);

    let all = list_reservations(&mut store, &coordinator, &ReservationFilter::default()).unwrap();
    assert_eq!(all.len(), 3);

    let approved_on_day = list_reservations(
        &mut store,
        &coordinator,
        &ReservationFilter {
            state: Some(ReservationState::Approved),
            from: Some(DAY),
            to: Some(DAY),
            ..ReservationFilter::default()
        },
    )
    .unwrap();
    assert_eq!(approved_on_day.len(), 1);
    assert_eq!(approved_on_day[0].space_name, "Room B");

    let room_a_only = list_reservations(
        &mut store,
        &coordinator,
        &ReservationFilter {
            space_id: Some(room_a),
            ..ReservationFilter::default()
        },
    )
    .unwrap();
    assert_eq!(room_a_only.len(), 2);
}
