// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva::ReservationStore;
use reserva_domain::{NewReservation, ReservationState, Role, Space, SpaceType};
use time::macros::date;

use super::{create_test_space, create_test_user, new_persistence};
use crate::{NewSpace, PersistenceError};

#[test]
fn test_create_and_get_space() {
    let mut persistence = new_persistence();
    let space_id = create_test_space(&mut persistence, "Room A");

    let space: Space = persistence.get_space(space_id).unwrap().unwrap();
    assert_eq!(space.name, "Room A");
    assert_eq!(space.space_type, SpaceType::Classroom);
    assert_eq!(space.capacity, 30);
    assert!(space.is_available);
}

#[test]
fn test_space_names_are_unique_regardless_of_case() {
    let mut persistence = new_persistence();
    create_test_space(&mut persistence, "Room A");

    let result = persistence.create_space(&NewSpace {
        name: String::from("ROOM a"),
        space_type: SpaceType::Laboratory,
        capacity: 12,
        location: String::from("Annex"),
        description: None,
        is_available: true,
    });

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_list_spaces_can_skip_unavailable() {
    let mut persistence = new_persistence();
    create_test_space(&mut persistence, "Room B");
    let closed = create_test_space(&mut persistence, "Room A");

    let mut space = persistence.get_space(closed).unwrap().unwrap();
    space.is_available = false;
    persistence.update_space(&space).unwrap();

    let all: Vec<String> = persistence
        .list_spaces(false)
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(all, vec!["Room A", "Room B"]);

    let open = persistence.list_spaces(true).unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].name, "Room B");
}

#[test]
fn test_active_reservation_count_ignores_rejected() {
    let mut persistence = new_persistence();
    let alice = create_test_user(&mut persistence, "Alice", Role::Teacher);
    let room = create_test_space(&mut persistence, "Room A");

    for (time_range, state) in [
        ("08:00-09:00", ReservationState::Pending),
        ("09:00-10:00", ReservationState::Approved),
        ("10:00-11:00", ReservationState::Rejected),
    ] {
        persistence
            .insert_reservation(&NewReservation {
                user_id: alice,
                space_id: room,
                date: date!(2026 - 05 - 04),
                time_range: time_range.to_string(),
                state,
                description: None,
            })
            .unwrap();
    }

    assert_eq!(
        persistence
            .count_active_reservations_for_space(room)
            .unwrap(),
        2
    );
}

#[test]
fn test_delete_space() {
    let mut persistence = new_persistence();
    let room = create_test_space(&mut persistence, "Room A");

    persistence.delete_space(room).unwrap();

    assert!(persistence.get_space(room).unwrap().is_none());
    assert!(matches!(
        persistence.delete_space(room),
        Err(PersistenceError::NotFound(_))
    ));
}
