// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

use reserva_domain::{
    NewReservation, Reservation, ReservationState, ReservationView, Role, Space, SpaceType,
    User,
};
use time::Date;
use time::macros::date;

use crate::{CoreError, Principal, ReservationFilter, ReservationStore};

/// The date every test treats as today.
pub const TODAY: Date = date!(2026 - 03 - 10);

/// A date two days after `TODAY`.
pub const DAY: Date = date!(2026 - 03 - 12);

/// An in-memory store with transactional rollback.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: BTreeMap<i64, User>,
    spaces: BTreeMap<i64, Space>,
    reservations: BTreeMap<i64, Reservation>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_user(&mut self, name: &str, role: Role) -> Principal {
        let user_id: i64 = self.next_id();
        self.users.insert(
            user_id,
            User {
                user_id,
                name: name.to_string(),
                email: format!("{}@school.edu", name.to_lowercase()),
                role,
                department_id: None,
            },
        );
        Principal::new(user_id, role)
    }

    pub fn add_space(&mut self, name: &str) -> i64 {
        let space_id: i64 = self.next_id();
        self.spaces.insert(
            space_id,
            Space {
                space_id,
                name: name.to_string(),
                space_type: SpaceType::Classroom,
                capacity: 30,
                location: String::from("Main building"),
                description: None,
                is_available: true,
            },
        );
        space_id
    }

    pub fn set_space_available(&mut self, space_id: i64, available: bool) {
        self.spaces.get_mut(&space_id).unwrap().is_available = available;
    }

    /// Stores a reservation directly, bypassing every check.
    pub fn seed(
        &mut self,
        user: &Principal,
        space_id: i64,
        date: Date,
        time_range: &str,
        state: ReservationState,
    ) -> i64 {
        self.insert_reservation(&NewReservation {
            user_id: user.user_id(),
            space_id,
            date,
            time_range: time_range.to_string(),
            state,
            description: None,
        })
        .unwrap()
    }

    pub fn reservation(&self, reservation_id: i64) -> Option<&Reservation> {
        self.reservations.get(&reservation_id)
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    fn view(&self, reservation: &Reservation) -> ReservationView {
        let user: &User = &self.users[&reservation.user_id];
        ReservationView {
            reservation: reservation.clone(),
            user_name: user.name.clone(),
            user_email: user.email.clone(),
            space_name: self.spaces[&reservation.space_id].name.clone(),
        }
    }

    fn views_where(&self, predicate: impl Fn(&Reservation) -> bool) -> Vec<ReservationView> {
        self.reservations
            .values()
            .filter(|r| predicate(r))
            .map(|r| self.view(r))
            .collect()
    }
}

impl ReservationStore for MemoryStore {
    fn find_user(&mut self, user_id: i64) -> Result<Option<User>, CoreError> {
        Ok(self.users.get(&user_id).cloned())
    }

    fn find_space(&mut self, space_id: i64) -> Result<Option<Space>, CoreError> {
        Ok(self.spaces.get(&space_id).cloned())
    }

    fn find_reservation(
        &mut self,
        reservation_id: i64,
    ) -> Result<Option<ReservationView>, CoreError> {
        Ok(self.reservations.get(&reservation_id).map(|r| self.view(r)))
    }

    fn reservations_for_space_on(
        &mut self,
        space_id: i64,
        date: Date,
    ) -> Result<Vec<ReservationView>, CoreError> {
        Ok(self.views_where(|r| r.space_id == space_id && r.date == date))
    }

    fn reservations_for_user_on(
        &mut self,
        user_id: i64,
        date: Date,
    ) -> Result<Vec<ReservationView>, CoreError> {
        Ok(self.views_where(|r| r.user_id == user_id && r.date == date))
    }

    fn list_reservations(
        &mut self,
        filter: &ReservationFilter,
    ) -> Result<Vec<ReservationView>, CoreError> {
        Ok(self.views_where(|r| {
            filter.user_id.is_none_or(|id| r.user_id == id)
                && filter.space_id.is_none_or(|id| r.space_id == id)
                && filter.state.is_none_or(|state| r.state == state)
                && filter.from.is_none_or(|from| r.date >= from)
                && filter.to.is_none_or(|to| r.date <= to)
        }))
    }

    fn insert_reservation(&mut self, reservation: &NewReservation) -> Result<i64, CoreError> {
        let reservation_id: i64 = self.next_id();
        self.reservations.insert(
            reservation_id,
            Reservation {
                reservation_id,
                user_id: reservation.user_id,
                space_id: reservation.space_id,
                date: reservation.date,
                time_range: reservation.time_range.clone(),
                state: reservation.state,
                description: reservation.description.clone(),
            },
        );
        Ok(reservation_id)
    }

    fn update_reservation(&mut self, reservation: &Reservation) -> Result<(), CoreError> {
        self.reservations
            .insert(reservation.reservation_id, reservation.clone());
        Ok(())
    }

    fn delete_reservation(&mut self, reservation_id: i64) -> Result<(), CoreError> {
        self.reservations.remove(&reservation_id);
        Ok(())
    }

    fn atomically<T, F>(&mut self, operation: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
    {
        let snapshot: Self = self.clone();
        let result: Result<T, CoreError> = operation(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}
