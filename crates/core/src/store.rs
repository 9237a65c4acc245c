// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_domain::{
    NewReservation, Reservation, ReservationState, ReservationView, Space, User,
};
use time::Date;

use crate::error::CoreError;

/// Criteria for listing reservations. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    pub user_id: Option<i64>,
    pub space_id: Option<i64>,
    pub state: Option<ReservationState>,
    /// Inclusive lower date bound.
    pub from: Option<Date>,
    /// Inclusive upper date bound.
    pub to: Option<Date>,
}

/// The storage contract consumed by the reservation engine.
///
/// Reservations are always returned joined with their owner and space so
/// conflict messages can name them.
pub trait ReservationStore {
    /// Looks up a user by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the lookup fails.
    fn find_user(&mut self, user_id: i64) -> Result<Option<User>, CoreError>;

    /// Looks up a space by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the lookup fails.
    fn find_space(&mut self, space_id: i64) -> Result<Option<Space>, CoreError>;

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the lookup fails.
    fn find_reservation(&mut self, reservation_id: i64)
    -> Result<Option<ReservationView>, CoreError>;

    /// Returns every reservation for a space on a date, in any state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    fn reservations_for_space_on(
        &mut self,
        space_id: i64,
        date: Date,
    ) -> Result<Vec<ReservationView>, CoreError>;

    /// Returns every reservation owned by a user on a date, in any state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    fn reservations_for_user_on(
        &mut self,
        user_id: i64,
        date: Date,
    ) -> Result<Vec<ReservationView>, CoreError>;

    /// Lists reservations matching a filter, ordered by date then start time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the query fails.
    fn list_reservations(
        &mut self,
        filter: &ReservationFilter,
    ) -> Result<Vec<ReservationView>, CoreError>;

    /// Inserts a reservation and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the insert fails.
    fn insert_reservation(&mut self, reservation: &NewReservation) -> Result<i64, CoreError>;

    /// Overwrites a stored reservation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the update fails.
    fn update_reservation(&mut self, reservation: &Reservation) -> Result<(), CoreError>;

    /// Deletes a reservation.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Store` if the delete fails.
    fn delete_reservation(&mut self, reservation_id: i64) -> Result<(), CoreError>;

    /// Runs `operation` as one write transaction.
    ///
    /// Implementations must take the write lock before `operation` reads
    /// anything, and must discard every write if it returns an error.
    ///
    /// # Errors
    ///
    /// Returns the error from `operation`, or `CoreError::Store` if the
    /// transaction cannot be opened or committed.
    fn atomically<T, F>(&mut self, operation: F) -> Result<T, CoreError>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T, CoreError>;
}
