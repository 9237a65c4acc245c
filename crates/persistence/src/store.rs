// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The reservation engine's view of the database.

use reserva::{CoreError, ReservationFilter, ReservationStore};
use reserva_domain::{NewReservation, Reservation, ReservationView, Space, User};
use time::Date;

use crate::Persistence;
use crate::{mutations, queries};

impl ReservationStore for Persistence {
    fn find_user(&mut self, user_id: i64) -> Result<Option<User>, CoreError> {
        Ok(queries::users::get_user(&mut self.conn, user_id)?)
    }

    fn find_space(&mut self, space_id: i64) -> Result<Option<Space>, CoreError> {
        Ok(queries::spaces::get_space(&mut self.conn, space_id)?)
    }

    fn find_reservation(
        &mut self,
        reservation_id: i64,
    ) -> Result<Option<ReservationView>, CoreError> {
        Ok(queries::reservations::get_reservation(
            &mut self.conn,
            reservation_id,
        )?)
    }

    fn reservations_for_space_on(
        &mut self,
        space_id: i64,
        date: Date,
    ) -> Result<Vec<ReservationView>, CoreError> {
        Ok(queries::reservations::reservations_for_space_on(
            &mut self.conn,
            space_id,
            date,
        )?)
    }

    fn reservations_for_user_on(
        &mut self,
        user_id: i64,
        date: Date,
    ) -> Result<Vec<ReservationView>, CoreError> {
        Ok(queries::reservations::reservations_for_user_on(
            &mut self.conn,
            user_id,
            date,
        )?)
    }

    fn list_reservations(
        &mut self,
        filter: &ReservationFilter,
    ) -> Result<Vec<ReservationView>, CoreError> {
        Ok(queries::reservations::list_reservations(
            &mut self.conn,
            filter,
        )?)
    }

    fn insert_reservation(&mut self, reservation: &NewReservation) -> Result<i64, CoreError> {
        Ok(mutations::reservations::insert_reservation(
            &mut self.conn,
            reservation,
        )?)
    }

    fn update_reservation(&mut self, reservation: &Reservation) -> Result<(), CoreError> {
        Ok(mutations::reservations::update_reservation(
            &mut self.conn,
            reservation,
        )?)
    }

    fn delete_reservation(&mut self, reservation_id: i64) -> Result<(), CoreError> {
        Ok(mutations::reservations::delete_reservation(
            &mut self.conn,
            reservation_id,
        )?)
    }

    fn atomically<T, F>(&mut self, operation: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut Self) -> Result<T, CoreError>,
    {
        self.immediate_transaction(operation)
    }
}
