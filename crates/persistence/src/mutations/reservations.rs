// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation mutations.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use reserva_domain::{NewReservation, Reservation, format_date};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::reservations;
use crate::error::PersistenceError;

/// Inserts a reservation and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the user or space does
/// not exist, or another error if the insert fails.
pub fn insert_reservation(
    conn: &mut SqliteConnection,
    reservation: &NewReservation,
) -> Result<i64, PersistenceError> {
    debug!(
        user_id = reservation.user_id,
        space_id = reservation.space_id,
        "Inserting reservation"
    );

    diesel::insert_into(reservations::table)
        .values((
            reservations::user_id.eq(reservation.user_id),
            reservations::space_id.eq(reservation.space_id),
            reservations::date.eq(format_date(reservation.date)),
            reservations::time_range.eq(&reservation.time_range),
            reservations::state.eq(reservation.state.as_str()),
            reservations::description.eq(&reservation.description),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Overwrites a reservation and stamps `updated_at`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was updated.
pub fn update_reservation(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
) -> Result<(), PersistenceError> {
    debug!(reservation_id = reservation.reservation_id, "Updating reservation");

    let updated: usize = diesel::update(reservations::table)
        .filter(reservations::reservation_id.eq(reservation.reservation_id))
        .set((
            reservations::user_id.eq(reservation.user_id),
            reservations::space_id.eq(reservation.space_id),
            reservations::date.eq(format_date(reservation.date)),
            reservations::time_range.eq(&reservation.time_range),
            reservations::state.eq(reservation.state.as_str()),
            reservations::description.eq(&reservation.description),
            reservations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "reservation {}",
            reservation.reservation_id
        )));
    }
    Ok(())
}

/// Deletes a reservation.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not exist.
pub fn delete_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<(), PersistenceError> {
    debug!(reservation_id, "Deleting reservation");

    let deleted: usize = diesel::delete(
        reservations::table.filter(reservations::reservation_id.eq(reservation_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "reservation {reservation_id}"
        )));
    }
    Ok(())
}
