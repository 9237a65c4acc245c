// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation queries.
//!
//! Every query joins the owning user and the space so callers receive
//! complete [`ReservationView`]s.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use reserva::ReservationFilter;
use reserva_domain::{
    DomainError, Reservation, ReservationState, ReservationView, format_date, parse_date,
};
use time::Date;
use tracing::debug;

use crate::diesel_schema::{reservations, spaces, users};
use crate::error::PersistenceError;

/// Diesel Queryable struct for reservation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reservations)]
struct ReservationRow {
    reservation_id: i64,
    user_id: i64,
    space_id: i64,
    date: String,
    time_range: String,
    state: String,
    description: Option<String>,
}

type ViewRow = (ReservationRow, String, String, String);

fn into_view(
    (row, user_name, user_email, space_name): ViewRow,
) -> Result<ReservationView, PersistenceError> {
    let corrupt = |e: DomainError| {
        PersistenceError::CorruptRow(format!("reservation {}: {e}", row.reservation_id))
    };

    let date: Date = parse_date(&row.date).map_err(corrupt)?;
    let state: ReservationState = row.state.parse().map_err(corrupt)?;

    Ok(ReservationView {
        reservation: Reservation {
            reservation_id: row.reservation_id,
            user_id: row.user_id,
            space_id: row.space_id,
            date,
            time_range: row.time_range,
            state,
            description: row.description,
        },
        user_name,
        user_email,
        space_name,
    })
}

fn load_views(
    conn: &mut SqliteConnection,
    filter: &ReservationFilter,
    reservation_id: Option<i64>,
) -> Result<Vec<ReservationView>, PersistenceError> {
    let mut query = reservations::table
        .inner_join(users::table)
        .inner_join(spaces::table)
        .select((
            ReservationRow::as_select(),
            users::name,
            users::email,
            spaces::name,
        ))
        .into_boxed::<Sqlite>();

    if let Some(reservation_id) = reservation_id {
        query = query.filter(reservations::reservation_id.eq(reservation_id));
    }
    if let Some(user_id) = filter.user_id {
        query = query.filter(reservations::user_id.eq(user_id));
    }
    if let Some(space_id) = filter.space_id {
        query = query.filter(reservations::space_id.eq(space_id));
    }
    if let Some(state) = filter.state {
        query = query.filter(reservations::state.eq(state.as_str()));
    }
    // ISO dates compare correctly as text.
    if let Some(from) = filter.from {
        query = query.filter(reservations::date.ge(format_date(from)));
    }
    if let Some(to) = filter.to {
        query = query.filter(reservations::date.le(format_date(to)));
    }

    let rows: Vec<ViewRow> = query
        .order((
            reservations::date.asc(),
            reservations::time_range.asc(),
            reservations::reservation_id.asc(),
        ))
        .load(conn)?;

    rows.into_iter().map(into_view).collect()
}

/// Retrieves a reservation by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<Option<ReservationView>, PersistenceError> {
    debug!("Looking up reservation by ID: {}", reservation_id);
    Ok(load_views(conn, &ReservationFilter::default(), Some(reservation_id))?
        .into_iter()
        .next())
}

/// Lists reservations matching a filter, ordered by date and start time.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_reservations(
    conn: &mut SqliteConnection,
    filter: &ReservationFilter,
) -> Result<Vec<ReservationView>, PersistenceError> {
    load_views(conn, filter, None)
}

/// Lists every reservation of a space on one date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn reservations_for_space_on(
    conn: &mut SqliteConnection,
    space_id: i64,
    date: Date,
) -> Result<Vec<ReservationView>, PersistenceError> {
    let filter = ReservationFilter {
        space_id: Some(space_id),
        from: Some(date),
        to: Some(date),
        ..ReservationFilter::default()
    };
    load_views(conn, &filter, None)
}

/// Lists every reservation of a user on one date.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn reservations_for_user_on(
    conn: &mut SqliteConnection,
    user_id: i64,
    date: Date,
) -> Result<Vec<ReservationView>, PersistenceError> {
    let filter = ReservationFilter {
        user_id: Some(user_id),
        from: Some(date),
        to: Some(date),
        ..ReservationFilter::default()
    };
    load_views(conn, &filter, None)
}
