// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Space queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reserva_domain::{ReservationState, Space, SpaceType};
use tracing::debug;

use crate::diesel_schema::{reservations, spaces};
use crate::error::PersistenceError;

/// Diesel Queryable struct for space rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = spaces)]
struct SpaceRow {
    space_id: i64,
    name: String,
    space_type: String,
    capacity: i32,
    location: String,
    description: Option<String>,
    is_available: i32,
}

impl TryFrom<SpaceRow> for Space {
    type Error = PersistenceError;

    fn try_from(row: SpaceRow) -> Result<Self, Self::Error> {
        let corrupt = |detail: String| {
            PersistenceError::CorruptRow(format!("space {}: {detail}", row.space_id))
        };

        let space_type: SpaceType = row
            .space_type
            .parse()
            .map_err(|e: reserva_domain::DomainError| corrupt(e.to_string()))?;
        let capacity: u16 = u16::try_from(row.capacity)
            .map_err(|_| corrupt(format!("capacity {} out of range", row.capacity)))?;

        Ok(Self {
            space_id: row.space_id,
            name: row.name,
            space_type,
            capacity,
            location: row.location,
            description: row.description,
            is_available: row.is_available != 0,
        })
    }
}

/// Retrieves a space by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_space(
    conn: &mut SqliteConnection,
    space_id: i64,
) -> Result<Option<Space>, PersistenceError> {
    debug!("Looking up space by ID: {}", space_id);

    spaces::table
        .filter(spaces::space_id.eq(space_id))
        .select(SpaceRow::as_select())
        .first(conn)
        .optional()?
        .map(Space::try_from)
        .transpose()
}

/// Lists spaces ordered by name, optionally only those open for booking.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_spaces(
    conn: &mut SqliteConnection,
    available_only: bool,
) -> Result<Vec<Space>, PersistenceError> {
    let mut query = spaces::table.select(SpaceRow::as_select()).into_boxed();
    if available_only {
        query = query.filter(spaces::is_available.eq(1));
    }

    let rows: Vec<SpaceRow> = query.order(spaces::name.asc()).load(conn)?;
    rows.into_iter().map(Space::try_from).collect()
}

/// Counts Pending and Approved reservations of a space.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_active_reservations(
    conn: &mut SqliteConnection,
    space_id: i64,
) -> Result<i64, PersistenceError> {
    let active: Vec<&str> = vec![
        ReservationState::Pending.as_str(),
        ReservationState::Approved.as_str(),
    ];

    Ok(reservations::table
        .filter(reservations::space_id.eq(space_id))
        .filter(reservations::state.eq_any(active))
        .count()
        .get_result(conn)?)
}
