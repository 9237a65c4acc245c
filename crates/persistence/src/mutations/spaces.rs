// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Space mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reserva_domain::Space;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewSpace;
use crate::diesel_schema::spaces;
use crate::error::PersistenceError;

/// Creates a new space.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the name is taken.
pub fn create_space(conn: &mut SqliteConnection, space: &NewSpace) -> Result<i64, PersistenceError> {
    info!("Creating space with name: {}", space.name);

    diesel::insert_into(spaces::table)
        .values((
            spaces::name.eq(&space.name),
            spaces::space_type.eq(space.space_type.as_str()),
            spaces::capacity.eq(i32::from(space.capacity)),
            spaces::location.eq(&space.location),
            spaces::description.eq(&space.description),
            spaces::is_available.eq(i32::from(space.is_available)),
        ))
        .execute(conn)?;

    let space_id: i64 = conn.get_last_insert_rowid()?;
    info!(space_id, "Space created successfully");
    Ok(space_id)
}

/// Overwrites a space.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was updated.
pub fn update_space(conn: &mut SqliteConnection, space: &Space) -> Result<(), PersistenceError> {
    info!(space_id = space.space_id, "Updating space");

    let updated: usize = diesel::update(spaces::table)
        .filter(spaces::space_id.eq(space.space_id))
        .set((
            spaces::name.eq(&space.name),
            spaces::space_type.eq(space.space_type.as_str()),
            spaces::capacity.eq(i32::from(space.capacity)),
            spaces::location.eq(&space.location),
            spaces::description.eq(&space.description),
            spaces::is_available.eq(i32::from(space.is_available)),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("space {}", space.space_id)));
    }
    Ok(())
}

/// Deletes a space and any reservations still attached to it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the space does not exist.
pub fn delete_space(conn: &mut SqliteConnection, space_id: i64) -> Result<(), PersistenceError> {
    info!(space_id, "Deleting space");

    let deleted: usize = diesel::delete(spaces::table.filter(spaces::space_id.eq(space_id)))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("space {space_id}")));
    }
    Ok(())
}
