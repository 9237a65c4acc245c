// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reserva_domain::Department;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewDepartment;
use crate::diesel_schema::departments;
use crate::error::PersistenceError;

/// Creates a new department.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the code is taken or the
/// head already leads another department.
pub fn create_department(
    conn: &mut SqliteConnection,
    department: &NewDepartment,
) -> Result<i64, PersistenceError> {
    info!("Creating department with code: {}", department.code);

    diesel::insert_into(departments::table)
        .values((
            departments::name.eq(&department.name),
            departments::code.eq(&department.code),
            departments::department_type.eq(department.department_type.as_str()),
            departments::description.eq(&department.description),
            departments::head_user_id.eq(department.head_user_id),
        ))
        .execute(conn)?;

    let department_id: i64 = conn.get_last_insert_rowid()?;
    info!(department_id, "Department created successfully");
    Ok(department_id)
}

/// Overwrites a department.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was updated.
pub fn update_department(
    conn: &mut SqliteConnection,
    department: &Department,
) -> Result<(), PersistenceError> {
    info!(department_id = department.department_id, "Updating department");

    let updated: usize = diesel::update(departments::table)
        .filter(departments::department_id.eq(department.department_id))
        .set((
            departments::name.eq(&department.name),
            departments::code.eq(&department.code),
            departments::department_type.eq(department.department_type.as_str()),
            departments::description.eq(&department.description),
            departments::head_user_id.eq(department.head_user_id),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "department {}",
            department.department_id
        )));
    }
    Ok(())
}

/// Deletes a department. Its members keep their accounts with no
/// department.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the department does not exist.
pub fn delete_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<(), PersistenceError> {
    info!(department_id, "Deleting department");

    let deleted: usize = diesel::delete(
        departments::table.filter(departments::department_id.eq(department_id)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!(
            "department {department_id}"
        )));
    }
    Ok(())
}
