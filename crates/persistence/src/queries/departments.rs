// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Department queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reserva_domain::{Department, DepartmentType};
use tracing::debug;

use crate::diesel_schema::departments;
use crate::error::PersistenceError;

/// Diesel Queryable struct for department rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
struct DepartmentRow {
    department_id: i64,
    name: String,
    code: String,
    department_type: String,
    description: Option<String>,
    head_user_id: Option<i64>,
}

impl TryFrom<DepartmentRow> for Department {
    type Error = PersistenceError;

    fn try_from(row: DepartmentRow) -> Result<Self, Self::Error> {
        let department_type: DepartmentType = row.department_type.parse().map_err(|e| {
            PersistenceError::CorruptRow(format!("department {}: {e}", row.department_id))
        })?;

        Ok(Self {
            department_id: row.department_id,
            name: row.name,
            code: row.code,
            department_type,
            description: row.description,
            head_user_id: row.head_user_id,
        })
    }
}

/// Retrieves a department by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_department(
    conn: &mut SqliteConnection,
    department_id: i64,
) -> Result<Option<Department>, PersistenceError> {
    debug!("Looking up department by ID: {}", department_id);

    departments::table
        .filter(departments::department_id.eq(department_id))
        .select(DepartmentRow::as_select())
        .first(conn)
        .optional()?
        .map(Department::try_from)
        .transpose()
}

/// Lists all departments ordered by code.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_departments(conn: &mut SqliteConnection) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<DepartmentRow> = departments::table
        .select(DepartmentRow::as_select())
        .order(departments::code.asc())
        .load(conn)?;

    rows.into_iter().map(Department::try_from).collect()
}

/// Finds the department a user heads, if any.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_department_headed_by(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<Department>, PersistenceError> {
    departments::table
        .filter(departments::head_user_id.eq(user_id))
        .select(DepartmentRow::as_select())
        .first(conn)
        .optional()?
        .map(Department::try_from)
        .transpose()
}
