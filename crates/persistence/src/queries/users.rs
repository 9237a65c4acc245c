// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reserva_domain::{Role, User};
use tracing::debug;

use crate::data_models::UserCredentials;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    user_id: i64,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    department_id: Option<i64>,
}

impl UserRow {
    fn into_credentials(self) -> Result<UserCredentials, PersistenceError> {
        let role: Role = self.role.parse().map_err(|e| {
            PersistenceError::CorruptRow(format!("user {}: {e}", self.user_id))
        })?;

        Ok(UserCredentials {
            user: User {
                user_id: self.user_id,
                name: self.name,
                email: self.email,
                role,
                department_id: self.department_id,
            },
            password_hash: self.password_hash,
        })
    }

    fn into_user(self) -> Result<User, PersistenceError> {
        Ok(self.into_credentials()?.user)
    }
}

/// Retrieves a user by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the user is not found.
pub fn get_user(conn: &mut SqliteConnection, user_id: i64) -> Result<Option<User>, PersistenceError> {
    debug!("Looking up user by ID: {}", user_id);

    users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRow::into_user)
        .transpose()
}

/// Retrieves a user and their password hash by email.
///
/// The email column is `COLLATE NOCASE`, so the lookup ignores case.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user has this email.
pub fn get_credentials_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserCredentials>, PersistenceError> {
    debug!("Looking up credentials for email: {}", email);

    users::table
        .filter(users::email.eq(email.trim()))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?
        .map(UserRow::into_credentials)
        .transpose()
}

/// Retrieves the stored password hash for a user.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_password_hash(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<String>, PersistenceError> {
    Ok(users::table
        .filter(users::user_id.eq(user_id))
        .select(users::password_hash)
        .first(conn)
        .optional()?)
}

/// Lists users ordered by name, optionally narrowed by role and department.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_users(
    conn: &mut SqliteConnection,
    role: Option<Role>,
    department_id: Option<i64>,
) -> Result<Vec<User>, PersistenceError> {
    let mut query = users::table.select(UserRow::as_select()).into_boxed();

    if let Some(role) = role {
        query = query.filter(users::role.eq(role.as_str()));
    }
    if let Some(department_id) = department_id {
        query = query.filter(users::department_id.eq(department_id));
    }

    let rows: Vec<UserRow> = query
        .order((users::name.asc(), users::user_id.asc()))
        .load(conn)?;

    rows.into_iter().map(UserRow::into_user).collect()
}

/// Counts users holding a role.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_users_with_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<i64, PersistenceError> {
    Ok(users::table
        .filter(users::role.eq(role.as_str()))
        .count()
        .get_result(conn)?)
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    Ok(bcrypt::verify(password, password_hash)?)
}
