// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! User mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use reserva_domain::User;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::NewUser;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

fn hash_password(password: &str) -> Result<String, PersistenceError> {
    Ok(bcrypt::hash(password, bcrypt::DEFAULT_COST)?)
}

/// Creates a new user.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the email is taken, or
/// another error if the insert fails.
pub fn create_user(conn: &mut SqliteConnection, user: &NewUser) -> Result<i64, PersistenceError> {
    info!(
        "Creating user with email: {}, role: {}",
        user.email, user.role
    );

    let password_hash: String = hash_password(&user.password)?;

    diesel::insert_into(users::table)
        .values((
            users::name.eq(&user.name),
            users::email.eq(&user.email),
            users::password_hash.eq(&password_hash),
            users::role.eq(user.role.as_str()),
            users::department_id.eq(user.department_id),
        ))
        .execute(conn)?;

    let user_id: i64 = conn.get_last_insert_rowid()?;

    info!(user_id, "User created successfully");

    Ok(user_id)
}

/// Overwrites a user's profile fields. The password is left untouched.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no row was updated.
pub fn update_user(conn: &mut SqliteConnection, user: &User) -> Result<(), PersistenceError> {
    info!(user_id = user.user_id, "Updating user");

    let updated: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user.user_id))
        .set((
            users::name.eq(&user.name),
            users::email.eq(&user.email),
            users::role.eq(user.role.as_str()),
            users::department_id.eq(user.department_id),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("user {}", user.user_id)));
    }
    Ok(())
}

/// Replaces a user's password.
///
/// # Errors
///
/// Returns an error if hashing or the update fails.
pub fn update_password(
    conn: &mut SqliteConnection,
    user_id: i64,
    new_password: &str,
) -> Result<(), PersistenceError> {
    info!(user_id, "Updating password");

    let password_hash: String = hash_password(new_password)?;

    let updated: usize = diesel::update(users::table)
        .filter(users::user_id.eq(user_id))
        .set(users::password_hash.eq(&password_hash))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("user {user_id}")));
    }
    Ok(())
}

/// Deletes a user. Their reservations go with them.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the user does not exist.
pub fn delete_user(conn: &mut SqliteConnection, user_id: i64) -> Result<(), PersistenceError> {
    info!(user_id, "Deleting user");

    let deleted: usize = diesel::delete(users::table.filter(users::user_id.eq(user_id)))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("user {user_id}")));
    }
    Ok(())
}
