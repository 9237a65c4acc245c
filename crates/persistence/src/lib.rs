// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Reserva system.
//!
//! This crate stores users, departments, spaces and reservations in
//! `SQLite` through Diesel. Migrations are embedded and applied when a
//! database is opened.
//!
//! ## Storage conventions
//!
//! - Enumerations are stored as their names (`'Teacher'`, `'Pending'`, ...)
//! - Dates are stored as ISO `YYYY-MM-DD` text
//! - Time ranges are stored in canonical `HH:MM-HH:MM` form
//! - Emails and space names are unique regardless of case
//!
//! ## Transactions
//!
//! [`Persistence::immediate_transaction`] opens a `BEGIN IMMEDIATE`
//! transaction, so a conflict check and the write it guards cannot
//! interleave with another writer. The reservation engine reaches it
//! through [`reserva::ReservationStore::atomically`].
//!
//! ## Testing
//!
//! Every call to [`Persistence::new_in_memory`] opens its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use reserva_domain::{Department, Role, Space, User};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::{NewDepartment, NewSpace, NewUser, UserCredentials};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:reserva_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Runs `operation` inside a `BEGIN IMMEDIATE` transaction.
    ///
    /// The transaction commits if `operation` succeeds and rolls back
    /// otherwise. A panic inside `operation` also rolls back before the
    /// panic continues, so the connection is never left mid-transaction.
    /// Transactions do not nest.
    ///
    /// # Errors
    ///
    /// Returns the error from `operation`, or a persistence error if the
    /// transaction cannot be opened or committed.
    pub fn immediate_transaction<T, E, F>(&mut self, operation: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<PersistenceError>,
    {
        backend::sqlite::begin_immediate(&mut self.conn)?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| operation(&mut *self)));

        match outcome {
            Ok(Ok(value)) => {
                backend::sqlite::commit(&mut self.conn)?;
                Ok(value)
            }
            Ok(Err(err)) => {
                backend::sqlite::rollback(&mut self.conn);
                Err(err)
            }
            Err(payload) => {
                backend::sqlite::rollback(&mut self.conn);
                panic::resume_unwind(payload)
            }
        }
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates a user, hashing the password with bcrypt.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the email is taken.
    pub fn create_user(&mut self, user: &NewUser) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, user)
    }

    /// Retrieves a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        queries::users::get_user(&mut self.conn, user_id)
    }

    /// Retrieves a user and their password hash by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_credentials_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserCredentials>, PersistenceError> {
        queries::users::get_credentials_by_email(&mut self.conn, email)
    }

    /// Lists users, optionally narrowed by role and department.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_users(
        &mut self,
        role: Option<Role>,
        department_id: Option<i64>,
    ) -> Result<Vec<User>, PersistenceError> {
        queries::users::list_users(&mut self.conn, role, department_id)
    }

    /// Counts users holding a role.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_users_with_role(&mut self, role: Role) -> Result<i64, PersistenceError> {
        queries::users::count_users_with_role(&mut self.conn, role)
    }

    /// Overwrites a user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the email is taken.
    pub fn update_user(&mut self, user: &User) -> Result<(), PersistenceError> {
        mutations::users::update_user(&mut self.conn, user)
    }

    /// Deletes a user and their reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist.
    pub fn delete_user(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::users::delete_user(&mut self.conn, user_id)
    }

    /// Checks a user's password.
    ///
    /// Returns `Ok(false)` for an unknown user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored hash is malformed.
    pub fn verify_user_password(
        &mut self,
        user_id: i64,
        password: &str,
    ) -> Result<bool, PersistenceError> {
        match queries::users::get_password_hash(&mut self.conn, user_id)? {
            Some(hash) => queries::users::verify_password(password, &hash),
            None => Ok(false),
        }
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash is malformed.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the update fails.
    pub fn update_password(
        &mut self,
        user_id: i64,
        new_password: &str,
    ) -> Result<(), PersistenceError> {
        mutations::users::update_password(&mut self.conn, user_id, new_password)
    }

    // ========================================================================
    // Departments
    // ========================================================================

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the code is taken or the
    /// head already leads another department.
    pub fn create_department(
        &mut self,
        department: &NewDepartment,
    ) -> Result<i64, PersistenceError> {
        mutations::departments::create_department(&mut self.conn, department)
    }

    /// Retrieves a department by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_department(
        &mut self,
        department_id: i64,
    ) -> Result<Option<Department>, PersistenceError> {
        queries::departments::get_department(&mut self.conn, department_id)
    }

    /// Lists all departments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_departments(&mut self) -> Result<Vec<Department>, PersistenceError> {
        queries::departments::list_departments(&mut self.conn)
    }

    /// Finds the department a user heads.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_department_headed_by(
        &mut self,
        user_id: i64,
    ) -> Result<Option<Department>, PersistenceError> {
        queries::departments::find_department_headed_by(&mut self.conn, user_id)
    }

    /// Overwrites a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department does not exist or a unique column
    /// clashes.
    pub fn update_department(&mut self, department: &Department) -> Result<(), PersistenceError> {
        mutations::departments::update_department(&mut self.conn, department)
    }

    /// Deletes a department.
    ///
    /// # Errors
    ///
    /// Returns an error if the department does not exist.
    pub fn delete_department(&mut self, department_id: i64) -> Result<(), PersistenceError> {
        mutations::departments::delete_department(&mut self.conn, department_id)
    }

    // ========================================================================
    // Spaces
    // ========================================================================

    /// Creates a space.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the name is taken.
    pub fn create_space(&mut self, space: &NewSpace) -> Result<i64, PersistenceError> {
        mutations::spaces::create_space(&mut self.conn, space)
    }

    /// Retrieves a space by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_space(&mut self, space_id: i64) -> Result<Option<Space>, PersistenceError> {
        queries::spaces::get_space(&mut self.conn, space_id)
    }

    /// Lists spaces, optionally only those open for booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_spaces(&mut self, available_only: bool) -> Result<Vec<Space>, PersistenceError> {
        queries::spaces::list_spaces(&mut self.conn, available_only)
    }

    /// Counts Pending and Approved reservations of a space.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_active_reservations_for_space(
        &mut self,
        space_id: i64,
    ) -> Result<i64, PersistenceError> {
        queries::spaces::count_active_reservations(&mut self.conn, space_id)
    }

    /// Overwrites a space.
    ///
    /// # Errors
    ///
    /// Returns an error if the space does not exist or the name is taken.
    pub fn update_space(&mut self, space: &Space) -> Result<(), PersistenceError> {
        mutations::spaces::update_space(&mut self.conn, space)
    }

    /// Deletes a space.
    ///
    /// # Errors
    ///
    /// Returns an error if the space does not exist.
    pub fn delete_space(&mut self, space_id: i64) -> Result<(), PersistenceError> {
        mutations::spaces::delete_space(&mut self.conn, space_id)
    }
}
