// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod department_tests;
mod space_tests;

use reserva_domain::{Role, SpaceType};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{NewSpace, NewUser, Persistence};

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

pub const TEST_PASSWORD: &str = "Correct-Horse-42";

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// A database file under the system temp directory, removed with its WAL
/// companions on drop. Each [`TempDatabase::open`] is a separate connection.
pub struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    pub fn create() -> Self {
        let id: u64 = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf =
            std::env::temp_dir().join(format!("reserva_test_{}_{id}.db", std::process::id()));
        Self { path }
    }

    pub fn open(&self) -> Persistence {
        Persistence::new_with_file(&self.path).expect("file database")
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub fn create_test_user(persistence: &mut Persistence, name: &str, role: Role) -> i64 {
    persistence
        .create_user(&NewUser {
            name: name.to_string(),
            email: format!("{}@school.edu", name.to_lowercase()),
            password: TEST_PASSWORD.to_string(),
            role,
            department_id: None,
        })
        .expect("user created")
}

pub fn create_test_space(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .create_space(&NewSpace {
            name: name.to_string(),
            space_type: SpaceType::Classroom,
            capacity: 30,
            location: String::from("Building 1"),
            description: None,
            is_available: true,
        })
        .expect("space created")
}
