// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use reserva_domain::{Role, SpaceType};
use reserva_persistence::{NewSpace, NewUser, Persistence};
use time::macros::date;
use time::{Date, Duration};

use crate::{AuthenticatedUser, TokenService};

/// A password that satisfies the default policy.
pub const PASSWORD: &str = "Correct-Horse-42";

/// The date every reservation test treats as today.
pub const TODAY: Date = date!(2026 - 03 - 10);

/// A date two days after `TODAY`.
pub const DAY: Date = date!(2026 - 03 - 12);

pub fn new_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn token_service() -> TokenService {
    TokenService::new(b"api-test-secret", Duration::hours(8))
}

/// Stores a user with `PASSWORD` and returns them as an authenticated caller.
pub fn seed_user(persistence: &mut Persistence, name: &str, role: Role) -> AuthenticatedUser {
    let email: String = format!("{}@school.edu", name.to_lowercase());
    let user_id: i64 = persistence
        .create_user(&NewUser {
            name: name.to_string(),
            email: email.clone(),
            password: PASSWORD.to_string(),
            role,
            department_id: None,
        })
        .expect("user created");
    AuthenticatedUser::new(user_id, email, role)
}

pub fn seed_space(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .create_space(&NewSpace {
            name: name.to_string(),
            space_type: SpaceType::Classroom,
            capacity: 25,
            location: String::from("North wing"),
            description: None,
            is_available: true,
        })
        .expect("space created")
}
