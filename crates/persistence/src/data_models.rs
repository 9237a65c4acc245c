// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_domain::{DepartmentType, Role, SpaceType, User};

/// A user account to create. The password is hashed before it is stored.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub department_id: Option<i64>,
}

/// A user together with the stored bcrypt hash, used only for login.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// A department to create.
#[derive(Debug, Clone)]
pub struct NewDepartment {
    pub name: String,
    pub code: String,
    pub department_type: DepartmentType,
    pub description: Option<String>,
    pub head_user_id: Option<i64>,
}

/// A space to create.
#[derive(Debug, Clone)]
pub struct NewSpace {
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: u16,
    pub location: String,
    pub description: Option<String>,
    pub is_available: bool,
}
