// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use reserva_domain::Role;

use crate::capabilities::Capabilities;

/// The authenticated caller of a lifecycle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    user_id: i64,
    role: Role,
    capabilities: Capabilities,
}

impl Principal {
    /// Creates a principal and resolves its capabilities.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self {
            user_id,
            role,
            capabilities: Capabilities::for_role(role),
        }
    }

    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.user_id
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Returns whether this principal is the given user.
    #[must_use]
    pub const fn is(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}
