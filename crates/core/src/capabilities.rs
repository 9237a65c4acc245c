// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The role capability table.
//!
//! Every permission decision in the engine reads a flag from
//! [`Capabilities`]. The table is computed once from a [`Role`] and carried
//! by the [`Principal`](crate::Principal), so role names are never compared
//! anywhere else.

use reserva_domain::Role;

/// Whether an action is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl serde::Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

/// What a role may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Capabilities {
    /// Create reservations for oneself (and be the owner of one).
    pub can_hold_reservations: Capability,
    /// Edit reservations owned by someone else.
    pub can_edit_any_reservation: Capability,
    /// Move a reservation to a different owner.
    pub can_reassign_owner: Capability,
    /// Assign a reservation state directly during an edit.
    pub can_set_state: Capability,
    /// Approve or reject pending reservations.
    pub can_review: Capability,
    /// Delete reservations owned by someone else.
    pub can_delete_any_reservation: Capability,
    /// Delete approved reservations.
    pub can_delete_approved: Capability,
    /// Delete approved reservations dated in the past.
    pub can_delete_past_approved: Capability,
    /// See every reservation rather than only one's own.
    pub can_view_all_reservations: Capability,
    /// List and inspect user accounts.
    pub can_view_users: Capability,
    /// Create, edit and delete user accounts.
    pub can_manage_users: Capability,
    /// Create, edit and delete spaces.
    pub can_manage_spaces: Capability,
    /// Create, edit and delete departments.
    pub can_manage_departments: Capability,
}

impl Capabilities {
    /// Builds the capability table for a role.
    #[must_use]
    pub const fn for_role(role: Role) -> Self {
        match role {
            Role::Teacher => Self {
                can_hold_reservations: Capability::Allowed,
                can_edit_any_reservation: Capability::Denied,
                can_reassign_owner: Capability::Denied,
                can_set_state: Capability::Denied,
                can_review: Capability::Denied,
                can_delete_any_reservation: Capability::Denied,
                can_delete_approved: Capability::Denied,
                can_delete_past_approved: Capability::Denied,
                can_view_all_reservations: Capability::Denied,
                can_view_users: Capability::Denied,
                can_manage_users: Capability::Denied,
                can_manage_spaces: Capability::Denied,
                can_manage_departments: Capability::Denied,
            },
            Role::Coordinator => Self {
                can_hold_reservations: Capability::Allowed,
                can_edit_any_reservation: Capability::Allowed,
                can_reassign_owner: Capability::Allowed,
                can_set_state: Capability::Denied,
                can_review: Capability::Denied,
                can_delete_any_reservation: Capability::Allowed,
                can_delete_approved: Capability::Allowed,
                can_delete_past_approved: Capability::Denied,
                can_view_all_reservations: Capability::Allowed,
                can_view_users: Capability::Allowed,
                can_manage_users: Capability::Denied,
                can_manage_spaces: Capability::Denied,
                can_manage_departments: Capability::Denied,
            },
            Role::Administrator => Self {
                can_hold_reservations: Capability::Allowed,
                can_edit_any_reservation: Capability::Allowed,
                can_reassign_owner: Capability::Allowed,
                can_set_state: Capability::Allowed,
                can_review: Capability::Allowed,
                can_delete_any_reservation: Capability::Allowed,
                can_delete_approved: Capability::Allowed,
                can_delete_past_approved: Capability::Allowed,
                can_view_all_reservations: Capability::Allowed,
                can_view_users: Capability::Allowed,
                can_manage_users: Capability::Allowed,
                can_manage_spaces: Capability::Allowed,
                can_manage_departments: Capability::Allowed,
            },
        }
    }
}
