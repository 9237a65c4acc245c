// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Role carried by every user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Books spaces for their own classes.
    Teacher,
    /// Manages reservations on behalf of others and may head a department.
    Coordinator,
    /// Full authority, including approval and entity management.
    Administrator,
}

impl Role {
    /// All roles, in ascending order of authority.
    pub const ALL: [Self; 3] = [Self::Teacher, Self::Coordinator, Self::Administrator];

    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "Teacher",
            Self::Coordinator => "Coordinator",
            Self::Administrator => "Administrator",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidRole(s.to_string()))
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of bookable space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpaceType {
    Classroom,
    Laboratory,
    Auditorium,
}

impl SpaceType {
    pub const ALL: [Self; 3] = [Self::Classroom, Self::Laboratory, Self::Auditorium];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Classroom => "Classroom",
            Self::Laboratory => "Laboratory",
            Self::Auditorium => "Auditorium",
        }
    }
}

impl FromStr for SpaceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidSpaceType(s.to_string()))
    }
}

impl std::fmt::Display for SpaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of institutional department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartmentType {
    Academic,
    Administrative,
    Research,
    Support,
}

impl DepartmentType {
    pub const ALL: [Self; 4] = [
        Self::Academic,
        Self::Administrative,
        Self::Research,
        Self::Support,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Academic => "Academic",
            Self::Administrative => "Administrative",
            Self::Research => "Research",
            Self::Support => "Support",
        }
    }
}

impl FromStr for DepartmentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidDepartmentType(s.to_string()))
    }
}

impl std::fmt::Display for DepartmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ReservationState {
    /// Awaiting an administrator's decision. Every reservation starts here.
    #[default]
    Pending,
    /// Confirmed by an administrator.
    Approved,
    /// Declined by an administrator. Never blocks other reservations.
    Rejected,
}

impl ReservationState {
    pub const ALL: [Self; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    /// Converts this state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Checks if a review transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Rejected
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Returns whether a reservation in this state occupies its slot.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl FromStr for ReservationState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::InvalidReservationState(s.to_string()))
    }
}

impl std::fmt::Display for ReservationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user account. The credential hash never leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department_id: Option<i64>,
}

/// An institutional department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub department_id: i64,
    pub name: String,
    /// Unique short code, stored uppercase.
    pub code: String,
    pub department_type: DepartmentType,
    pub description: Option<String>,
    /// The heading coordinator, if any.
    pub head_user_id: Option<i64>,
}

/// A bookable room, lab or auditorium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub space_id: i64,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: u16,
    pub location: String,
    pub description: Option<String>,
    /// Unavailable spaces accept no new reservations.
    pub is_available: bool,
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub reservation_id: i64,
    pub user_id: i64,
    pub space_id: i64,
    pub date: Date,
    /// Canonical `HH:MM-HH:MM` form.
    pub time_range: String,
    pub state: ReservationState,
    pub description: Option<String>,
}

/// A reservation together with the names of its owner and space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationView {
    pub reservation: Reservation,
    pub user_name: String,
    pub user_email: String,
    pub space_name: String,
}

/// A reservation that has passed validation and awaits an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub user_id: i64,
    pub space_id: i64,
    pub date: Date,
    pub time_range: String,
    pub state: ReservationState,
    pub description: Option<String>,
}
