// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Enumerations travel as their names and dates as `YYYY-MM-DD` strings;
//! both are parsed at the API boundary so malformed values become
//! validation errors rather than deserialization failures.

use reserva::{Capabilities, Capability};
use serde::{Deserialize, Serialize};

// ============================================================================
// Authentication
// ============================================================================

/// API request to create the first administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The user's email, matched without regard to case.
    pub email: String,
    /// The user's password.
    pub password: String,
}

/// API response for a successful login or bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponse {
    /// The bearer token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token expiry, seconds since the epoch.
    pub expires_at: i64,
    /// The authenticated user.
    pub user: UserInfo,
}

/// API response describing the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponse {
    pub user: UserInfo,
    /// What the caller's role permits.
    pub capabilities: Capabilities,
}

/// API request to change one's own password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Generic acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Users
// ============================================================================

/// A user as exposed by the API. Never carries credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub user_id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub department_id: Option<i64>,
}

/// API request to create a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    /// `Teacher`, `Coordinator` or `Administrator`.
    pub role: String,
    #[serde(default)]
    pub department_id: Option<i64>,
}

/// API request to replace a user's profile.
///
/// Every field is overwritten; a missing `department_id` detaches the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub department_id: Option<i64>,
}

/// Query parameters for listing users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsersQuery {
    pub role: Option<String>,
    pub department_id: Option<i64>,
}

/// API response listing users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<UserInfo>,
}

// ============================================================================
// Departments
// ============================================================================

/// A department as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentInfo {
    pub department_id: i64,
    pub name: String,
    pub code: String,
    pub department_type: String,
    pub description: Option<String>,
    pub head_user_id: Option<i64>,
}

/// API request to create or replace a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentRequest {
    pub name: String,
    /// 2 to 10 letters or digits, stored uppercased.
    pub code: String,
    /// `Academic`, `Administrative`, `Research` or `Support`.
    pub department_type: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Must name a Coordinator who heads no other department.
    #[serde(default)]
    pub head_user_id: Option<i64>,
}

/// API response listing departments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListDepartmentsResponse {
    pub departments: Vec<DepartmentInfo>,
}

// ============================================================================
// Spaces
// ============================================================================

/// A space as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpaceInfo {
    pub space_id: i64,
    pub name: String,
    pub space_type: String,
    pub capacity: u16,
    pub location: String,
    pub description: Option<String>,
    pub is_available: bool,
}

/// API request to create or replace a space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRequest {
    pub name: String,
    /// `Classroom`, `Laboratory` or `Auditorium`.
    pub space_type: String,
    pub capacity: i64,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to available.
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Query parameters for listing spaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSpacesQuery {
    /// When true, only spaces open for booking are returned.
    #[serde(default)]
    pub available: Option<bool>,
}

/// API response listing spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSpacesResponse {
    pub spaces: Vec<SpaceInfo>,
}

/// Query parameters for probing a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub time_range: String,
}

/// The reservation that blocks a requested slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictInfo {
    pub reservation_id: i64,
    pub time_range: String,
    /// Name of the user holding the slot.
    pub reserved_by: String,
    pub state: String,
    pub message: String,
}

/// API response for a slot availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityResponse {
    pub space_id: i64,
    pub date: String,
    /// The canonical form of the requested range.
    pub time_range: String,
    pub available: bool,
    /// `free`, `unavailable` or `taken`.
    pub status: String,
    pub conflict: Option<ConflictInfo>,
}

// ============================================================================
// Reservations
// ============================================================================

/// What the caller may do with one reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReservationCapabilities {
    pub can_edit: Capability,
    pub can_delete: Capability,
    pub can_approve: Capability,
    pub can_reject: Capability,
}

/// A reservation joined with its owner and space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationInfo {
    pub reservation_id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub space_id: i64,
    pub space_name: String,
    pub date: String,
    pub time_range: String,
    pub state: String,
    pub description: Option<String>,
    pub capabilities: ReservationCapabilities,
}

/// API request to create a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    /// Defaults to the caller.
    #[serde(default)]
    pub user_id: Option<i64>,
    pub space_id: i64,
    pub date: String,
    /// `HH:MM-HH:MM`.
    pub time_range: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// API request to edit a reservation.
///
/// Absent fields keep their stored value; an empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    /// Must equal the id in the path.
    pub reservation_id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub space_id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time_range: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Query parameters for listing reservations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListReservationsQuery {
    /// Inclusive lower date bound.
    pub from: Option<String>,
    /// Inclusive upper date bound.
    pub to: Option<String>,
    pub space_id: Option<i64>,
    pub user_id: Option<i64>,
    pub state: Option<String>,
}

/// API response listing reservations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListReservationsResponse {
    pub reservations: Vec<ReservationInfo>,
}
