// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation lifecycle operations.
//!
//! Every operation takes the acting [`Principal`] and, where dates matter,
//! the current date. Mutations run inside [`ReservationStore::atomically`]
//! so the conflict checks and the write they guard are one unit.
//!
//! State machine:
//!
//! ```text
//! Pending ──approve──▶ Approved
//!    │
//!    └────reject────▶ Rejected
//! ```

use reserva_domain::{
    DomainError, NewReservation, Reservation, ReservationState, ReservationView, Space,
    TimeRange, User, validate_description, validate_not_past,
};
use time::Date;
use tracing::{debug, info};

use crate::availability::{check_space_conflict, check_user_conflict};
use crate::capabilities::Capabilities;
use crate::error::CoreError;
use crate::principal::Principal;
use crate::store::{ReservationFilter, ReservationStore};

/// Input for creating a reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReservation {
    pub user_id: i64,
    pub space_id: i64,
    pub date: Date,
    pub time_range: String,
    pub description: Option<String>,
}

/// Input for editing a reservation. `None` leaves a field as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReservation {
    /// Must match the id the edit is addressed to.
    pub reservation_id: i64,
    pub user_id: Option<i64>,
    pub space_id: Option<i64>,
    pub date: Option<Date>,
    pub time_range: Option<String>,
    pub state: Option<ReservationState>,
    /// `Some("")` clears the description.
    pub description: Option<String>,
}

// ============================================================================
// Create
// ============================================================================

/// Creates a reservation in the `Pending` state.
///
/// # Arguments
///
/// * `store` - The reservation store
/// * `principal` - The acting user, who must be the owner
/// * `request` - The reservation to create
/// * `today` - The current date
///
/// # Errors
///
/// Returns an error if:
/// - The principal is not the requested owner
/// - The owner or space does not exist
/// - The space is unavailable
/// - The time range, date or description is invalid
/// - The space or the owner is already booked for an overlapping slot
pub fn create_reservation<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    request: &CreateReservation,
    today: Date,
) -> Result<ReservationView, CoreError> {
    if !principal.is(request.user_id) {
        return Err(CoreError::Forbidden(String::from(
            "Reservations can only be created for yourself",
        )));
    }

    store.atomically(|store| {
        require_eligible_user(store, request.user_id)?;
        require_available_space(store, request.space_id)?;

        let range: TimeRange = parse_range(&request.time_range)?;
        validate_not_past(request.date, today)?;
        let description: Option<String> = validate_description(request.description.as_deref())?;

        if let Some(conflict) =
            check_space_conflict(store, request.space_id, request.date, &range, None)?
        {
            return Err(conflict.into());
        }
        if let Some(conflict) =
            check_user_conflict(store, request.user_id, request.date, &range, None)?
        {
            return Err(conflict.into());
        }

        let reservation_id: i64 = store.insert_reservation(&NewReservation {
            user_id: request.user_id,
            space_id: request.space_id,
            date: request.date,
            time_range: range.to_string(),
            state: ReservationState::Pending,
            description,
        })?;

        info!(
            reservation_id,
            user_id = request.user_id,
            space_id = request.space_id,
            date = %request.date,
            time_range = %range,
            "Created reservation"
        );

        require_reservation(store, reservation_id)
    })
}

// ============================================================================
// Update
// ============================================================================

/// Edits a reservation.
///
/// Teachers may edit only their own reservations and never change the
/// owner; a requested owner change is ignored. Only roles that may set the
/// state directly have `request.state` applied. Checks run only for the
/// fields whose value actually changes. When a role without that power
/// moves an approved reservation to another space, date or time, the
/// reservation returns to `Pending`. Bringing a rejected reservation back
/// to an active state re-runs both conflict checks.
///
/// # Errors
///
/// Returns an error if:
/// - `path_id` differs from `request.reservation_id`
/// - The reservation, new owner or space does not exist
/// - The principal may not edit this reservation
/// - A changed field fails validation
/// - The edited slot collides with another reservation
#[allow(clippy::too_many_lines)]
pub fn update_reservation<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    path_id: i64,
    request: &UpdateReservation,
    today: Date,
) -> Result<ReservationView, CoreError> {
    if path_id != request.reservation_id {
        return Err(CoreError::Validation(format!(
            "Reservation id {} in the body does not match id {path_id} in the path",
            request.reservation_id
        )));
    }

    let capabilities: &Capabilities = principal.capabilities();

    store.atomically(|store| {
        let current: Reservation = require_reservation(store, path_id)?.reservation;

        if !capabilities.can_edit_any_reservation.is_allowed() && !principal.is(current.user_id)
        {
            return Err(CoreError::Forbidden(String::from(
                "You can only edit your own reservations",
            )));
        }

        let user_id: i64 = if capabilities.can_reassign_owner.is_allowed() {
            request.user_id.unwrap_or(current.user_id)
        } else {
            current.user_id
        };
        let space_id: i64 = request.space_id.unwrap_or(current.space_id);
        let date: Date = request.date.unwrap_or(current.date);

        let time_range: String = match request.time_range.as_deref() {
            Some(text) if text != current.time_range => parse_range(text)?.to_string(),
            _ => current.time_range.clone(),
        };

        let owner_changed: bool = user_id != current.user_id;
        let space_changed: bool = space_id != current.space_id;
        let date_changed: bool = date != current.date;
        let time_changed: bool = time_range != current.time_range;
        let slot_changed: bool = space_changed || date_changed || time_changed;

        if owner_changed {
            require_eligible_user(store, user_id)?;
        }
        if slot_changed {
            require_available_space(store, space_id)?;
        }
        if date_changed {
            validate_not_past(date, today)?;
        }

        let description: Option<String> = match request.description.as_deref() {
            Some(text) => validate_description(Some(text))?,
            None => current.description.clone(),
        };

        let state: ReservationState = if capabilities.can_set_state.is_allowed() {
            request.state.unwrap_or(current.state)
        } else if current.state == ReservationState::Approved && slot_changed {
            ReservationState::Pending
        } else {
            current.state
        };

        // A rejected reservation held no slot, so bringing it back must
        // clear both rules as if it were new.
        let reactivated: bool = !current.state.is_active() && state.is_active();

        if state.is_active() && (slot_changed || owner_changed || reactivated) {
            let range: TimeRange = TimeRange::parse_lenient(&time_range)
                .map_err(|e| CoreError::Store(format!("Stored time range is unreadable: {e}")))?;

            if (slot_changed || reactivated)
                && let Some(conflict) =
                    check_space_conflict(store, space_id, date, &range, Some(path_id))?
            {
                return Err(conflict.into());
            }
            if (owner_changed || date_changed || time_changed || reactivated)
                && let Some(conflict) =
                    check_user_conflict(store, user_id, date, &range, Some(path_id))?
            {
                return Err(conflict.into());
            }
        }

        let updated: Reservation = Reservation {
            reservation_id: path_id,
            user_id,
            space_id,
            date,
            time_range,
            state,
            description,
        };
        store.update_reservation(&updated)?;

        info!(
            reservation_id = path_id,
            actor = principal.user_id(),
            from_state = %current.state,
            to_state = %state,
            "Updated reservation"
        );

        require_reservation(store, path_id)
    })
}

// ============================================================================
// Review
// ============================================================================

/// Approves a pending reservation.
///
/// # Errors
///
/// Returns `Forbidden` unless the principal may review reservations,
/// `NotFound` for an unknown reservation, and `Conflict` unless it is
/// `Pending`.
pub fn approve_reservation<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    reservation_id: i64,
) -> Result<ReservationView, CoreError> {
    review(store, principal, reservation_id, ReservationState::Approved)
}

/// Rejects a pending reservation.
///
/// # Errors
///
/// Returns `Forbidden` unless the principal may review reservations,
/// `NotFound` for an unknown reservation, and `Conflict` unless it is
/// `Pending`.
pub fn reject_reservation<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    reservation_id: i64,
) -> Result<ReservationView, CoreError> {
    review(store, principal, reservation_id, ReservationState::Rejected)
}

fn review<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    reservation_id: i64,
    target: ReservationState,
) -> Result<ReservationView, CoreError> {
    if !principal.capabilities().can_review.is_allowed() {
        return Err(CoreError::Forbidden(String::from(
            "Only administrators can approve or reject reservations",
        )));
    }

    store.atomically(|store| {
        let mut reservation: Reservation = require_reservation(store, reservation_id)?.reservation;

        if !reservation.state.can_transition_to(target) {
            return Err(CoreError::Conflict(format!(
                "Reservation {reservation_id} is already {}",
                reservation.state
            )));
        }

        reservation.state = target;
        store.update_reservation(&reservation)?;

        info!(reservation_id, state = %target, actor = principal.user_id(), "Reviewed reservation");

        require_reservation(store, reservation_id)
    })
}

// ============================================================================
// Delete
// ============================================================================

/// Deletes a reservation.
///
/// # Errors
///
/// Returns `NotFound` for an unknown reservation, and `Forbidden` if:
/// - A Teacher targets someone else's reservation
/// - The reservation is approved and the principal may not delete approved
///   reservations
/// - The reservation is approved, dated before `today`, and the principal
///   may not delete past approved reservations
pub fn delete_reservation<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    reservation_id: i64,
    today: Date,
) -> Result<(), CoreError> {
    let capabilities: &Capabilities = principal.capabilities();

    store.atomically(|store| {
        let reservation: Reservation = require_reservation(store, reservation_id)?.reservation;

        if !capabilities.can_delete_any_reservation.is_allowed()
            && !principal.is(reservation.user_id)
        {
            return Err(CoreError::Forbidden(String::from(
                "You can only delete your own reservations",
            )));
        }

        if reservation.state == ReservationState::Approved {
            if !capabilities.can_delete_approved.is_allowed() {
                return Err(CoreError::Forbidden(String::from(
                    "Approved reservations can only be deleted by a coordinator or administrator",
                )));
            }
            if reservation.date < today && !capabilities.can_delete_past_approved.is_allowed() {
                return Err(CoreError::Forbidden(String::from(
                    "Past approved reservations can only be deleted by an administrator",
                )));
            }
        }

        store.delete_reservation(reservation_id)?;
        info!(reservation_id, actor = principal.user_id(), "Deleted reservation");
        Ok(())
    })
}

// ============================================================================
// Read
// ============================================================================

/// Fetches one reservation.
///
/// # Errors
///
/// Returns `NotFound` for an unknown reservation and `Forbidden` if the
/// principal may only see their own reservations and this is not one.
pub fn get_reservation<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    reservation_id: i64,
) -> Result<ReservationView, CoreError> {
    let view: ReservationView = require_reservation(store, reservation_id)?;

    if !principal.capabilities().can_view_all_reservations.is_allowed()
        && !principal.is(view.reservation.user_id)
    {
        return Err(CoreError::Forbidden(String::from(
            "You can only view your own reservations",
        )));
    }

    Ok(view)
}

/// Lists reservations visible to the principal.
///
/// Principals who may not see every reservation get their own only,
/// whatever owner the filter names.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_reservations<S: ReservationStore>(
    store: &mut S,
    principal: &Principal,
    filter: &ReservationFilter,
) -> Result<Vec<ReservationView>, CoreError> {
    let mut scoped: ReservationFilter = filter.clone();
    if !principal.capabilities().can_view_all_reservations.is_allowed() {
        scoped.user_id = Some(principal.user_id());
    }

    let views: Vec<ReservationView> = store.list_reservations(&scoped)?;
    debug!(count = views.len(), actor = principal.user_id(), "Listed reservations");
    Ok(views)
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_range(text: &str) -> Result<TimeRange, CoreError> {
    TimeRange::parse(text).map_err(|e| CoreError::DomainViolation(DomainError::from(e)))
}

fn require_reservation<S: ReservationStore>(
    store: &mut S,
    reservation_id: i64,
) -> Result<ReservationView, CoreError> {
    store
        .find_reservation(reservation_id)?
        .ok_or(CoreError::NotFound {
            resource: "Reservation",
            id: reservation_id,
        })
}

fn require_eligible_user<S: ReservationStore>(
    store: &mut S,
    user_id: i64,
) -> Result<User, CoreError> {
    let user: User = store.find_user(user_id)?.ok_or(CoreError::NotFound {
        resource: "User",
        id: user_id,
    })?;

    if !Capabilities::for_role(user.role)
        .can_hold_reservations
        .is_allowed()
    {
        return Err(CoreError::Validation(format!(
            "Users with role {} cannot hold reservations",
            user.role
        )));
    }

    Ok(user)
}

fn require_available_space<S: ReservationStore>(
    store: &mut S,
    space_id: i64,
) -> Result<Space, CoreError> {
    let space: Space = store.find_space(space_id)?.ok_or(CoreError::NotFound {
        resource: "Space",
        id: space_id,
    })?;

    if !space.is_available {
        return Err(CoreError::Validation(format!(
            "Space '{}' is not available for reservations",
            space.name
        )));
    }

    Ok(space)
}
