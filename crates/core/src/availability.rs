// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double-booking detection.
//!
//! A space may not hold two overlapping active reservations on one date,
//! and neither may a user. Rejected reservations never count.

use reserva_domain::{
    DomainError, ReservationState, ReservationView, Space, TimeRange, validate_not_past,
};
use time::Date;
use tracing::debug;

use crate::error::CoreError;
use crate::store::ReservationStore;

/// Which non-overlap rule a conflict breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// The space is already booked.
    Space,
    /// The user is already booked elsewhere.
    User,
}

/// An existing reservation that blocks a candidate slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub reservation_id: i64,
    pub time_range: String,
    /// The owner's name for space conflicts, the space's name for user
    /// conflicts.
    pub counterpart: String,
    pub state: ReservationState,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ConflictKind::Space => write!(
                f,
                "Space is already reserved from {} by {} ({})",
                self.time_range, self.counterpart, self.state
            ),
            ConflictKind::User => write!(
                f,
                "User already has a reservation from {} in {} ({})",
                self.time_range, self.counterpart, self.state
            ),
        }
    }
}

/// Result of probing a slot without booking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    /// A reservation for this slot would not collide with anything.
    Free,
    /// The space is flagged unavailable.
    SpaceUnavailable,
    /// An existing reservation holds an overlapping slot.
    Taken(Conflict),
}

/// Finds the first active reservation of a space overlapping `range`.
///
/// # Arguments
///
/// * `store` - The reservation store
/// * `space_id` - The space to check
/// * `date` - The day to check
/// * `range` - The candidate time range
/// * `exclude` - A reservation to ignore, used when editing it
///
/// # Errors
///
/// Returns an error if the store fails or holds an unreadable time range.
pub fn check_space_conflict<S: ReservationStore>(
    store: &mut S,
    space_id: i64,
    date: Date,
    range: &TimeRange,
    exclude: Option<i64>,
) -> Result<Option<Conflict>, CoreError> {
    let existing: Vec<ReservationView> = store.reservations_for_space_on(space_id, date)?;
    debug!(space_id, %date, count = existing.len(), "Scanning space reservations");

    Ok(first_overlap(&existing, range, exclude)?.map(|view| Conflict {
        kind: ConflictKind::Space,
        reservation_id: view.reservation.reservation_id,
        time_range: view.reservation.time_range.clone(),
        counterpart: view.user_name.clone(),
        state: view.reservation.state,
    }))
}

/// Finds the first active reservation of a user overlapping `range`.
///
/// # Errors
///
/// Returns an error if the store fails or holds an unreadable time range.
pub fn check_user_conflict<S: ReservationStore>(
    store: &mut S,
    user_id: i64,
    date: Date,
    range: &TimeRange,
    exclude: Option<i64>,
) -> Result<Option<Conflict>, CoreError> {
    let existing: Vec<ReservationView> = store.reservations_for_user_on(user_id, date)?;
    debug!(user_id, %date, count = existing.len(), "Scanning user reservations");

    Ok(first_overlap(&existing, range, exclude)?.map(|view| Conflict {
        kind: ConflictKind::User,
        reservation_id: view.reservation.reservation_id,
        time_range: view.reservation.time_range.clone(),
        counterpart: view.space_name.clone(),
        state: view.reservation.state,
    }))
}

/// Reports whether a space could take a new reservation for a slot.
///
/// Runs the same checks a create would run against the space, without
/// touching the store.
///
/// # Errors
///
/// Returns `CoreError::NotFound` for an unknown space, and a domain
/// violation for a bad time range or a past date.
pub fn check_availability<S: ReservationStore>(
    store: &mut S,
    space_id: i64,
    date: Date,
    time_range: &str,
    today: Date,
) -> Result<SlotStatus, CoreError> {
    let space: Space = store.find_space(space_id)?.ok_or(CoreError::NotFound {
        resource: "Space",
        id: space_id,
    })?;

    let range: TimeRange = TimeRange::parse(time_range).map_err(DomainError::from)?;
    validate_not_past(date, today)?;

    if !space.is_available {
        return Ok(SlotStatus::SpaceUnavailable);
    }

    Ok(check_space_conflict(store, space_id, date, &range, None)?
        .map_or(SlotStatus::Free, SlotStatus::Taken))
}

fn first_overlap<'a>(
    existing: &'a [ReservationView],
    range: &TimeRange,
    exclude: Option<i64>,
) -> Result<Option<&'a ReservationView>, CoreError> {
    for view in existing {
        let reservation = &view.reservation;
        if !reservation.state.is_active() || Some(reservation.reservation_id) == exclude {
            continue;
        }

        let stored: TimeRange = TimeRange::parse_lenient(&reservation.time_range).map_err(|e| {
            CoreError::Store(format!(
                "Reservation {} has an unreadable time range: {e}",
                reservation.reservation_id
            ))
        })?;

        if stored.overlaps(range) {
            return Ok(Some(view));
        }
    }
    Ok(None)
}
