// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Space management and availability handlers.

use reserva::{SlotStatus, check_availability};
use reserva_domain::{
    Space, SpaceType, TimeRange, format_date, parse_date, validate_capacity, validate_description,
    validate_name,
};
use reserva_persistence::{NewSpace, Persistence, PersistenceError};
use time::Date;
use tracing::{debug, info};

use super::{parse_enum, space_info};
use crate::auth::{AuthenticatedUser, AuthorizationService};
use crate::error::ApiError;
use crate::request_response::{
    AvailabilityQuery, AvailabilityResponse, ConflictInfo, ListSpacesQuery, ListSpacesResponse,
    MessageResponse, SpaceInfo, SpaceRequest,
};

/// A space request after field validation.
struct ValidSpace {
    name: String,
    space_type: SpaceType,
    capacity: u16,
    location: String,
    description: Option<String>,
    is_available: bool,
}

fn validate(request: &SpaceRequest) -> Result<ValidSpace, ApiError> {
    Ok(ValidSpace {
        name: validate_name("name", &request.name)?,
        space_type: parse_enum(&request.space_type)?,
        capacity: validate_capacity(request.capacity)?,
        location: validate_name("location", &request.location)?,
        description: validate_description(request.description.as_deref())?,
        is_available: request.is_available.unwrap_or(true),
    })
}

fn name_taken(err: PersistenceError, name: &str) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(_) => ApiError::conflict(
            "unique_space_name",
            format!("A space named '{name}' already exists"),
        ),
        other => other.into(),
    }
}

fn ensure_no_active_reservations(
    persistence: &mut Persistence,
    space: &Space,
    action: &str,
) -> Result<(), ApiError> {
    let active: i64 = persistence.count_active_reservations_for_space(space.space_id)?;
    if active > 0 {
        return Err(ApiError::conflict(
            "space_has_active_reservations",
            format!(
                "Cannot {action} space '{}': it has {active} pending or approved reservation(s)",
                space.name
            ),
        ));
    }
    Ok(())
}

/// Lists spaces.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_spaces(
    persistence: &mut Persistence,
    query: &ListSpacesQuery,
) -> Result<ListSpacesResponse, ApiError> {
    let spaces: Vec<Space> = persistence.list_spaces(query.available.unwrap_or(false))?;
    debug!(count = spaces.len(), "Listed spaces");
    Ok(ListSpacesResponse {
        spaces: spaces.into_iter().map(space_info).collect(),
    })
}

/// Fetches one space.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the space does not exist.
pub fn get_space(persistence: &mut Persistence, space_id: i64) -> Result<SpaceInfo, ApiError> {
    persistence
        .get_space(space_id)?
        .map(space_info)
        .ok_or_else(|| ApiError::not_found("Space", space_id))
}

/// Creates a space.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, a field is
/// invalid, or the name is taken.
pub fn create_space(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    request: &SpaceRequest,
) -> Result<SpaceInfo, ApiError> {
    AuthorizationService::authorize_manage_spaces(actor)?;
    let valid: ValidSpace = validate(request)?;

    let space_id: i64 = persistence
        .create_space(&NewSpace {
            name: valid.name.clone(),
            space_type: valid.space_type,
            capacity: valid.capacity,
            location: valid.location,
            description: valid.description,
            is_available: valid.is_available,
        })
        .map_err(|e| name_taken(e, &valid.name))?;

    info!(space_id, name = %valid.name, actor = actor.id, "Created space");
    get_space(persistence, space_id)
}

/// Replaces a space.
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an Administrator
/// - The space does not exist
/// - A field is invalid or the name is taken
/// - The space would become unavailable while it has active reservations
pub fn update_space(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    space_id: i64,
    request: &SpaceRequest,
) -> Result<SpaceInfo, ApiError> {
    AuthorizationService::authorize_manage_spaces(actor)?;
    let valid: ValidSpace = validate(request)?;

    let space: Space = persistence.immediate_transaction(|p| -> Result<Space, ApiError> {
        let current: Space = p
            .get_space(space_id)?
            .ok_or_else(|| ApiError::not_found("Space", space_id))?;

        if current.is_available && !valid.is_available {
            ensure_no_active_reservations(p, &current, "close")?;
        }

        let space: Space = Space {
            space_id,
            name: valid.name,
            space_type: valid.space_type,
            capacity: valid.capacity,
            location: valid.location,
            description: valid.description,
            is_available: valid.is_available,
        };
        p.update_space(&space).map_err(|e| name_taken(e, &space.name))?;
        Ok(space)
    })?;

    info!(space_id, available = space.is_available, actor = actor.id, "Updated space");
    Ok(space_info(space))
}

/// Deletes a space.
///
/// # Errors
///
/// Returns an error if the actor is not an Administrator, the space does
/// not exist, or it has active reservations.
pub fn delete_space(
    persistence: &mut Persistence,
    actor: &AuthenticatedUser,
    space_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize_manage_spaces(actor)?;

    persistence.immediate_transaction(|p| -> Result<(), ApiError> {
        let space: Space = p
            .get_space(space_id)?
            .ok_or_else(|| ApiError::not_found("Space", space_id))?;
        ensure_no_active_reservations(p, &space, "delete")?;
        p.delete_space(space_id)?;
        Ok(())
    })?;

    info!(space_id, actor = actor.id, "Deleted space");
    Ok(MessageResponse {
        message: format!("Space {space_id} deleted"),
    })
}

/// Checks whether a slot in a space could be reserved.
///
/// Nothing is written. The answer is advisory: another request may take
/// the slot before a reservation is created.
///
/// # Errors
///
/// Returns an error if the space does not exist, the date or time range
/// is invalid, or the date is in the past.
pub fn get_availability(
    persistence: &mut Persistence,
    space_id: i64,
    query: &AvailabilityQuery,
    today: Date,
) -> Result<AvailabilityResponse, ApiError> {
    let date: Date = parse_date(&query.date)?;
    let status: SlotStatus =
        check_availability(persistence, space_id, date, &query.time_range, today)?;

    // check_availability has already validated the range
    let canonical: String = TimeRange::parse(&query.time_range)
        .map_or_else(|_| query.time_range.clone(), |range| range.to_string());

    let (available, label, conflict) = match status {
        SlotStatus::Free => (true, "free", None),
        SlotStatus::SpaceUnavailable => (false, "unavailable", None),
        SlotStatus::Taken(conflict) => (
            false,
            "taken",
            Some(ConflictInfo {
                reservation_id: conflict.reservation_id,
                message: conflict.to_string(),
                time_range: conflict.time_range,
                reserved_by: conflict.counterpart,
                state: conflict.state.as_str().to_string(),
            }),
        ),
    };

    debug!(space_id, date = %query.date, status = label, "Checked availability");
    Ok(AvailabilityResponse {
        space_id,
        date: format_date(date),
        time_range: canonical,
        available,
        status: label.to_string(),
        conflict,
    })
}
