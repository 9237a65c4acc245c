// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what a caller may do with a particular reservation.
//! They are advisory only and do not replace the lifecycle manager's
//! checks.

use reserva::{Capabilities, Capability, Principal};
use reserva_domain::{Reservation, ReservationState};
use time::Date;

use crate::request_response::ReservationCapabilities;

/// Computes what `principal` may do with `reservation` on `today`.
#[must_use]
pub fn compute_reservation_capabilities(
    principal: &Principal,
    reservation: &Reservation,
    today: Date,
) -> ReservationCapabilities {
    let table: &Capabilities = principal.capabilities();
    let owns: bool = principal.is(reservation.user_id);

    let can_edit: bool = owns || table.can_edit_any_reservation.is_allowed();

    let can_delete: bool = (owns || table.can_delete_any_reservation.is_allowed())
        && match reservation.state {
            ReservationState::Approved if reservation.date < today => {
                table.can_delete_past_approved.is_allowed()
            }
            ReservationState::Approved => table.can_delete_approved.is_allowed(),
            ReservationState::Pending | ReservationState::Rejected => true,
        };

    let can_review: bool =
        table.can_review.is_allowed() && reservation.state == ReservationState::Pending;

    ReservationCapabilities {
        can_edit: Capability::from_bool(can_edit),
        can_delete: Capability::from_bool(can_delete),
        can_approve: Capability::from_bool(can_review),
        can_reject: Capability::from_bool(can_review),
    }
}
