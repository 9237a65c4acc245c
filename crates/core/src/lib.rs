// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod capabilities;
mod error;
mod lifecycle;
mod principal;
mod store;

#[cfg(test)]
mod tests;

pub use availability::{
    Conflict, ConflictKind, SlotStatus, check_availability, check_space_conflict,
    check_user_conflict,
};
pub use capabilities::{Capabilities, Capability};
pub use error::CoreError;
pub use lifecycle::{
    CreateReservation, UpdateReservation, approve_reservation, create_reservation,
    delete_reservation, get_reservation, list_reservations, reject_reservation,
    update_reservation,
};
pub use principal::Principal;
pub use store::{ReservationFilter, ReservationStore};
