// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, one module per table.
//!
//! Row structs convert themselves into domain values; a row holding a value
//! the domain no longer accepts surfaces as `PersistenceError::CorruptRow`.

pub mod departments;
pub mod reservations;
pub mod spaces;
pub mod users;
