// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inserts, updates and deletes, one module per table.

pub mod departments;
pub mod reservations;
pub mod spaces;
pub mod users;
