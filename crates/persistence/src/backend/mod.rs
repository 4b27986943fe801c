// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Only connection setup, migrations and PRAGMA handling live here. Domain
//! queries and mutations are plain Diesel DSL in `queries/` and
//! `mutations/`.

pub mod sqlite;
