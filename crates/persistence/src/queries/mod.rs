// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `workers`: Worker lookups
//! - `items`: Basket and gift lookups
//! - `logs`: Log entry listings and actor profiles
//! - `staff`: Staff user lookups
//! - `counters`: Delivery totals

pub mod counters;
pub mod items;
pub mod logs;
pub mod staff;
pub mod workers;
