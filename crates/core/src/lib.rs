// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkpoint flow engine.
//!
//! Workers move through two independent tracks, basket and gift, one
//! checkpoint at a time. Every operation here runs inside a single
//! [`UnitOfWork`] so that a state change and its log entry are stored
//! together or not at all. Role checks happen before these functions are
//! called; the engine trusts its caller.

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

mod engine;
mod error;
mod store;

#[cfg(test)]
mod tests;

pub use engine::{
    FlowOutcome, deliver_basket, deliver_gifts, enter_basket_hall, enter_gift_hall,
    lookup_worker, register_at_window, validate_basket_code, validate_gift_code, worker_flow,
};
pub use error::{FlowError, StoreError};
pub use store::{FlowStore, Settlement, UnitOfWork};
