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

mod error;
mod flow_rules;
mod staff;
mod status;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use flow_rules::{
    NoOpReason, Rejection, Track, Verdict, WindowRegistration, basket_delivery,
    basket_hall_entry, gift_delivery, gift_eligibility, gift_hall_entry, window_registration,
};
pub use staff::{StaffRole, StaffUser};
pub use status::{BasketStatus, GiftStatus};
pub use types::{
    Basket, BasketHall, BasketId, BasketRef, Gift, GiftHall, GiftId, NationalId, NewWorker,
    StatusChange, Worker, WorkerAmendment, WorkerId,
};
pub use validation::{
    parse_date, parse_gift_ids, validate_item_code, validate_name, validate_observation,
};
