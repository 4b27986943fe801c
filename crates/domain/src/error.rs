// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

use crate::flow_rules::Track;

/// Errors that can occur during domain validation and rule evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// National ID is empty or has an invalid length.
    #[error("Invalid national ID '{value}': {reason}")]
    InvalidNationalId {
        /// The rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
    /// A UUID-based identifier could not be parsed.
    #[error("Invalid {kind} identifier: '{value}'")]
    InvalidIdentifier {
        /// The kind of identifier (worker, basket, gift).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// Basket or gift code is empty or too long.
    #[error("Invalid item code: {0}")]
    InvalidItemCode(String),
    /// Person name is empty or too long.
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// Observation text is empty or too long.
    #[error("Invalid observation: {0}")]
    InvalidObservation(String),
    /// A date string could not be parsed.
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate {
        /// The rejected value.
        value: String,
        /// The parser message.
        reason: String,
    },
    /// Gift delivery was requested without any gifts.
    #[error("At least one gift must be supplied")]
    EmptyGiftList,
    #[error("Unknown basket status: '{0}'")]
    UnknownBasketStatus(String),
    #[error("Unknown gift status: '{0}'")]
    UnknownGiftStatus(String),
    #[error("Unknown hall: '{0}'")]
    UnknownHall(String),
    #[error("Unknown staff role: '{0}'")]
    UnknownStaffRole(String),
    /// The worker tried to skip the reception window.
    #[error("Worker {national_id} must pass the reception window first. Current status: {current}")]
    WindowNotPassed {
        /// The worker's national ID.
        national_id: String,
        /// The current status on the affected track.
        current: String,
    },
    /// Delivery was attempted before the worker entered the hall.
    #[error("Worker {national_id} has not entered the {track} hall. Current status: {current}")]
    HallNotEntered {
        /// The worker's national ID.
        national_id: String,
        /// The affected track.
        track: Track,
        /// The current status on the affected track.
        current: String,
    },
    /// The worker has no gift hall assigned.
    #[error("Worker {national_id} is not eligible for gifts")]
    NotEligibleForGifts {
        /// The worker's national ID.
        national_id: String,
    },
    /// A gift hall is assigned but the gift track is marked not eligible.
    #[error("Worker {national_id} has an inconsistent gift status: {current}")]
    InconsistentGiftState {
        /// The worker's national ID.
        national_id: String,
        /// The stored gift status.
        current: String,
    },
    /// Some of the requested gifts do not exist.
    #[error("One or more gifts not found ({found} of {requested} exist)")]
    GiftsNotFound {
        /// How many gift IDs were supplied.
        requested: usize,
        /// How many of them resolved.
        found: usize,
    },
    /// The basket was already handed to a different worker.
    #[error("Basket {basket_code} is already assigned to another worker")]
    BasketAlreadyAssigned {
        /// The basket code.
        basket_code: String,
    },
}
