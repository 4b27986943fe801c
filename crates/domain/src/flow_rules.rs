// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkpoint transition tables.
//!
//! Every checkpoint classifies the worker's current status into a
//! [`Verdict`]. The tables are pure: they never touch storage and never
//! look at the clock, so the flow engine only has to branch on the result.
//!
//! Repeated scans at a physical checkpoint are expected. A repeat that
//! finds the worker already at or past the target state yields
//! [`Verdict::NoOp`] rather than a rejection.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::status::{BasketStatus, GiftStatus};
use crate::types::{GiftHall, NationalId};

/// The two independent checkpoint tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Basket,
    Gift,
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basket => f.write_str("basket"),
            Self::Gift => f.write_str("gift"),
        }
    }
}

/// Outcome of evaluating a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict<S> {
    /// Move to the given state. Advancing to the current state is a
    /// re-entry: it is logged but changes nothing.
    Advance(S),
    /// Benign repeat; nothing is written.
    NoOp(NoOpReason),
    /// The transition is not allowed from the current state.
    Reject(Rejection),
}

/// Why a checkpoint scan changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Worker already went through the reception window.
    AlreadyRegistered,
    /// Worker already received the item for this track.
    AlreadyDelivered,
}

/// Why a checkpoint refused a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    WindowNotPassed { track: Track, current: &'static str },
    HallNotEntered { track: Track, current: &'static str },
    NotEligibleForGifts,
    /// A gift hall is assigned while the gift track says `NOT_ELIGIBLE`.
    InconsistentGiftState,
}

impl Rejection {
    /// Attaches the worker to the rejection.
    #[must_use]
    pub fn into_error(self, national_id: &NationalId) -> DomainError {
        let national_id: String = national_id.value().to_string();
        match self {
            Self::WindowNotPassed { current, .. } => DomainError::WindowNotPassed {
                national_id,
                current: current.to_string(),
            },
            Self::HallNotEntered { track, current } => DomainError::HallNotEntered {
                national_id,
                track,
                current: current.to_string(),
            },
            Self::NotEligibleForGifts => DomainError::NotEligibleForGifts { national_id },
            Self::InconsistentGiftState => DomainError::InconsistentGiftState {
                national_id,
                current: GiftStatus::NotEligible.as_str().to_string(),
            },
        }
    }
}

/// Target state of a successful window registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRegistration {
    pub basket: BasketStatus,
    pub gift: GiftStatus,
}

/// Classifies a scan at the reception window.
///
/// Only workers still `PENDING` on the basket track are registered. The gift
/// track moves to `WINDOW_SCANNED` only from `PENDING`; any other gift status
/// is kept, so the track never moves backward.
#[must_use]
pub const fn window_registration(
    basket: BasketStatus,
    gift: GiftStatus,
) -> Verdict<WindowRegistration> {
    match basket {
        BasketStatus::Pending => Verdict::Advance(WindowRegistration {
            basket: BasketStatus::WindowScanned,
            gift: match gift {
                GiftStatus::Pending => GiftStatus::WindowScanned,
                other => other,
            },
        }),
        BasketStatus::WindowScanned
        | BasketStatus::HallEntered
        | BasketStatus::BasketDelivered => Verdict::NoOp(NoOpReason::AlreadyRegistered),
    }
}

/// Classifies a scan at the basket hall door.
#[must_use]
pub const fn basket_hall_entry(current: BasketStatus) -> Verdict<BasketStatus> {
    match current {
        BasketStatus::BasketDelivered => Verdict::NoOp(NoOpReason::AlreadyDelivered),
        // From HALL_ENTERED this is a re-entry.
        BasketStatus::WindowScanned | BasketStatus::HallEntered => {
            Verdict::Advance(BasketStatus::HallEntered)
        }
        BasketStatus::Pending => Verdict::Reject(Rejection::WindowNotPassed {
            track: Track::Basket,
            current: current.as_str(),
        }),
    }
}

/// Checks that the worker may use the gift track at all.
///
/// # Errors
///
/// Returns `Rejection::NotEligibleForGifts` if no gift hall is assigned.
pub const fn gift_eligibility(gift_hall: Option<GiftHall>) -> Result<GiftHall, Rejection> {
    match gift_hall {
        Some(hall) => Ok(hall),
        None => Err(Rejection::NotEligibleForGifts),
    }
}

/// Classifies a scan at the gift hall door.
///
/// Eligibility is checked before the status table.
#[must_use]
pub const fn gift_hall_entry(
    gift_hall: Option<GiftHall>,
    current: GiftStatus,
) -> Verdict<GiftStatus> {
    if let Err(rejection) = gift_eligibility(gift_hall) {
        return Verdict::Reject(rejection);
    }
    match current {
        GiftStatus::GiftsDelivered => Verdict::NoOp(NoOpReason::AlreadyDelivered),
        GiftStatus::WindowScanned | GiftStatus::HallEntered => {
            Verdict::Advance(GiftStatus::HallEntered)
        }
        GiftStatus::Pending => Verdict::Reject(Rejection::WindowNotPassed {
            track: Track::Gift,
            current: current.as_str(),
        }),
        GiftStatus::NotEligible => Verdict::Reject(Rejection::InconsistentGiftState),
    }
}

/// Classifies a basket hand-over at the delivery counter.
#[must_use]
pub const fn basket_delivery(current: BasketStatus) -> Verdict<BasketStatus> {
    match current {
        BasketStatus::BasketDelivered => Verdict::NoOp(NoOpReason::AlreadyDelivered),
        BasketStatus::HallEntered => Verdict::Advance(BasketStatus::BasketDelivered),
        BasketStatus::Pending | BasketStatus::WindowScanned => {
            Verdict::Reject(Rejection::HallNotEntered {
                track: Track::Basket,
                current: current.as_str(),
            })
        }
    }
}

/// Classifies a gift hand-over at the delivery counter.
///
/// Callers check [`gift_eligibility`] first.
#[must_use]
pub const fn gift_delivery(current: GiftStatus) -> Verdict<GiftStatus> {
    match current {
        GiftStatus::GiftsDelivered => Verdict::NoOp(NoOpReason::AlreadyDelivered),
        GiftStatus::HallEntered => Verdict::Advance(GiftStatus::GiftsDelivered),
        GiftStatus::NotEligible | GiftStatus::Pending | GiftStatus::WindowScanned => {
            Verdict::Reject(Rejection::HallNotEntered {
                track: Track::Gift,
                current: current.as_str(),
            })
        }
    }
}
