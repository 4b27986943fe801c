// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkpoint status tracking for the basket and gift tracks.
//!
//! The two tracks are independent linear progressions stored side by side
//! on each worker. Status only moves forward, and only through checkpoint
//! operations; see `flow_rules` for the transition tables.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Position of a worker on the basket track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BasketStatus {
    /// Worker has not reached the reception window yet
    Pending,
    /// Worker was registered at the reception window
    WindowScanned,
    /// Worker passed hall security
    HallEntered,
    /// Worker received a basket
    BasketDelivered,
}

impl BasketStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::WindowScanned => "WINDOW_SCANNED",
            Self::HallEntered => "HALL_ENTERED",
            Self::BasketDelivered => "BASKET_DELIVERED",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownBasketStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "WINDOW_SCANNED" => Ok(Self::WindowScanned),
            "HALL_ENTERED" => Ok(Self::HallEntered),
            "BASKET_DELIVERED" => Ok(Self::BasketDelivered),
            _ => Err(DomainError::UnknownBasketStatus(s.to_string())),
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::BasketDelivered)
    }
}

/// Position of a worker on the gift track.
///
/// `NotEligible` is sticky: workers without an assigned gift hall stay there
/// for the whole event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GiftStatus {
    /// Worker has no gift hall and never receives gifts
    NotEligible,
    /// Worker has not reached the reception window yet
    Pending,
    /// Worker was registered at the reception window
    WindowScanned,
    /// Worker passed gift hall security
    HallEntered,
    /// Worker received their gifts
    GiftsDelivered,
}

impl GiftStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::Pending => "PENDING",
            Self::WindowScanned => "WINDOW_SCANNED",
            Self::HallEntered => "HALL_ENTERED",
            Self::GiftsDelivered => "GIFTS_DELIVERED",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "NOT_ELIGIBLE" => Ok(Self::NotEligible),
            "PENDING" => Ok(Self::Pending),
            "WINDOW_SCANNED" => Ok(Self::WindowScanned),
            "HALL_ENTERED" => Ok(Self::HallEntered),
            "GIFTS_DELIVERED" => Ok(Self::GiftsDelivered),
            _ => Err(DomainError::UnknownGiftStatus(s.to_string())),
        }
    }

    /// Returns true if no further gift transition is possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::NotEligible | Self::GiftsDelivered)
    }
}

impl FromStr for BasketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl FromStr for GiftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BasketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for GiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
