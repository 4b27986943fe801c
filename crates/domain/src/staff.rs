// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event staff and their checkpoint roles.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// The checkpoint role a staff member works.
///
/// Each checkpoint accepts exactly one role; the process lead and admins
/// supervise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    /// Registers workers at the reception window
    WindowAssistant,
    /// Admits workers into the basket hall
    BasketSecurity,
    /// Admits workers into the gift hall
    GiftSecurity,
    /// Hands over baskets
    BasketDeliveryClerk,
    /// Hands over gifts
    GiftDeliveryClerk,
    /// Supervises the event and reviews worker flows
    ProcessLead,
    /// Manages workers, inventory and staff
    Admin,
}

impl StaffRole {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WindowAssistant => "WINDOW_ASSISTANT",
            Self::BasketSecurity => "BASKET_SECURITY",
            Self::GiftSecurity => "GIFT_SECURITY",
            Self::BasketDeliveryClerk => "BASKET_DELIVERY_CLERK",
            Self::GiftDeliveryClerk => "GIFT_DELIVERY_CLERK",
            Self::ProcessLead => "PROCESS_LEAD",
            Self::Admin => "ADMIN",
        }
    }
}

impl FromStr for StaffRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WINDOW_ASSISTANT" => Ok(Self::WindowAssistant),
            "BASKET_SECURITY" => Ok(Self::BasketSecurity),
            "GIFT_SECURITY" => Ok(Self::GiftSecurity),
            "BASKET_DELIVERY_CLERK" => Ok(Self::BasketDeliveryClerk),
            "GIFT_DELIVERY_CLERK" => Ok(Self::GiftDeliveryClerk),
            "PROCESS_LEAD" => Ok(Self::ProcessLead),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(DomainError::UnknownStaffRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff member who operates checkpoints.
///
/// The `id` is the opaque actor identifier recorded on log entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffUser {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
    pub is_active: bool,
}

impl StaffUser {
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
