// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::error::DomainError;
use crate::status::{BasketStatus, GiftStatus};

/// Defines a UUID-backed identifier newtype.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            #[must_use]
            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim())
                    .map(Self)
                    .map_err(|_| DomainError::InvalidIdentifier {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

uuid_id!(
    /// Internal identifier of a worker.
    WorkerId,
    "worker"
);
uuid_id!(
    /// Identifier of a physical basket.
    BasketId,
    "basket"
);
uuid_id!(
    /// Identifier of a physical gift item.
    GiftId,
    "gift"
);

const NATIONAL_ID_MIN_LEN: usize = 8;
const NATIONAL_ID_MAX_LEN: usize = 20;

/// A worker's national identity document number.
///
/// This is the value scanned at every checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NationalId(String);

impl NationalId {
    /// Parses and validates a national ID.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidNationalId` if the value is empty or its
    /// length is outside 8..=20 characters.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value: &str = raw.trim();
        if value.is_empty() {
            return Err(DomainError::InvalidNationalId {
                value: raw.to_string(),
                reason: String::from("national ID cannot be empty"),
            });
        }
        let len: usize = value.chars().count();
        if !(NATIONAL_ID_MIN_LEN..=NATIONAL_ID_MAX_LEN).contains(&len) {
            return Err(DomainError::InvalidNationalId {
                value: raw.to_string(),
                reason: format!(
                    "national ID must be between {NATIONAL_ID_MIN_LEN} and {NATIONAL_ID_MAX_LEN} characters"
                ),
            });
        }
        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NationalId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NationalId> for String {
    fn from(value: NationalId) -> Self {
        value.0
    }
}

impl std::fmt::Display for NationalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hall where a worker collects their basket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasketHall {
    #[serde(rename = "HALL_2")]
    Hall2,
    #[serde(rename = "HALL_3")]
    Hall3,
}

impl BasketHall {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hall2 => "HALL_2",
            Self::Hall3 => "HALL_3",
        }
    }
}

impl FromStr for BasketHall {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HALL_2" => Ok(Self::Hall2),
            "HALL_3" => Ok(Self::Hall3),
            _ => Err(DomainError::UnknownHall(s.to_string())),
        }
    }
}

/// Hall where eligible workers collect their gifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GiftHall {
    #[serde(rename = "HALL_1")]
    Hall1,
}

impl GiftHall {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hall1 => "HALL_1",
        }
    }
}

impl FromStr for GiftHall {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HALL_1" => Ok(Self::Hall1),
            _ => Err(DomainError::UnknownHall(s.to_string())),
        }
    }
}

/// A worker attending the event, with both checkpoint tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub id: WorkerId,
    pub national_id: NationalId,
    pub full_name: String,
    pub onboarding_date: Date,
    pub job_function: Option<String>,
    pub basket_type: Option<String>,
    pub children_count: Option<u16>,
    pub basket_hall: BasketHall,
    /// `None` means the worker is not eligible for gifts.
    pub gift_hall: Option<GiftHall>,
    pub basket_status: BasketStatus,
    pub gift_status: GiftStatus,
    /// Set once a basket has been handed over.
    pub basket_item_id: Option<BasketId>,
    pub basket_delivered_at: Option<OffsetDateTime>,
    pub gifts_delivered_at: Option<OffsetDateTime>,
    pub observation: Option<String>,
    pub observation_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Worker {
    #[must_use]
    pub const fn is_gift_eligible(&self) -> bool {
        self.gift_hall.is_some()
    }
}

/// Input for registering a worker before the event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub national_id: NationalId,
    pub full_name: String,
    pub onboarding_date: Date,
    pub job_function: Option<String>,
    pub basket_type: Option<String>,
    pub children_count: Option<u16>,
    pub basket_hall: BasketHall,
    pub gift_hall: Option<GiftHall>,
}

impl NewWorker {
    /// Returns the gift status a freshly registered worker starts with.
    ///
    /// Workers without a gift hall are forced to `NotEligible`.
    #[must_use]
    pub const fn initial_gift_status(&self) -> GiftStatus {
        match self.gift_hall {
            Some(_) => GiftStatus::Pending,
            None => GiftStatus::NotEligible,
        }
    }
}

/// Administrative edit of a worker's identity and hall assignment.
///
/// `None` leaves a field untouched; for nullable fields `Some(None)` clears it.
/// Checkpoint statuses are not editable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerAmendment {
    pub national_id: Option<NationalId>,
    pub full_name: Option<String>,
    pub onboarding_date: Option<Date>,
    pub job_function: Option<Option<String>>,
    pub basket_type: Option<Option<String>>,
    pub children_count: Option<Option<u16>>,
    pub basket_hall: Option<BasketHall>,
    pub gift_hall: Option<Option<GiftHall>>,
}

impl WorkerAmendment {
    /// Returns the gift status implied by a gift hall change, if any.
    ///
    /// Removing the gift hall forces `NotEligible`. Assigning a hall to a
    /// worker that was not eligible puts them back at `Pending`. Any other
    /// case keeps the current status.
    #[must_use]
    pub const fn gift_status_after(&self, current: GiftStatus) -> Option<GiftStatus> {
        match (self.gift_hall, current) {
            (Some(None), GiftStatus::NotEligible) | (None, _) => None,
            (Some(None), _) => Some(GiftStatus::NotEligible),
            (Some(Some(_)), GiftStatus::NotEligible) => Some(GiftStatus::Pending),
            (Some(Some(_)), _) => None,
        }
    }
}

/// State change produced by a checkpoint transition.
///
/// Only the populated fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusChange {
    pub basket_status: Option<BasketStatus>,
    pub gift_status: Option<GiftStatus>,
    pub basket_item_id: Option<BasketId>,
    pub basket_delivered_at: Option<OffsetDateTime>,
    pub gifts_delivered_at: Option<OffsetDateTime>,
}

impl StatusChange {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A physical basket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basket {
    pub id: BasketId,
    pub code: String,
    pub created_at: OffsetDateTime,
}

/// A physical gift item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gift {
    pub id: GiftId,
    pub code: String,
    pub created_at: OffsetDateTime,
}

/// How a delivery counter refers to a basket: by identifier or by the
/// scanned code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BasketRef {
    Id(BasketId),
    Code(String),
}

impl BasketRef {
    /// Parses a basket reference.
    ///
    /// Values that parse as a UUID are treated as identifiers, anything else
    /// as a basket code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidItemCode` if the value is neither a UUID
    /// nor a valid code.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if let Ok(id) = raw.parse::<BasketId>() {
            return Ok(Self::Id(id));
        }
        crate::validation::validate_item_code(raw).map(Self::Code)
    }
}

impl std::fmt::Display for BasketRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Code(code) => f.write_str(code),
        }
    }
}
