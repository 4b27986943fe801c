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
    clippy::all
)]

mod flow;

#[cfg(test)]
mod tests;

use pedregal_domain::{NationalId, Track, WorkerId};
use time::OffsetDateTime;

pub use flow::{ActorActivity, ActorProfile, FlowSummary, WorkerFlow, reconstruct_flow};

/// Represents the staff member performing an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The opaque identifier of the staff member.
    pub id: String,
    /// The staff role the actor was acting under.
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The role of the actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the checkpoint action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`WINDOW_REGISTRATION`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }

    /// A consultation of a worker by national ID.
    #[must_use]
    pub fn lookup(national_id: &NationalId) -> Self {
        Self::new(
            String::from("WORKER_LOOKUP"),
            Some(format!("national_id={national_id}")),
        )
    }

    #[must_use]
    pub fn window_registration(national_id: &NationalId) -> Self {
        Self::new(
            String::from("WINDOW_REGISTRATION"),
            Some(format!("national_id={national_id}")),
        )
    }

    /// A hall entry on either track. Re-entries are tagged so they stand out
    /// in the worker's flow.
    #[must_use]
    pub fn hall_entry(track: Track, national_id: &NationalId, reentry: bool) -> Self {
        let name: &str = match track {
            Track::Basket => "BASKET_HALL_ENTRY",
            Track::Gift => "GIFT_HALL_ENTRY",
        };
        let suffix: &str = if reentry { " (RE-ENTRY)" } else { "" };
        Self::new(
            name.to_string(),
            Some(format!("national_id={national_id}{suffix}")),
        )
    }

    #[must_use]
    pub fn basket_delivery(national_id: &NationalId, basket_code: &str) -> Self {
        Self::new(
            String::from("BASKET_DELIVERY"),
            Some(format!("national_id={national_id}, basket={basket_code}")),
        )
    }

    /// A gift hand-over; all delivered codes are listed comma-joined.
    #[must_use]
    pub fn gift_delivery(national_id: &NationalId, gift_codes: &[String]) -> Self {
        Self::new(
            String::from("GIFT_DELIVERY"),
            Some(format!(
                "national_id={national_id}, gifts={}",
                gift_codes.join(", ")
            )),
        )
    }

    /// Renders the action as a log description. Never shortened.
    #[must_use]
    pub fn description(&self) -> String {
        match &self.details {
            Some(details) => format!("{}: {details}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A log entry about to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLogEntry {
    pub worker_id: WorkerId,
    pub actor_id: String,
    pub description: String,
    pub logged_at: OffsetDateTime,
}

impl NewLogEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn new(worker_id: WorkerId, actor: &Actor, action: &Action) -> Self {
        Self {
            worker_id,
            actor_id: actor.id.clone(),
            description: action.description(),
            logged_at: OffsetDateTime::now_utc(),
        }
    }
}

/// An immutable, stored log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Store-assigned sequence number; breaks timestamp ties.
    pub log_id: i64,
    pub worker_id: WorkerId,
    pub actor_id: String,
    pub description: String,
    pub logged_at: OffsetDateTime,
}
