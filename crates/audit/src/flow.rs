// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker flow reconstruction.
//!
//! A worker's flow is derived entirely from their log entries and current
//! record. Nothing here is stored.

use std::collections::HashMap;

use pedregal_domain::{BasketStatus, GiftStatus, Worker};

use crate::LogEntry;

/// Display information for an actor found in a worker's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorProfile {
    pub actor_id: String,
    pub display_name: String,
    pub role: String,
}

/// How many actions one actor recorded against a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorActivity {
    pub actor_id: String,
    /// `None` if the actor has no profile.
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub action_count: usize,
}

/// Aggregated view of a worker's log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSummary {
    pub total_logs: usize,
    /// The earliest entry.
    pub first_action: Option<LogEntry>,
    /// The latest entry.
    pub last_action: Option<LogEntry>,
    pub basket_status: BasketStatus,
    pub gift_status: GiftStatus,
    /// Sorted by action count, highest first.
    pub actors: Vec<ActorActivity>,
}

/// A worker with their full log, newest first, and its summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerFlow {
    pub worker: Worker,
    pub logs: Vec<LogEntry>,
    pub summary: FlowSummary,
}

/// Builds the flow view of a worker.
///
/// Log order of the input does not matter. Entries are ordered by
/// timestamp, then by log id. Actors with equal counts keep the order in
/// which they first appear in the worker's history.
///
/// # Arguments
///
/// * `worker` - The worker's current record
/// * `logs` - Every log entry recorded against the worker
/// * `profiles` - Display data for the actors, keyed by actor id
#[must_use]
pub fn reconstruct_flow<S: std::hash::BuildHasher>(
    worker: Worker,
    mut logs: Vec<LogEntry>,
    profiles: &HashMap<String, ActorProfile, S>,
) -> WorkerFlow {
    logs.sort_by(|a, b| (a.logged_at, a.log_id).cmp(&(b.logged_at, b.log_id)));

    let first_action: Option<LogEntry> = logs.first().cloned();
    let last_action: Option<LogEntry> = logs.last().cloned();

    let mut actors: Vec<ActorActivity> = Vec::new();
    for entry in &logs {
        if let Some(activity) = actors.iter_mut().find(|a| a.actor_id == entry.actor_id) {
            activity.action_count += 1;
            continue;
        }
        let profile: Option<&ActorProfile> = profiles.get(&entry.actor_id);
        actors.push(ActorActivity {
            actor_id: entry.actor_id.clone(),
            display_name: profile.map(|p| p.display_name.clone()),
            role: profile.map(|p| p.role.clone()),
            action_count: 1,
        });
    }
    // Stable sort keeps first-appearance order among ties.
    actors.sort_by(|a, b| b.action_count.cmp(&a.action_count));

    logs.reverse();

    let summary: FlowSummary = FlowSummary {
        total_logs: logs.len(),
        first_action,
        last_action,
        basket_status: worker.basket_status,
        gift_status: worker.gift_status,
        actors,
    };

    WorkerFlow {
        worker,
        logs,
        summary,
    }
}
