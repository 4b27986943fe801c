// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Log entry queries.
//!
//! Listings are newest first. Entries written in the same microsecond are
//! ordered by log id.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_audit::{ActorProfile, LogEntry};
use pedregal_domain::WorkerId;
use tracing::debug;

use crate::data_models::{LogRow, StaffRow};
use crate::diesel_schema::{flow_logs, staff_users};
use crate::error::PersistenceError;

/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_by_worker(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
) -> Result<Vec<LogEntry>, PersistenceError> {
    debug!(worker_id = %worker_id, "Listing logs for worker");

    flow_logs::table
        .filter(flow_logs::worker_id.eq(worker_id.to_string()))
        .order((flow_logs::logged_at.desc(), flow_logs::log_id.desc()))
        .select(LogRow::as_select())
        .load(conn)?
        .into_iter()
        .map(LogRow::into_entry)
        .collect()
}

/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_by_actor(
    conn: &mut SqliteConnection,
    actor_id: &str,
) -> Result<Vec<LogEntry>, PersistenceError> {
    debug!(actor_id, "Listing logs for actor");

    flow_logs::table
        .filter(flow_logs::actor_id.eq(actor_id))
        .order((flow_logs::logged_at.desc(), flow_logs::log_id.desc()))
        .select(LogRow::as_select())
        .load(conn)?
        .into_iter()
        .map(LogRow::into_entry)
        .collect()
}

/// Loads display data for the given actors. Unknown ids are skipped.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_actor_profiles(
    conn: &mut SqliteConnection,
    actor_ids: &[String],
) -> Result<Vec<ActorProfile>, PersistenceError> {
    let rows: Vec<StaffRow> = staff_users::table
        .filter(staff_users::user_id.eq_any(actor_ids))
        .select(StaffRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(StaffRow::into_profile).collect())
}
