// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Log entry mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_audit::{LogEntry, NewLogEntry};
use tracing::{debug, info};

use crate::data_models::{LogRow, NewLogRow, encode_timestamp};
use crate::diesel_schema::flow_logs;
use crate::error::PersistenceError;

/// Appends a log entry and returns it with its assigned id.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the worker or actor does not
/// exist.
pub fn insert_log(
    conn: &mut SqliteConnection,
    entry: &NewLogEntry,
) -> Result<LogEntry, PersistenceError> {
    let row: NewLogRow = NewLogRow {
        worker_id: entry.worker_id.to_string(),
        actor_id: entry.actor_id.clone(),
        description: entry.description.clone(),
        logged_at: encode_timestamp(entry.logged_at)?,
    };

    let stored: LogEntry = diesel::insert_into(flow_logs::table)
        .values(&row)
        .returning(LogRow::as_returning())
        .get_result(conn)?
        .into_entry()?;

    debug!(log_id = stored.log_id, worker_id = %stored.worker_id, "Inserted log entry");
    Ok(stored)
}

/// Purges one log entry.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no entry has this id.
pub fn delete_log(conn: &mut SqliteConnection, log_id: i64) -> Result<(), PersistenceError> {
    info!(log_id, "Deleting log entry");

    let deleted: usize = diesel::delete(flow_logs::table.find(log_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Log entry {log_id}")));
    }
    Ok(())
}
