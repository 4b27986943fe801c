// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::{BasketId, NationalId, Worker, WorkerId};
use tracing::debug;

use crate::data_models::WorkerRow;
use crate::diesel_schema::workers;
use crate::error::PersistenceError;

/// Retrieves a worker by national ID.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be decoded.
/// Returns `Ok(None)` if no worker has this national ID.
pub fn find_by_national_id(
    conn: &mut SqliteConnection,
    national_id: &NationalId,
) -> Result<Option<Worker>, PersistenceError> {
    debug!(national_id = %national_id, "Looking up worker by national ID");

    workers::table
        .filter(workers::national_id.eq(national_id.value()))
        .select(WorkerRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkerRow::into_worker)
        .transpose()
}

/// Retrieves a worker by internal id.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be decoded.
pub fn find_by_id(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
) -> Result<Option<Worker>, PersistenceError> {
    debug!(worker_id = %worker_id, "Looking up worker by id");

    workers::table
        .find(worker_id.to_string())
        .select(WorkerRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkerRow::into_worker)
        .transpose()
}

/// Retrieves the worker a basket was handed to, if any.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row cannot be decoded.
pub fn find_holding_basket(
    conn: &mut SqliteConnection,
    basket_id: BasketId,
) -> Result<Option<Worker>, PersistenceError> {
    workers::table
        .filter(workers::basket_item_id.eq(basket_id.to_string()))
        .select(WorkerRow::as_select())
        .first(conn)
        .optional()?
        .map(WorkerRow::into_worker)
        .transpose()
}

/// Checks whether another worker already uses a national ID.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn national_id_taken(
    conn: &mut SqliteConnection,
    national_id: &NationalId,
    except: Option<WorkerId>,
) -> Result<bool, PersistenceError> {
    let mut query = workers::table
        .filter(workers::national_id.eq(national_id.value()))
        .into_boxed();
    if let Some(worker_id) = except {
        query = query.filter(workers::worker_id.ne(worker_id.to_string()));
    }
    let count: i64 = query.count().get_result(conn)?;
    Ok(count > 0)
}
