// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worker mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::{GiftStatus, NewWorker, StatusChange, Worker, WorkerAmendment, WorkerId};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::data_models::{WorkerRow, encode_date, encode_timestamp};
use crate::diesel_schema::workers;
use crate::error::PersistenceError;

#[derive(AsChangeset)]
#[diesel(table_name = workers)]
struct StatusChangeset {
    basket_status: Option<String>,
    gift_status: Option<String>,
    basket_item_id: Option<String>,
    basket_delivered_at: Option<String>,
    gifts_delivered_at: Option<String>,
    updated_at: String,
}

#[derive(AsChangeset)]
#[diesel(table_name = workers)]
struct AmendmentChangeset {
    national_id: Option<String>,
    full_name: Option<String>,
    onboarding_date: Option<String>,
    job_function: Option<Option<String>>,
    basket_type: Option<Option<String>>,
    children_count: Option<Option<i32>>,
    basket_hall: Option<String>,
    gift_hall: Option<Option<String>>,
    gift_status: Option<String>,
    updated_at: String,
}

fn not_found(worker_id: WorkerId) -> PersistenceError {
    PersistenceError::NotFound(format!("Worker {worker_id}"))
}

/// Inserts a new worker at `PENDING` on the basket track.
///
/// # Errors
///
/// Returns an error if the insert fails, including a unique violation on
/// the national ID.
pub fn insert_worker(
    conn: &mut SqliteConnection,
    worker: &NewWorker,
) -> Result<Worker, PersistenceError> {
    let row: WorkerRow = WorkerRow::from_new(WorkerId::generate(), worker)?;

    info!(
        worker_id = %row.worker_id,
        national_id = %worker.national_id,
        "Creating worker"
    );

    diesel::insert_into(workers::table)
        .values(&row)
        .execute(conn)?;

    row.into_worker()
}

/// Applies a checkpoint status change and returns the updated worker.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the worker does not exist.
pub fn apply_status_change(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    change: &StatusChange,
) -> Result<Worker, PersistenceError> {
    debug!(worker_id = %worker_id, ?change, "Applying status change");

    let changeset: StatusChangeset = StatusChangeset {
        basket_status: change.basket_status.map(|s| s.as_str().to_string()),
        gift_status: change.gift_status.map(|s| s.as_str().to_string()),
        basket_item_id: change.basket_item_id.map(|id| id.to_string()),
        basket_delivered_at: change.basket_delivered_at.map(encode_timestamp).transpose()?,
        gifts_delivered_at: change.gifts_delivered_at.map(encode_timestamp).transpose()?,
        updated_at: encode_timestamp(OffsetDateTime::now_utc())?,
    };

    diesel::update(workers::table.find(worker_id.to_string()))
        .set(&changeset)
        .returning(WorkerRow::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| not_found(worker_id))?
        .into_worker()
}

/// Applies an administrative edit.
///
/// Removing the gift hall forces the gift track to `NOT_ELIGIBLE`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the worker does not exist and
/// `PersistenceError::Conflict` if the new national ID belongs to another
/// worker.
pub fn amend_worker(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    current_gift_status: GiftStatus,
    amendment: &WorkerAmendment,
) -> Result<Worker, PersistenceError> {
    info!(worker_id = %worker_id, "Updating worker");

    let changeset: AmendmentChangeset = AmendmentChangeset {
        national_id: amendment
            .national_id
            .as_ref()
            .map(|n| n.value().to_string()),
        full_name: amendment.full_name.clone(),
        onboarding_date: amendment.onboarding_date.map(encode_date).transpose()?,
        job_function: amendment.job_function.clone(),
        basket_type: amendment.basket_type.clone(),
        children_count: amendment.children_count.map(|c| c.map(i32::from)),
        basket_hall: amendment.basket_hall.map(|h| h.as_str().to_string()),
        gift_hall: amendment
            .gift_hall
            .map(|hall| hall.map(|h| h.as_str().to_string())),
        gift_status: amendment
            .gift_status_after(current_gift_status)
            .map(|s| s.as_str().to_string()),
        updated_at: encode_timestamp(OffsetDateTime::now_utc())?,
    };

    diesel::update(workers::table.find(worker_id.to_string()))
        .set(&changeset)
        .returning(WorkerRow::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| not_found(worker_id))?
        .into_worker()
}

/// Stores a free-text observation on a worker, stamped with the current time.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the worker does not exist.
pub fn record_observation(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    observation: &str,
) -> Result<Worker, PersistenceError> {
    let now: String = encode_timestamp(OffsetDateTime::now_utc())?;

    diesel::update(workers::table.find(worker_id.to_string()))
        .set((
            workers::observation.eq(observation),
            workers::observation_at.eq(&now),
            workers::updated_at.eq(&now),
        ))
        .returning(WorkerRow::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| not_found(worker_id))?
        .into_worker()
}

/// Removes a worker. Log entries and ledger rows go with it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the worker does not exist.
pub fn delete_worker(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
) -> Result<(), PersistenceError> {
    info!(worker_id = %worker_id, "Deleting worker");

    let deleted: usize =
        diesel::delete(workers::table.find(worker_id.to_string())).execute(conn)?;
    if deleted == 0 {
        return Err(not_found(worker_id));
    }
    Ok(())
}
