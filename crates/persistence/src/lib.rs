// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the El Pedregal flow engine.
//!
//! This crate stores workers, baskets, gifts, the gift ledger, log entries
//! and staff users in `SQLite` through Diesel, and provides the flow
//! engine's transaction boundary (see [`UnitOfWork`](pedregal::UnitOfWork)).
//!
//! ## Storage
//!
//! - Migrations are embedded and applied on open.
//! - Foreign key enforcement is switched on and verified at startup; removing
//!   a worker cascades to their log entries and ledger rows.
//! - File databases run in WAL mode. Every connection waits up to five
//!   seconds for a competing writer before failing.
//! - [`Persistence::pool_with_file`] hands out one connection per request;
//!   read-only units run deferred and do not wait on writers.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

use pedregal_audit::{LogEntry, NewLogEntry};
use pedregal_domain::{
    Basket, Gift, NationalId, NewWorker, StaffUser, Worker, WorkerAmendment, WorkerId,
};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod pool;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use data_models::DeliveryCounters;
pub use error::PersistenceError;
pub use pool::{PersistenceManager, PersistencePool, PooledPersistence};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_memory_url() -> String {
    let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("file:pedregal_mem_{db_id}?mode=memory&cache=shared")
}

fn path_to_url(path: &Path) -> Result<&str, PersistenceError> {
    path.to_str()
        .ok_or_else(|| PersistenceError::InitializationError("Invalid database path".to_string()))
}

fn ensure_national_id_free(
    conn: &mut SqliteConnection,
    national_id: &NationalId,
    except: Option<WorkerId>,
) -> Result<(), PersistenceError> {
    if queries::workers::national_id_taken(conn, national_id, except)? {
        return Err(PersistenceError::Conflict(format!(
            "Worker with national ID {national_id} already exists"
        )));
    }
    Ok(())
}

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&next_memory_url())?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path_to_url(path.as_ref())?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a single-connection pool over a fresh in-memory database.
    ///
    /// One connection is enough: a shared-cache in-memory database locks whole
    /// tables, so more connections would only queue behind each other.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn pool_in_memory() -> Result<PersistencePool, PersistenceError> {
        let url: String = next_memory_url();
        let mut keepalive: SqliteConnection = backend::sqlite::initialize_database(&url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut keepalive)?;

        pool::build(PersistenceManager::new(url, Some(keepalive)), 1)
    }

    /// Creates a pool of up to `max_size` connections to a file database.
    ///
    /// Migrations and WAL mode are applied once, before the pool opens.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn pool_with_file<P: AsRef<Path>>(
        path: P,
        max_size: u32,
    ) -> Result<PersistencePool, PersistenceError> {
        let path_str: &str = path_to_url(path.as_ref())?;
        drop(Self::new_with_file(path_str)?);

        info!(path = %path_str, max_size, "Opening connection pool");
        pool::build(PersistenceManager::new(path_str.to_string(), None), max_size)
    }

    // ========================================================================
    // Workers
    // ========================================================================

    /// Registers a worker.
    ///
    /// Workers without a gift hall start as `NOT_ELIGIBLE` on the gift track.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the national ID is taken.
    pub fn create_worker(&mut self, worker: &NewWorker) -> Result<Worker, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            ensure_national_id_free(conn, &worker.national_id, None)?;
            mutations::workers::insert_worker(conn, worker)
        })
    }

    /// Retrieves a worker by internal id. Nothing is logged.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded.
    pub fn get_worker(
        &mut self,
        worker_id: WorkerId,
    ) -> Result<Option<Worker>, PersistenceError> {
        queries::workers::find_by_id(&mut self.conn, worker_id)
    }

    /// Applies an administrative edit to a worker.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the worker does not exist and
    /// `PersistenceError::Conflict` if the new national ID belongs to another
    /// worker.
    pub fn update_worker(
        &mut self,
        worker_id: WorkerId,
        amendment: &WorkerAmendment,
    ) -> Result<Worker, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            let current: Worker = queries::workers::find_by_id(conn, worker_id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("Worker {worker_id}")))?;

            if let Some(national_id) = &amendment.national_id {
                ensure_national_id_free(conn, national_id, Some(worker_id))?;
            }

            mutations::workers::amend_worker(conn, worker_id, current.gift_status, amendment)
        })
    }

    /// Removes a worker together with their log entries and ledger rows.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the worker does not exist.
    pub fn delete_worker(&mut self, worker_id: WorkerId) -> Result<(), PersistenceError> {
        mutations::workers::delete_worker(&mut self.conn, worker_id)
    }

    /// Records a supervisor's observation on a worker.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the worker does not exist.
    pub fn record_observation(
        &mut self,
        worker_id: WorkerId,
        observation: &str,
    ) -> Result<Worker, PersistenceError> {
        mutations::workers::record_observation(&mut self.conn, worker_id, observation)
    }

    // ========================================================================
    // Baskets and gifts
    // ========================================================================

    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the code is already in use.
    pub fn create_basket(&mut self, code: &str) -> Result<Basket, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if queries::items::find_basket_by_code(conn, code)?.is_some() {
                return Err(PersistenceError::Conflict(format!(
                    "Basket with code {code} already exists"
                )));
            }
            mutations::items::insert_basket(conn, code)
        })
    }

    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the code is already in use.
    pub fn create_gift(&mut self, code: &str) -> Result<Gift, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if queries::items::find_gift_by_code(conn, code)?.is_some() {
                return Err(PersistenceError::Conflict(format!(
                    "Gift with code {code} already exists"
                )));
            }
            mutations::items::insert_gift(conn, code)
        })
    }

    // ========================================================================
    // Staff
    // ========================================================================

    /// # Errors
    ///
    /// Returns `PersistenceError::Conflict` if the id is already in use.
    pub fn create_staff_user(&mut self, user: &StaffUser) -> Result<(), PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if queries::staff::find_by_id(conn, &user.id)?.is_some() {
                return Err(PersistenceError::Conflict(format!(
                    "Staff user {} already exists",
                    user.id
                )));
            }
            mutations::staff::insert_staff_user(conn, user)
        })
    }

    /// Counts staff users. Zero means the system has not been bootstrapped.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_staff_users(&mut self) -> Result<i64, PersistenceError> {
        queries::staff::count(&mut self.conn)
    }

    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_staff_user(
        &mut self,
        user_id: &str,
    ) -> Result<Option<StaffUser>, PersistenceError> {
        queries::staff::find_by_id(&mut self.conn, user_id)
    }

    // ========================================================================
    // Log entries
    // ========================================================================

    /// Appends a log entry outside any checkpoint operation.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the worker or the actor does
    /// not exist.
    pub fn create_log(&mut self, entry: &NewLogEntry) -> Result<LogEntry, PersistenceError> {
        self.conn.immediate_transaction(|conn| {
            if queries::workers::find_by_id(conn, entry.worker_id)?.is_none() {
                return Err(PersistenceError::NotFound(format!(
                    "Worker {}",
                    entry.worker_id
                )));
            }
            if queries::staff::find_by_id(conn, &entry.actor_id)?.is_none() {
                return Err(PersistenceError::NotFound(format!(
                    "Staff user {}",
                    entry.actor_id
                )));
            }
            mutations::logs::insert_log(conn, entry)
        })
    }

    /// Lists a worker's log entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_logs_by_worker(
        &mut self,
        worker_id: WorkerId,
    ) -> Result<Vec<LogEntry>, PersistenceError> {
        queries::logs::list_by_worker(&mut self.conn, worker_id)
    }

    /// Lists the log entries recorded by one staff member, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_logs_by_actor(
        &mut self,
        actor_id: &str,
    ) -> Result<Vec<LogEntry>, PersistenceError> {
        queries::logs::list_by_actor(&mut self.conn, actor_id)
    }

    /// Purges a log entry.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no entry has this id.
    pub fn delete_log(&mut self, log_id: i64) -> Result<(), PersistenceError> {
        mutations::logs::delete_log(&mut self.conn, log_id)
    }

    // ========================================================================
    // Counters
    // ========================================================================

    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn delivery_counters(&mut self) -> Result<DeliveryCounters, PersistenceError> {
        let counters: DeliveryCounters = queries::counters::delivery_counters(&mut self.conn)?;
        info!(
            total_baskets = counters.total_baskets,
            total_gifts = counters.total_gifts,
            "Computed delivery counters"
        );
        Ok(counters)
    }
}
