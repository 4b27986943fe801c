// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection pooling.
//!
//! A pooled connection is a whole [`Persistence`] adapter, so a request checks
//! one out and calls the engine exactly as a single-connection caller would.
//! Requests for different workers then run on different connections.
//!
//! `SQLite` still admits one writer at a time: write units take the lock with
//! `BEGIN IMMEDIATE` and wait out the busy timeout, while read-only units run
//! deferred and, on a WAL file, proceed alongside a writer.

use std::sync::Mutex;
use std::time::Duration;

use diesel::r2d2::{ManageConnection, Pool, PooledConnection};
use diesel::{RunQueryDsl, SqliteConnection};

use crate::Persistence;
use crate::backend;
use crate::error::PersistenceError;

/// A pool of [`Persistence`] adapters.
pub type PersistencePool = Pool<PersistenceManager>;

/// A [`Persistence`] checked out of a [`PersistencePool`].
pub type PooledPersistence = PooledConnection<PersistenceManager>;

const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens pooled connections to an already migrated database.
pub struct PersistenceManager {
    database_url: String,
    // A shared-cache in-memory database lives only while a connection to it
    // is open.
    _keepalive: Option<Mutex<SqliteConnection>>,
}

impl PersistenceManager {
    pub(crate) fn new(database_url: String, keepalive: Option<SqliteConnection>) -> Self {
        Self {
            database_url,
            _keepalive: keepalive.map(Mutex::new),
        }
    }
}

impl ManageConnection for PersistenceManager {
    type Connection = Persistence;
    type Error = PersistenceError;

    fn connect(&self) -> Result<Persistence, PersistenceError> {
        let conn: SqliteConnection = backend::sqlite::open_connection(&self.database_url)?;
        Ok(Persistence { conn })
    }

    fn is_valid(&self, persistence: &mut Persistence) -> Result<(), PersistenceError> {
        diesel::sql_query("SELECT 1").execute(&mut persistence.conn)?;
        Ok(())
    }

    fn has_broken(&self, _persistence: &mut Persistence) -> bool {
        false
    }
}

/// Builds a pool of at most `max_size` connections (at least one).
///
/// Connections are never retired for age or idleness.
pub(crate) fn build(
    manager: PersistenceManager,
    max_size: u32,
) -> Result<PersistencePool, PersistenceError> {
    Pool::<PersistenceManager>::builder()
        .max_size(max_size.max(1))
        .idle_timeout(None)
        .max_lifetime(None)
        .connection_timeout(CHECKOUT_TIMEOUT)
        .build(manager)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))
}
