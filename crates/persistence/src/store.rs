// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The flow engine's transaction boundary on `SQLite`.
//!
//! Every writing unit runs inside `BEGIN IMMEDIATE`, which takes the write
//! lock up front. Two checkpoint operations on the same database therefore
//! never interleave: the second waits (up to the busy timeout) and then sees
//! what the first committed.
//!
//! Read-only units use a deferred `BEGIN` and never take the write lock. In
//! WAL mode they run alongside a writer on another connection.

use diesel::{Connection, SqliteConnection};
use pedregal::{FlowError, FlowStore, Settlement, StoreError, UnitOfWork};
use pedregal_audit::{ActorProfile, LogEntry, NewLogEntry};
use pedregal_domain::{
    Basket, BasketId, Gift, GiftId, NationalId, StatusChange, Worker, WorkerId,
};
use tracing::{debug, error};

use crate::error::PersistenceError;
use crate::{Persistence, mutations, queries};

/// A [`FlowStore`] bound to one open transaction.
struct TxStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl FlowStore for TxStore<'_> {
    fn find_worker_by_national_id(
        &mut self,
        national_id: &NationalId,
    ) -> Result<Option<Worker>, StoreError> {
        Ok(queries::workers::find_by_national_id(self.conn, national_id)?)
    }

    fn find_worker_by_id(&mut self, worker_id: WorkerId) -> Result<Option<Worker>, StoreError> {
        Ok(queries::workers::find_by_id(self.conn, worker_id)?)
    }

    fn find_worker_holding_basket(
        &mut self,
        basket_id: BasketId,
    ) -> Result<Option<Worker>, StoreError> {
        Ok(queries::workers::find_holding_basket(self.conn, basket_id)?)
    }

    fn update_worker(
        &mut self,
        worker_id: WorkerId,
        change: &StatusChange,
    ) -> Result<Worker, StoreError> {
        Ok(mutations::workers::apply_status_change(
            self.conn, worker_id, change,
        )?)
    }

    fn find_basket_by_code(&mut self, code: &str) -> Result<Option<Basket>, StoreError> {
        Ok(queries::items::find_basket_by_code(self.conn, code)?)
    }

    fn find_basket_by_id(&mut self, basket_id: BasketId) -> Result<Option<Basket>, StoreError> {
        Ok(queries::items::find_basket_by_id(self.conn, basket_id)?)
    }

    fn find_gift_by_code(&mut self, code: &str) -> Result<Option<Gift>, StoreError> {
        Ok(queries::items::find_gift_by_code(self.conn, code)?)
    }

    fn find_gifts_by_ids(&mut self, gift_ids: &[GiftId]) -> Result<Vec<Gift>, StoreError> {
        Ok(queries::items::find_gifts_by_ids(self.conn, gift_ids)?)
    }

    fn insert_gift_assignments(
        &mut self,
        worker_id: WorkerId,
        gift_ids: &[GiftId],
    ) -> Result<usize, StoreError> {
        Ok(mutations::items::insert_assignments(
            self.conn, worker_id, gift_ids,
        )?)
    }

    fn insert_log(&mut self, entry: &NewLogEntry) -> Result<LogEntry, StoreError> {
        Ok(mutations::logs::insert_log(self.conn, entry)?)
    }

    fn find_logs_by_worker(&mut self, worker_id: WorkerId) -> Result<Vec<LogEntry>, StoreError> {
        Ok(queries::logs::list_by_worker(self.conn, worker_id)?)
    }

    fn find_actor_profiles(
        &mut self,
        actor_ids: &[String],
    ) -> Result<Vec<ActorProfile>, StoreError> {
        Ok(queries::logs::find_actor_profiles(self.conn, actor_ids)?)
    }
}

/// Why a transaction closure returned early.
enum Abort<T> {
    /// The engine asked for a rollback but has a value to hand back.
    Rollback(T),
    Failed(FlowError),
    Database(diesel::result::Error),
}

impl<T> From<diesel::result::Error> for Abort<T> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Database(err)
    }
}

impl UnitOfWork for Persistence {
    fn atomic<T, F>(&mut self, work: F) -> Result<T, FlowError>
    where
        F: FnOnce(&mut dyn FlowStore) -> Result<Settlement<T>, FlowError>,
    {
        let result: Result<T, Abort<T>> = self.conn.immediate_transaction(|conn| {
            let mut store: TxStore<'_> = TxStore { conn };
            match work(&mut store) {
                Ok(Settlement::Commit(value)) => Ok(value),
                Ok(Settlement::Rollback(value)) => Err(Abort::Rollback(value)),
                Err(err) => Err(Abort::Failed(err)),
            }
        });

        match result {
            Ok(value) => Ok(value),
            Err(Abort::Rollback(value)) => {
                debug!("Unit of work rolled back");
                Ok(value)
            }
            Err(Abort::Failed(err)) => Err(err),
            Err(Abort::Database(err)) => {
                error!(error = %err, "Transaction failed");
                Err(StoreError::from(PersistenceError::from(err)).into())
            }
        }
    }

    fn read_only<T, F>(&mut self, work: F) -> Result<T, FlowError>
    where
        F: FnOnce(&mut dyn FlowStore) -> Result<T, FlowError>,
    {
        let result: Result<T, Abort<T>> = self.conn.transaction(|conn| {
            let mut store: TxStore<'_> = TxStore { conn };
            work(&mut store).map_err(Abort::Failed)
        });

        match result {
            Ok(value) | Err(Abort::Rollback(value)) => Ok(value),
            Err(Abort::Failed(err)) => Err(err),
            Err(Abort::Database(err)) => {
                error!(error = %err, "Read transaction failed");
                Err(StoreError::from(PersistenceError::from(err)).into())
            }
        }
    }
}
