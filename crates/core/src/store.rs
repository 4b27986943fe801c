// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store contracts and the atomic-unit primitive.
//!
//! The flow engine never talks to a database directly. It runs its work
//! through [`UnitOfWork::atomic`], which hands the closure a [`FlowStore`]
//! bound to one transaction. The transaction commits only when the closure
//! returns [`Settlement::Commit`]; a [`Settlement::Rollback`] or any error
//! discards every write made inside the closure. Pure reads go through
//! [`UnitOfWork::read_only`] instead.

use pedregal_audit::{ActorProfile, LogEntry, NewLogEntry};
use pedregal_domain::{
    Basket, BasketId, Gift, GiftId, NationalId, StatusChange, Worker, WorkerId,
};

use crate::error::{FlowError, StoreError};

/// How a unit of work ends when its closure succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement<T> {
    /// Keep every write and return the value.
    Commit(T),
    /// Discard every write but still return the value.
    Rollback(T),
}

/// Reads and writes available to the flow engine inside a unit of work.
pub trait FlowStore {
    /// # Errors
    ///
    /// Returns an error if the backend fails or the record is corrupt.
    fn find_worker_by_national_id(
        &mut self,
        national_id: &NationalId,
    ) -> Result<Option<Worker>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails or the record is corrupt.
    fn find_worker_by_id(&mut self, worker_id: WorkerId) -> Result<Option<Worker>, StoreError>;

    /// Finds the worker whose `basket_item_id` points at the basket.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the record is corrupt.
    fn find_worker_holding_basket(
        &mut self,
        basket_id: BasketId,
    ) -> Result<Option<Worker>, StoreError>;

    /// Applies a status change and returns the updated worker.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Missing` if the worker does not exist.
    fn update_worker(
        &mut self,
        worker_id: WorkerId,
        change: &StatusChange,
    ) -> Result<Worker, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_basket_by_code(&mut self, code: &str) -> Result<Option<Basket>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_basket_by_id(&mut self, basket_id: BasketId) -> Result<Option<Basket>, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_gift_by_code(&mut self, code: &str) -> Result<Option<Gift>, StoreError>;

    /// Returns the existing gifts among `gift_ids`, each at most once.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_gifts_by_ids(&mut self, gift_ids: &[GiftId]) -> Result<Vec<Gift>, StoreError>;

    /// Appends one ledger row per gift for the worker.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a (worker, gift) pair already exists.
    fn insert_gift_assignments(
        &mut self,
        worker_id: WorkerId,
        gift_ids: &[GiftId],
    ) -> Result<usize, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the worker or actor does not exist.
    fn insert_log(&mut self, entry: &NewLogEntry) -> Result<LogEntry, StoreError>;

    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_logs_by_worker(&mut self, worker_id: WorkerId) -> Result<Vec<LogEntry>, StoreError>;

    /// Looks up display data for the given actors. Unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn find_actor_profiles(
        &mut self,
        actor_ids: &[String],
    ) -> Result<Vec<ActorProfile>, StoreError>;
}

/// The transaction boundary.
///
/// Implementations must guarantee that either every write performed through
/// the store handed to `work` becomes visible, or none does.
pub trait UnitOfWork {
    /// Runs `work` inside one atomic unit.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a `FlowError::Store` if the
    /// transaction itself cannot be opened or committed.
    fn atomic<T, F>(&mut self, work: F) -> Result<T, FlowError>
    where
        F: FnOnce(&mut dyn FlowStore) -> Result<Settlement<T>, FlowError>;

    /// Runs `work` as a read-only unit.
    ///
    /// Reads see one consistent snapshot but take no write lock, so a unit
    /// for another worker is never kept waiting.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a `FlowError::Store` if the snapshot
    /// cannot be opened.
    fn read_only<T, F>(&mut self, work: F) -> Result<T, FlowError>
    where
        F: FnOnce(&mut dyn FlowStore) -> Result<T, FlowError>;
}
