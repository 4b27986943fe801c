// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store used to exercise the engine without a database.
//!
//! A unit of work snapshots the whole store up front and restores it on
//! rollback or error.

use pedregal_audit::{Actor, ActorProfile, LogEntry, NewLogEntry};
use pedregal_domain::{
    Basket, BasketHall, BasketId, BasketStatus, Gift, GiftHall, GiftId, GiftStatus, NationalId,
    StaffRole, StaffUser, StatusChange, Worker, WorkerId, parse_date,
};
use time::OffsetDateTime;

use crate::{FlowError, FlowStore, Settlement, StoreError, UnitOfWork};

#[derive(Debug, Clone, Default)]
pub struct MemoryData {
    pub workers: Vec<Worker>,
    pub baskets: Vec<Basket>,
    pub gifts: Vec<Gift>,
    pub assignments: Vec<(WorkerId, GiftId)>,
    pub logs: Vec<LogEntry>,
    pub staff: Vec<StaffUser>,
    /// Workers whose stored status cannot be decoded.
    pub corrupt: Vec<WorkerId>,
    next_log_id: i64,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub data: MemoryData,
    /// Makes every ledger insert fail.
    pub fail_ledger: bool,
    pub commits: usize,
    pub rollbacks: usize,
    pub reads: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        let mut store: Self = Self::default();
        store.data.staff.push(StaffUser {
            id: String::from("window-1"),
            first_name: String::from("Rosa"),
            last_name: String::from("Quispe"),
            role: StaffRole::WindowAssistant,
            is_active: true,
        });
        store.data.staff.push(StaffUser {
            id: String::from("guard-1"),
            first_name: String::from("Luis"),
            last_name: String::from("Rojas"),
            role: StaffRole::BasketSecurity,
            is_active: true,
        });
        store
    }

    pub fn add_worker(
        &mut self,
        national_id: &str,
        basket_status: BasketStatus,
        gift_hall: Option<GiftHall>,
        gift_status: GiftStatus,
    ) -> Worker {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let worker: Worker = Worker {
            id: WorkerId::generate(),
            national_id: NationalId::parse(national_id).unwrap(),
            full_name: format!("Worker {national_id}"),
            onboarding_date: parse_date("2020-01-15").unwrap(),
            job_function: None,
            basket_type: None,
            children_count: None,
            basket_hall: BasketHall::Hall2,
            gift_hall,
            basket_status,
            gift_status,
            basket_item_id: None,
            basket_delivered_at: None,
            gifts_delivered_at: None,
            observation: None,
            observation_at: None,
            created_at: now,
            updated_at: now,
        };
        self.data.workers.push(worker.clone());
        worker
    }

    pub fn add_basket(&mut self, code: &str) -> Basket {
        let basket: Basket = Basket {
            id: BasketId::generate(),
            code: code.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.data.baskets.push(basket.clone());
        basket
    }

    pub fn add_gift(&mut self, code: &str) -> Gift {
        let gift: Gift = Gift {
            id: GiftId::generate(),
            code: code.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        self.data.gifts.push(gift.clone());
        gift
    }

    pub fn worker(&self, worker_id: WorkerId) -> &Worker {
        self.data
            .workers
            .iter()
            .find(|w| w.id == worker_id)
            .expect("worker exists")
    }

    pub fn logs_for(&self, worker_id: WorkerId) -> Vec<&LogEntry> {
        self.data
            .logs
            .iter()
            .filter(|l| l.worker_id == worker_id)
            .collect()
    }

    fn check_corrupt(&self, worker: Option<Worker>) -> Result<Option<Worker>, StoreError> {
        match worker {
            Some(w) if self.data.corrupt.contains(&w.id) => Err(StoreError::UnrecognizedState {
                worker: w.id.to_string(),
                field: "basket_status",
                value: String::from("LOST"),
            }),
            other => Ok(other),
        }
    }
}

impl UnitOfWork for MemoryStore {
    fn atomic<T, F>(&mut self, work: F) -> Result<T, FlowError>
    where
        F: FnOnce(&mut dyn FlowStore) -> Result<Settlement<T>, FlowError>,
    {
        let snapshot: MemoryData = self.data.clone();
        match work(self) {
            Ok(Settlement::Commit(value)) => {
                self.commits += 1;
                Ok(value)
            }
            Ok(Settlement::Rollback(value)) => {
                self.data = snapshot;
                self.rollbacks += 1;
                Ok(value)
            }
            Err(err) => {
                self.data = snapshot;
                self.rollbacks += 1;
                Err(err)
            }
        }
    }

    fn read_only<T, F>(&mut self, work: F) -> Result<T, FlowError>
    where
        F: FnOnce(&mut dyn FlowStore) -> Result<T, FlowError>,
    {
        self.reads += 1;
        work(self)
    }
}

impl FlowStore for MemoryStore {
    fn find_worker_by_national_id(
        &mut self,
        national_id: &NationalId,
    ) -> Result<Option<Worker>, StoreError> {
        let found: Option<Worker> = self
            .data
            .workers
            .iter()
            .find(|w| &w.national_id == national_id)
            .cloned();
        self.check_corrupt(found)
    }

    fn find_worker_by_id(&mut self, worker_id: WorkerId) -> Result<Option<Worker>, StoreError> {
        let found: Option<Worker> = self
            .data
            .workers
            .iter()
            .find(|w| w.id == worker_id)
            .cloned();
        self.check_corrupt(found)
    }

    fn find_worker_holding_basket(
        &mut self,
        basket_id: BasketId,
    ) -> Result<Option<Worker>, StoreError> {
        Ok(self
            .data
            .workers
            .iter()
            .find(|w| w.basket_item_id == Some(basket_id))
            .cloned())
    }

    fn update_worker(
        &mut self,
        worker_id: WorkerId,
        change: &StatusChange,
    ) -> Result<Worker, StoreError> {
        let worker: &mut Worker = self
            .data
            .workers
            .iter_mut()
            .find(|w| w.id == worker_id)
            .ok_or_else(|| StoreError::Missing(worker_id.to_string()))?;
        if let Some(status) = change.basket_status {
            worker.basket_status = status;
        }
        if let Some(status) = change.gift_status {
            worker.gift_status = status;
        }
        if let Some(basket_id) = change.basket_item_id {
            worker.basket_item_id = Some(basket_id);
        }
        if let Some(at) = change.basket_delivered_at {
            worker.basket_delivered_at = Some(at);
        }
        if let Some(at) = change.gifts_delivered_at {
            worker.gifts_delivered_at = Some(at);
        }
        worker.updated_at = OffsetDateTime::now_utc();
        Ok(worker.clone())
    }

    fn find_basket_by_code(&mut self, code: &str) -> Result<Option<Basket>, StoreError> {
        Ok(self.data.baskets.iter().find(|b| b.code == code).cloned())
    }

    fn find_basket_by_id(&mut self, basket_id: BasketId) -> Result<Option<Basket>, StoreError> {
        Ok(self.data.baskets.iter().find(|b| b.id == basket_id).cloned())
    }

    fn find_gift_by_code(&mut self, code: &str) -> Result<Option<Gift>, StoreError> {
        Ok(self.data.gifts.iter().find(|g| g.code == code).cloned())
    }

    fn find_gifts_by_ids(&mut self, gift_ids: &[GiftId]) -> Result<Vec<Gift>, StoreError> {
        Ok(self
            .data
            .gifts
            .iter()
            .filter(|g| gift_ids.contains(&g.id))
            .cloned()
            .collect())
    }

    fn insert_gift_assignments(
        &mut self,
        worker_id: WorkerId,
        gift_ids: &[GiftId],
    ) -> Result<usize, StoreError> {
        if self.fail_ledger {
            return Err(StoreError::Backend(String::from("ledger unavailable")));
        }
        for gift_id in gift_ids {
            if self.data.assignments.contains(&(worker_id, *gift_id)) {
                return Err(StoreError::Conflict(format!("gift {gift_id} already assigned")));
            }
            self.data.assignments.push((worker_id, *gift_id));
        }
        Ok(gift_ids.len())
    }

    fn insert_log(&mut self, entry: &NewLogEntry) -> Result<LogEntry, StoreError> {
        if !self.data.workers.iter().any(|w| w.id == entry.worker_id) {
            return Err(StoreError::Conflict(String::from("unknown worker")));
        }
        self.data.next_log_id += 1;
        let stored: LogEntry = LogEntry {
            log_id: self.data.next_log_id,
            worker_id: entry.worker_id,
            actor_id: entry.actor_id.clone(),
            description: entry.description.clone(),
            logged_at: entry.logged_at,
        };
        self.data.logs.push(stored.clone());
        Ok(stored)
    }

    fn find_logs_by_worker(&mut self, worker_id: WorkerId) -> Result<Vec<LogEntry>, StoreError> {
        let mut logs: Vec<LogEntry> = self
            .data
            .logs
            .iter()
            .filter(|l| l.worker_id == worker_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| (b.logged_at, b.log_id).cmp(&(a.logged_at, a.log_id)));
        Ok(logs)
    }

    fn find_actor_profiles(
        &mut self,
        actor_ids: &[String],
    ) -> Result<Vec<ActorProfile>, StoreError> {
        Ok(self
            .data
            .staff
            .iter()
            .filter(|s| actor_ids.contains(&s.id))
            .map(|s| ActorProfile {
                actor_id: s.id.clone(),
                display_name: s.display_name(),
                role: s.role.as_str().to_string(),
            })
            .collect())
    }
}

pub fn window_actor() -> Actor {
    Actor::new(String::from("window-1"), String::from("WINDOW_ASSISTANT"))
}

pub fn guard_actor() -> Actor {
    Actor::new(String::from("guard-1"), String::from("BASKET_SECURITY"))
}

pub fn clerk_actor() -> Actor {
    Actor::new(String::from("clerk-1"), String::from("BASKET_DELIVERY_CLERK"))
}

pub fn national_id(value: &str) -> NationalId {
    NationalId::parse(value).unwrap()
}
