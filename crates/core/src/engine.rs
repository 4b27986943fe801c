// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Checkpoint operations.
//!
//! Each operation is a thin wrapper around a transition table: load the
//! worker, classify the current status, then either write the change and
//! its log entry together or leave the store untouched. All of it runs in
//! a single unit of work, so a failure at any step leaves no trace.

use std::collections::HashMap;

use pedregal_audit::{Action, Actor, ActorProfile, LogEntry, NewLogEntry, WorkerFlow};
use pedregal_domain::{
    Basket, BasketRef, DomainError, Gift, GiftId, NationalId, Rejection, StatusChange, Track,
    Verdict, Worker, WorkerId, basket_delivery, basket_hall_entry, gift_delivery,
    gift_eligibility, gift_hall_entry, validate_item_code, window_registration,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::FlowError;
use crate::store::{FlowStore, Settlement, UnitOfWork};

/// Result of a checkpoint operation: a message for the operator and the
/// record the operation was about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOutcome<S> {
    pub message: String,
    pub subject: S,
}

impl<S> FlowOutcome<S> {
    #[must_use]
    pub fn new(message: impl Into<String>, subject: S) -> Self {
        Self {
            message: message.into(),
            subject,
        }
    }
}

fn require_worker(
    store: &mut dyn FlowStore,
    national_id: &NationalId,
) -> Result<Worker, FlowError> {
    store
        .find_worker_by_national_id(national_id)?
        .ok_or_else(|| FlowError::NotFound {
            resource: "worker",
            key: national_id.to_string(),
        })
}

fn record(
    store: &mut dyn FlowStore,
    worker: &Worker,
    actor: &Actor,
    action: &Action,
) -> Result<LogEntry, FlowError> {
    let entry: LogEntry = store.insert_log(&NewLogEntry::new(worker.id, actor, action))?;
    debug!(
        log_id = entry.log_id,
        worker_id = %worker.id,
        actor_id = %actor.id,
        action = %action.name,
        "Recorded log entry"
    );
    Ok(entry)
}

fn reject(rejection: Rejection, national_id: &NationalId) -> FlowError {
    let err: DomainError = rejection.into_error(national_id);
    debug!(error = %err, "Checkpoint rejected worker");
    FlowError::PreconditionViolation(err)
}

/// Looks up a worker by national ID and records the consultation.
///
/// # Arguments
///
/// * `uow` - The transaction boundary
/// * `actor` - The staff member performing the lookup
/// * `national_id` - The scanned national ID
///
/// # Errors
///
/// Returns `FlowError::NotFound` if no worker has this national ID.
pub fn lookup_worker<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
) -> Result<FlowOutcome<Worker>, FlowError> {
    uow.atomic(|store| {
        let worker: Worker = require_worker(store, national_id)?;
        record(store, &worker, actor, &Action::lookup(national_id))?;
        Ok(Settlement::Commit(FlowOutcome::new("Worker found", worker)))
    })
}

/// Registers a worker at the reception window.
///
/// Only `PENDING` workers are registered. Scanning a worker that already
/// passed the window is not an error: the outcome states the current status
/// and nothing is written.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if no worker has this national ID.
pub fn register_at_window<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
) -> Result<FlowOutcome<Worker>, FlowError> {
    uow.atomic(|store| {
        let worker: Worker = require_worker(store, national_id)?;
        match window_registration(worker.basket_status, worker.gift_status) {
            Verdict::Advance(target) => {
                let change: StatusChange = StatusChange {
                    basket_status: Some(target.basket),
                    gift_status: (target.gift != worker.gift_status).then_some(target.gift),
                    ..StatusChange::default()
                };
                let updated: Worker = store.update_worker(worker.id, &change)?;
                record(store, &updated, actor, &Action::window_registration(national_id))?;
                info!(
                    national_id = %national_id,
                    actor_id = %actor.id,
                    gift_status = %updated.gift_status,
                    "Worker registered at window"
                );
                Ok(Settlement::Commit(FlowOutcome::new(
                    format!("Worker {national_id} registered at the window"),
                    updated,
                )))
            }
            Verdict::NoOp(_) => {
                debug!(national_id = %national_id, status = %worker.basket_status, "Repeat window scan");
                Ok(Settlement::Rollback(FlowOutcome::new(
                    format!(
                        "Worker {national_id} was already registered at the window. Current status: {}",
                        worker.basket_status
                    ),
                    worker,
                )))
            }
            Verdict::Reject(rejection) => Err(reject(rejection, national_id)),
        }
    })
}

/// What a hall door scan amounts to once the table has been consulted.
enum HallStep {
    Enter(StatusChange),
    Reenter,
    AlreadyDelivered,
    Refuse(Rejection),
}

fn hall_step<S: PartialEq>(
    verdict: Verdict<S>,
    current: &S,
    change: impl FnOnce(S) -> StatusChange,
) -> HallStep {
    match verdict {
        Verdict::Advance(next) if &next == current => HallStep::Reenter,
        Verdict::Advance(next) => HallStep::Enter(change(next)),
        Verdict::NoOp(_) => HallStep::AlreadyDelivered,
        Verdict::Reject(rejection) => HallStep::Refuse(rejection),
    }
}

fn enter_hall<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
    track: Track,
) -> Result<FlowOutcome<Worker>, FlowError> {
    uow.atomic(|store| {
        let worker: Worker = require_worker(store, national_id)?;
        let step: HallStep = match track {
            Track::Basket => hall_step(
                basket_hall_entry(worker.basket_status),
                &worker.basket_status,
                |next| StatusChange {
                    basket_status: Some(next),
                    ..StatusChange::default()
                },
            ),
            Track::Gift => hall_step(
                gift_hall_entry(worker.gift_hall, worker.gift_status),
                &worker.gift_status,
                |next| StatusChange {
                    gift_status: Some(next),
                    ..StatusChange::default()
                },
            ),
        };

        match step {
            HallStep::Enter(change) => {
                let updated: Worker = store.update_worker(worker.id, &change)?;
                record(store, &updated, actor, &Action::hall_entry(track, national_id, false))?;
                info!(national_id = %national_id, actor_id = %actor.id, %track, "Worker entered hall");
                Ok(Settlement::Commit(FlowOutcome::new(
                    format!("Entry allowed: {} entered the {track} hall", updated.full_name),
                    updated,
                )))
            }
            HallStep::Reenter => {
                record(store, &worker, actor, &Action::hall_entry(track, national_id, true))?;
                info!(national_id = %national_id, actor_id = %actor.id, %track, "Worker re-entered hall");
                Ok(Settlement::Commit(FlowOutcome::new(
                    format!(
                        "Entry allowed: {} was already registered in the {track} hall (re-entry)",
                        worker.full_name
                    ),
                    worker,
                )))
            }
            HallStep::AlreadyDelivered => {
                let item: &str = match track {
                    Track::Basket => "basket",
                    Track::Gift => "gifts",
                };
                Ok(Settlement::Commit(FlowOutcome::new(
                    format!("Worker {national_id} already received their {item} and cannot re-enter"),
                    worker,
                )))
            }
            HallStep::Refuse(rejection) => Err(reject(rejection, national_id)),
        }
    })
}

/// Admits a worker into the basket hall.
///
/// Re-entering while already inside is allowed and logged as a re-entry.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the worker does not exist and
/// `FlowError::PreconditionViolation` if they skipped the window.
pub fn enter_basket_hall<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
) -> Result<FlowOutcome<Worker>, FlowError> {
    enter_hall(uow, actor, national_id, Track::Basket)
}

/// Admits a worker into the gift hall.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the worker does not exist and
/// `FlowError::PreconditionViolation` if they are not eligible for gifts
/// or skipped the window.
pub fn enter_gift_hall<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
) -> Result<FlowOutcome<Worker>, FlowError> {
    enter_hall(uow, actor, national_id, Track::Gift)
}

/// Checks that a scanned basket code exists. Nothing is logged.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the code is unknown.
pub fn validate_basket_code<U: UnitOfWork>(
    uow: &mut U,
    code: &str,
) -> Result<FlowOutcome<Basket>, FlowError> {
    let code: String = validate_item_code(code)?;
    uow.read_only(|store| {
        let basket: Basket = store
            .find_basket_by_code(&code)?
            .ok_or_else(|| FlowError::NotFound {
                resource: "basket",
                key: code.clone(),
            })?;
        Ok(FlowOutcome::new("Basket is valid", basket))
    })
}

/// Checks that a scanned gift code exists. Nothing is logged.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the code is unknown.
pub fn validate_gift_code<U: UnitOfWork>(
    uow: &mut U,
    code: &str,
) -> Result<FlowOutcome<Gift>, FlowError> {
    let code: String = validate_item_code(code)?;
    uow.read_only(|store| {
        let gift: Gift = store
            .find_gift_by_code(&code)?
            .ok_or_else(|| FlowError::NotFound {
                resource: "gift",
                key: code.clone(),
            })?;
        Ok(FlowOutcome::new("Gift is valid", gift))
    })
}

/// Hands a basket to a worker inside the basket hall.
///
/// A worker who already has their basket gets an informational outcome and
/// keeps the basket they were given.
///
/// # Arguments
///
/// * `uow` - The transaction boundary
/// * `actor` - The delivery clerk
/// * `national_id` - The worker's national ID
/// * `basket_ref` - The basket, by id or scanned code
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the worker or basket does not exist,
/// and `FlowError::PreconditionViolation` if the worker has not entered the
/// hall or the basket was already given to someone else.
pub fn deliver_basket<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
    basket_ref: &BasketRef,
) -> Result<FlowOutcome<Worker>, FlowError> {
    uow.atomic(|store| {
        let worker: Worker = require_worker(store, national_id)?;
        let found: Option<Basket> = match basket_ref {
            BasketRef::Id(id) => store.find_basket_by_id(*id)?,
            BasketRef::Code(code) => store.find_basket_by_code(code)?,
        };
        let basket: Basket = found.ok_or_else(|| FlowError::NotFound {
            resource: "basket",
            key: basket_ref.to_string(),
        })?;

        match basket_delivery(worker.basket_status) {
            Verdict::NoOp(_) => {
                debug!(national_id = %national_id, "Repeat basket delivery");
                Ok(Settlement::Rollback(FlowOutcome::new(
                    format!("Worker {national_id} already received their basket"),
                    worker,
                )))
            }
            Verdict::Reject(rejection) => Err(reject(rejection, national_id)),
            Verdict::Advance(next) => {
                if store
                    .find_worker_holding_basket(basket.id)?
                    .is_some_and(|holder| holder.id != worker.id)
                {
                    return Err(DomainError::BasketAlreadyAssigned {
                        basket_code: basket.code,
                    }
                    .into());
                }

                let change: StatusChange = StatusChange {
                    basket_status: Some(next),
                    basket_item_id: Some(basket.id),
                    basket_delivered_at: Some(OffsetDateTime::now_utc()),
                    ..StatusChange::default()
                };
                let updated: Worker = store.update_worker(worker.id, &change)?;
                record(
                    store,
                    &updated,
                    actor,
                    &Action::basket_delivery(national_id, &basket.code),
                )?;
                info!(
                    national_id = %national_id,
                    actor_id = %actor.id,
                    basket = %basket.code,
                    "Basket delivered"
                );
                Ok(Settlement::Commit(FlowOutcome::new(
                    format!("Basket {} delivered to {}", basket.code, updated.full_name),
                    updated,
                )))
            }
        }
    })
}

/// Hands gifts to an eligible worker inside the gift hall.
///
/// Every requested gift must exist; a partially valid list is refused as a
/// whole. On success one ledger row per gift and a single log entry listing
/// all gift codes are written.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the worker does not exist, and
/// `FlowError::PreconditionViolation` if the worker is not eligible, any
/// gift is missing, or the worker has not entered the gift hall.
pub fn deliver_gifts<U: UnitOfWork>(
    uow: &mut U,
    actor: &Actor,
    national_id: &NationalId,
    gift_ids: &[GiftId],
) -> Result<FlowOutcome<Worker>, FlowError> {
    if gift_ids.is_empty() {
        return Err(DomainError::EmptyGiftList.into());
    }
    uow.atomic(|store| {
        let worker: Worker = require_worker(store, national_id)?;
        gift_eligibility(worker.gift_hall).map_err(|rejection| reject(rejection, national_id))?;

        let gifts: Vec<Gift> = store.find_gifts_by_ids(gift_ids)?;
        if gifts.len() != gift_ids.len() {
            return Err(DomainError::GiftsNotFound {
                requested: gift_ids.len(),
                found: gifts.len(),
            }
            .into());
        }

        match gift_delivery(worker.gift_status) {
            Verdict::NoOp(_) => {
                debug!(national_id = %national_id, "Repeat gift delivery");
                Ok(Settlement::Rollback(FlowOutcome::new(
                    format!("Worker {national_id} already received their gifts"),
                    worker,
                )))
            }
            Verdict::Reject(rejection) => Err(reject(rejection, national_id)),
            Verdict::Advance(next) => {
                let change: StatusChange = StatusChange {
                    gift_status: Some(next),
                    gifts_delivered_at: Some(OffsetDateTime::now_utc()),
                    ..StatusChange::default()
                };
                let updated: Worker = store.update_worker(worker.id, &change)?;
                store.insert_gift_assignments(worker.id, gift_ids)?;

                let codes_by_id: HashMap<GiftId, &str> =
                    gifts.iter().map(|g| (g.id, g.code.as_str())).collect();
                let codes: Vec<String> = gift_ids
                    .iter()
                    .filter_map(|id| codes_by_id.get(id))
                    .map(ToString::to_string)
                    .collect();
                record(
                    store,
                    &updated,
                    actor,
                    &Action::gift_delivery(national_id, &codes),
                )?;
                info!(
                    national_id = %national_id,
                    actor_id = %actor.id,
                    gift_count = codes.len(),
                    "Gifts delivered"
                );
                Ok(Settlement::Commit(FlowOutcome::new(
                    format!("{} gift(s) delivered to {}", codes.len(), updated.full_name),
                    updated,
                )))
            }
        }
    })
}

/// Rebuilds a worker's flow from their log.
///
/// # Errors
///
/// Returns `FlowError::NotFound` if the worker does not exist.
pub fn worker_flow<U: UnitOfWork>(
    uow: &mut U,
    worker_id: WorkerId,
) -> Result<WorkerFlow, FlowError> {
    uow.read_only(|store| {
        let worker: Worker = store
            .find_worker_by_id(worker_id)?
            .ok_or_else(|| FlowError::NotFound {
                resource: "worker",
                key: worker_id.to_string(),
            })?;
        let logs: Vec<LogEntry> = store.find_logs_by_worker(worker_id)?;

        let mut actor_ids: Vec<String> = logs.iter().map(|l| l.actor_id.clone()).collect();
        actor_ids.sort();
        actor_ids.dedup();
        let profiles: HashMap<String, ActorProfile> = store
            .find_actor_profiles(&actor_ids)?
            .into_iter()
            .map(|profile| (profile.actor_id.clone(), profile))
            .collect();

        Ok(pedregal_audit::reconstruct_flow(worker, logs, &profiles))
    })
}
