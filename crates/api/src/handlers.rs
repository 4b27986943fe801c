// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for checkpoint and administrative operations.
//!
//! Every handler authorizes the actor first, then parses its input into
//! domain types, then calls the flow engine or persistence. Nothing is
//! written when authorization or parsing fails.

use pedregal::FlowOutcome;
use pedregal_audit::{ActorActivity, LogEntry, WorkerFlow};
use pedregal_domain::{
    Basket, BasketHall, BasketRef, Gift, GiftHall, GiftId, NationalId, NewWorker, StaffRole,
    StaffUser, Worker, WorkerAmendment, WorkerId, parse_date, parse_gift_ids, validate_item_code,
    validate_name, validate_observation,
};
use pedregal_persistence::{DeliveryCounters, Persistence};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService, Operation};
use crate::error::{
    ApiError, translate_domain_error, translate_flow_error, translate_persistence_error,
};
use crate::request_response::{
    ActorActivityInfo, BasketInfo, BasketResponse, CountersResponse, CreateItemRequest,
    CreateStaffRequest, CreateWorkerRequest, DeleteResponse, DeliverBasketRequest,
    DeliverGiftsRequest, FlowSummaryInfo, GiftInfo, GiftResponse, LogEntryInfo,
    LogListResponse, NationalIdRequest, ObservationRequest, StaffInfo, UpdateWorkerRequest,
    WorkerFlowResponse, WorkerInfo, WorkerResponse,
};

// ============================================================================
// Conversions
// ============================================================================

fn rfc3339(value: OffsetDateTime) -> Result<String, ApiError> {
    value.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn optional_rfc3339(value: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    value.map(rfc3339).transpose()
}

fn worker_info(worker: &Worker) -> Result<WorkerInfo, ApiError> {
    Ok(WorkerInfo {
        worker_id: worker.id.to_string(),
        national_id: worker.national_id.to_string(),
        full_name: worker.full_name.clone(),
        onboarding_date: worker.onboarding_date.to_string(),
        job_function: worker.job_function.clone(),
        basket_type: worker.basket_type.clone(),
        children_count: worker.children_count,
        basket_hall: worker.basket_hall.as_str().to_string(),
        gift_hall: worker.gift_hall.map(|h| h.as_str().to_string()),
        basket_status: worker.basket_status.as_str().to_string(),
        gift_status: worker.gift_status.as_str().to_string(),
        basket_item_id: worker.basket_item_id.map(|id| id.to_string()),
        basket_delivered_at: optional_rfc3339(worker.basket_delivered_at)?,
        gifts_delivered_at: optional_rfc3339(worker.gifts_delivered_at)?,
        observation: worker.observation.clone(),
        observation_at: optional_rfc3339(worker.observation_at)?,
        created_at: rfc3339(worker.created_at)?,
        updated_at: rfc3339(worker.updated_at)?,
    })
}

fn worker_response(outcome: FlowOutcome<Worker>) -> Result<WorkerResponse, ApiError> {
    Ok(WorkerResponse {
        worker: worker_info(&outcome.subject)?,
        message: outcome.message,
    })
}

fn basket_info(basket: &Basket) -> Result<BasketInfo, ApiError> {
    Ok(BasketInfo {
        basket_id: basket.id.to_string(),
        code: basket.code.clone(),
        created_at: rfc3339(basket.created_at)?,
    })
}

fn gift_info(gift: &Gift) -> Result<GiftInfo, ApiError> {
    Ok(GiftInfo {
        gift_id: gift.id.to_string(),
        code: gift.code.clone(),
        created_at: rfc3339(gift.created_at)?,
    })
}

fn log_info(entry: &LogEntry) -> Result<LogEntryInfo, ApiError> {
    Ok(LogEntryInfo {
        log_id: entry.log_id,
        worker_id: entry.worker_id.to_string(),
        actor_id: entry.actor_id.clone(),
        description: entry.description.clone(),
        logged_at: rfc3339(entry.logged_at)?,
    })
}

fn log_list(entries: &[LogEntry]) -> Result<LogListResponse, ApiError> {
    Ok(LogListResponse {
        logs: entries.iter().map(log_info).collect::<Result<_, _>>()?,
    })
}

fn activity_info(activity: &ActorActivity) -> ActorActivityInfo {
    ActorActivityInfo {
        actor_id: activity.actor_id.clone(),
        display_name: activity.display_name.clone(),
        role: activity.role.clone(),
        action_count: activity.action_count,
    }
}

fn flow_response(flow: &WorkerFlow) -> Result<WorkerFlowResponse, ApiError> {
    let summary: FlowSummaryInfo = FlowSummaryInfo {
        total_logs: flow.summary.total_logs,
        first_action: flow.summary.first_action.as_ref().map(log_info).transpose()?,
        last_action: flow.summary.last_action.as_ref().map(log_info).transpose()?,
        basket_status: flow.summary.basket_status.as_str().to_string(),
        gift_status: flow.summary.gift_status.as_str().to_string(),
        actors: flow.summary.actors.iter().map(activity_info).collect(),
    };
    Ok(WorkerFlowResponse {
        worker: worker_info(&flow.worker)?,
        logs: flow.logs.iter().map(log_info).collect::<Result<_, _>>()?,
        summary,
    })
}

fn staff_info(user: &StaffUser) -> StaffInfo {
    StaffInfo {
        user_id: user.id.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        role: user.role.as_str().to_string(),
        is_active: user.is_active,
    }
}

// ============================================================================
// Input parsing
// ============================================================================

fn parse_national_id(raw: &str) -> Result<NationalId, ApiError> {
    NationalId::parse(raw).map_err(translate_domain_error)
}

fn parse_worker_id(raw: &str) -> Result<WorkerId, ApiError> {
    raw.parse::<WorkerId>().map_err(translate_domain_error)
}

fn parse_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

fn parse_gift_hall(value: Option<&str>) -> Result<Option<GiftHall>, ApiError> {
    value
        .map(str::parse::<GiftHall>)
        .transpose()
        .map_err(translate_domain_error)
}

fn require_worker(persistence: &mut Persistence, worker_id: WorkerId) -> Result<Worker, ApiError> {
    persistence
        .get_worker(worker_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Worker"),
            message: format!("No worker matches '{worker_id}'"),
        })
}

// ============================================================================
// Checkpoint operations
// ============================================================================

/// Looks up a worker by national ID at any checkpoint.
///
/// # Errors
///
/// Returns an error if the actor is not authorized, the national ID is
/// malformed, or no worker has it.
pub fn lookup_worker(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    national_id: &str,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::LookupWorker)?;
    let national_id: NationalId = parse_national_id(national_id)?;
    info!(actor_id = %actor.id, national_id = %national_id, "Handling lookup_worker request");

    let outcome: FlowOutcome<Worker> =
        pedregal::lookup_worker(persistence, &actor.to_audit_actor(), &national_id)
            .map_err(translate_flow_error)?;
    worker_response(outcome)
}

/// Registers a worker at the reception window.
///
/// # Errors
///
/// Returns an error if the actor is not a window assistant, the national
/// ID is malformed, or no worker has it.
pub fn register_at_window(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &NationalIdRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::RegisterAtWindow)?;
    let national_id: NationalId = parse_national_id(&request.national_id)?;
    info!(actor_id = %actor.id, national_id = %national_id, "Handling register_at_window request");

    let outcome: FlowOutcome<Worker> =
        pedregal::register_at_window(persistence, &actor.to_audit_actor(), &national_id)
            .map_err(translate_flow_error)?;
    worker_response(outcome)
}

/// Admits a worker into the basket hall.
///
/// # Errors
///
/// Returns an error if the actor is not basket security, the worker does
/// not exist, or they have not passed the window.
pub fn enter_basket_hall(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &NationalIdRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::EnterBasketHall)?;
    let national_id: NationalId = parse_national_id(&request.national_id)?;
    info!(actor_id = %actor.id, national_id = %national_id, "Handling enter_basket_hall request");

    let outcome: FlowOutcome<Worker> =
        pedregal::enter_basket_hall(persistence, &actor.to_audit_actor(), &national_id)
            .map_err(translate_flow_error)?;
    worker_response(outcome)
}

/// Admits a worker into the gift hall.
///
/// # Errors
///
/// Returns an error if the actor is not gift security, the worker does not
/// exist, is not eligible for gifts, or has not passed the window.
pub fn enter_gift_hall(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &NationalIdRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::EnterGiftHall)?;
    let national_id: NationalId = parse_national_id(&request.national_id)?;
    info!(actor_id = %actor.id, national_id = %national_id, "Handling enter_gift_hall request");

    let outcome: FlowOutcome<Worker> =
        pedregal::enter_gift_hall(persistence, &actor.to_audit_actor(), &national_id)
            .map_err(translate_flow_error)?;
    worker_response(outcome)
}

/// Checks a scanned basket code.
///
/// # Errors
///
/// Returns an error if the actor is not a basket clerk or the code is
/// blank or unknown.
pub fn validate_basket_code(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    code: &str,
) -> Result<BasketResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ValidateBasketCode)?;
    let outcome: FlowOutcome<Basket> =
        pedregal::validate_basket_code(persistence, code).map_err(translate_flow_error)?;
    Ok(BasketResponse {
        basket: basket_info(&outcome.subject)?,
        message: outcome.message,
    })
}

/// Checks a scanned gift code.
///
/// # Errors
///
/// Returns an error if the actor is not a gift clerk or the code is blank
/// or unknown.
pub fn validate_gift_code(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    code: &str,
) -> Result<GiftResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ValidateGiftCode)?;
    let outcome: FlowOutcome<Gift> =
        pedregal::validate_gift_code(persistence, code).map_err(translate_flow_error)?;
    Ok(GiftResponse {
        gift: gift_info(&outcome.subject)?,
        message: outcome.message,
    })
}

/// Hands a basket to a worker.
///
/// # Errors
///
/// Returns an error if the actor is not a basket clerk, the worker or
/// basket does not exist, the worker has not entered the hall, or the
/// basket belongs to someone else.
pub fn deliver_basket(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &DeliverBasketRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::DeliverBasket)?;
    let national_id: NationalId = parse_national_id(&request.national_id)?;
    let basket: BasketRef = BasketRef::parse(&request.basket).map_err(translate_domain_error)?;
    info!(
        actor_id = %actor.id,
        national_id = %national_id,
        basket = %basket,
        "Handling deliver_basket request"
    );

    let outcome: FlowOutcome<Worker> =
        pedregal::deliver_basket(persistence, &actor.to_audit_actor(), &national_id, &basket)
            .map_err(translate_flow_error)?;
    worker_response(outcome)
}

/// Hands one or more gifts to a worker.
///
/// # Errors
///
/// Returns an error if the actor is not a gift clerk, the gift list is
/// empty or malformed, any gift does not exist, or the worker is not ready.
pub fn deliver_gifts(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &DeliverGiftsRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::DeliverGifts)?;
    let national_id: NationalId = parse_national_id(&request.national_id)?;
    let gift_ids: Vec<GiftId> = parse_gift_ids(&request.gift_ids).map_err(translate_domain_error)?;
    info!(
        actor_id = %actor.id,
        national_id = %national_id,
        gift_count = gift_ids.len(),
        "Handling deliver_gifts request"
    );

    let outcome: FlowOutcome<Worker> =
        pedregal::deliver_gifts(persistence, &actor.to_audit_actor(), &national_id, &gift_ids)
            .map_err(translate_flow_error)?;
    worker_response(outcome)
}

/// Reconstructs a worker's flow from their log.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor or the worker does
/// not exist.
pub fn get_worker_flow(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    worker_id: &str,
) -> Result<WorkerFlowResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ViewWorkerFlow)?;
    let worker_id: WorkerId = parse_worker_id(worker_id)?;
    let flow: WorkerFlow =
        pedregal::worker_flow(persistence, worker_id).map_err(translate_flow_error)?;
    flow_response(&flow)
}

// ============================================================================
// Workers
// ============================================================================

/// Registers a worker before the event.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, any field is invalid, or
/// the national ID is taken.
pub fn create_worker(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateWorkerRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageWorkers)?;
    let new_worker: NewWorker = NewWorker {
        national_id: parse_national_id(&request.national_id)?,
        full_name: validate_name(&request.full_name).map_err(translate_domain_error)?,
        onboarding_date: parse_date(&request.onboarding_date).map_err(translate_domain_error)?,
        job_function: parse_optional_text(request.job_function.as_deref()),
        basket_type: parse_optional_text(request.basket_type.as_deref()),
        children_count: request.children_count,
        basket_hall: request
            .basket_hall
            .parse::<BasketHall>()
            .map_err(translate_domain_error)?,
        gift_hall: parse_gift_hall(request.gift_hall.as_deref())?,
    };

    let worker: Worker = persistence
        .create_worker(&new_worker)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, worker_id = %worker.id, "Registered worker");

    Ok(WorkerResponse {
        message: format!("Worker {} registered", worker.national_id),
        worker: worker_info(&worker)?,
    })
}

/// # Errors
///
/// Returns an error if the actor is not an admin or the worker does not
/// exist.
pub fn get_worker(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    worker_id: &str,
) -> Result<WorkerInfo, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageWorkers)?;
    let worker: Worker = require_worker(persistence, parse_worker_id(worker_id)?)?;
    worker_info(&worker)
}

/// Edits a worker's identity and hall assignment.
///
/// Checkpoint statuses cannot be edited.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, any field is invalid, the
/// worker does not exist, or the new national ID is taken.
pub fn update_worker(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    worker_id: &str,
    request: &UpdateWorkerRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageWorkers)?;
    let worker_id: WorkerId = parse_worker_id(worker_id)?;

    let amendment: WorkerAmendment = WorkerAmendment {
        national_id: request
            .national_id
            .as_deref()
            .map(parse_national_id)
            .transpose()?,
        full_name: request
            .full_name
            .as_deref()
            .map(validate_name)
            .transpose()
            .map_err(translate_domain_error)?,
        onboarding_date: request
            .onboarding_date
            .as_deref()
            .map(parse_date)
            .transpose()
            .map_err(translate_domain_error)?,
        job_function: request
            .job_function
            .as_ref()
            .map(|v| parse_optional_text(v.as_deref())),
        basket_type: request
            .basket_type
            .as_ref()
            .map(|v| parse_optional_text(v.as_deref())),
        children_count: request.children_count,
        basket_hall: request
            .basket_hall
            .as_deref()
            .map(str::parse::<BasketHall>)
            .transpose()
            .map_err(translate_domain_error)?,
        gift_hall: request
            .gift_hall
            .as_ref()
            .map(|v| parse_gift_hall(v.as_deref()))
            .transpose()?,
    };

    let worker: Worker = persistence
        .update_worker(worker_id, &amendment)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, worker_id = %worker_id, "Updated worker");

    Ok(WorkerResponse {
        message: format!("Worker {} updated", worker.national_id),
        worker: worker_info(&worker)?,
    })
}

/// Removes a worker together with their log and gift ledger.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the worker does not
/// exist.
pub fn delete_worker(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    worker_id: &str,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageWorkers)?;
    let worker_id: WorkerId = parse_worker_id(worker_id)?;
    persistence
        .delete_worker(worker_id)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, worker_id = %worker_id, "Deleted worker");

    Ok(DeleteResponse {
        message: format!("Worker {worker_id} deleted"),
    })
}

/// Records a supervisor's observation on a worker.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor, the note is blank or
/// too long, or the worker does not exist.
pub fn record_observation(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    worker_id: &str,
    request: &ObservationRequest,
) -> Result<WorkerResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::RecordObservation)?;
    let worker_id: WorkerId = parse_worker_id(worker_id)?;
    let observation: String =
        validate_observation(&request.observation).map_err(translate_domain_error)?;

    let worker: Worker = persistence
        .record_observation(worker_id, &observation)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, worker_id = %worker_id, "Recorded observation");

    Ok(WorkerResponse {
        message: String::from("Observation recorded"),
        worker: worker_info(&worker)?,
    })
}

// ============================================================================
// Inventory and staff
// ============================================================================

/// # Errors
///
/// Returns an error if the actor is not an admin, the code is invalid, or
/// a basket with this code exists.
pub fn create_basket(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateItemRequest,
) -> Result<BasketResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageInventory)?;
    let code: String = validate_item_code(&request.code).map_err(translate_domain_error)?;
    let basket: Basket = persistence
        .create_basket(&code)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, code = %basket.code, "Created basket");

    Ok(BasketResponse {
        message: format!("Basket {} created", basket.code),
        basket: basket_info(&basket)?,
    })
}

/// # Errors
///
/// Returns an error if the actor is not an admin, the code is invalid, or
/// a gift with this code exists.
pub fn create_gift(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateItemRequest,
) -> Result<GiftResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageInventory)?;
    let code: String = validate_item_code(&request.code).map_err(translate_domain_error)?;
    let gift: Gift = persistence
        .create_gift(&code)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, code = %gift.code, "Created gift");

    Ok(GiftResponse {
        message: format!("Gift {} created", gift.code),
        gift: gift_info(&gift)?,
    })
}

/// Adds a staff member.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, a field is invalid, or
/// the id is taken.
pub fn create_staff_user(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    request: &CreateStaffRequest,
) -> Result<StaffInfo, ApiError> {
    AuthorizationService::authorize(actor, Operation::ManageStaff)?;
    let user_id: String = request.user_id.trim().to_string();
    if user_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("user ID cannot be empty"),
        });
    }
    let user: StaffUser = StaffUser {
        id: user_id,
        first_name: validate_name(&request.first_name).map_err(translate_domain_error)?,
        last_name: validate_name(&request.last_name).map_err(translate_domain_error)?,
        role: request
            .role
            .parse::<StaffRole>()
            .map_err(translate_domain_error)?,
        is_active: request.is_active,
    };

    persistence
        .create_staff_user(&user)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, user_id = %user.id, role = %user.role, "Created staff user");

    Ok(staff_info(&user))
}

/// Creates the first admin on a database with no staff.
///
/// Actors are resolved against the staff table, so an empty table would
/// lock everyone out. Once any staff user exists this refuses and admins
/// are added through [`create_staff_user`].
///
/// # Errors
///
/// Returns `ApiError::Conflict` if staff users already exist.
pub fn bootstrap_admin(
    persistence: &mut Persistence,
    user_id: &str,
) -> Result<StaffInfo, ApiError> {
    let staff_count: i64 = persistence
        .count_staff_users()
        .map_err(translate_persistence_error)?;
    if staff_count > 0 {
        return Err(ApiError::Conflict {
            message: String::from("Staff users already exist; bootstrap is not available"),
        });
    }

    let user_id: String = user_id.trim().to_string();
    if user_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("user_id"),
            message: String::from("user ID cannot be empty"),
        });
    }
    let user: StaffUser = StaffUser {
        id: user_id,
        first_name: String::from("System"),
        last_name: String::from("Administrator"),
        role: StaffRole::Admin,
        is_active: true,
    };
    persistence
        .create_staff_user(&user)
        .map_err(translate_persistence_error)?;
    info!(user_id = %user.id, "Bootstrapped first admin");

    Ok(staff_info(&user))
}

// ============================================================================
// Logs and counters
// ============================================================================

/// Lists a worker's log entries, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor or the worker does
/// not exist.
pub fn list_logs_by_worker(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    worker_id: &str,
) -> Result<LogListResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ReadLogs)?;
    let worker: Worker = require_worker(persistence, parse_worker_id(worker_id)?)?;
    let entries: Vec<LogEntry> = persistence
        .list_logs_by_worker(worker.id)
        .map_err(translate_persistence_error)?;
    log_list(&entries)
}

/// Lists the entries recorded by one staff member, newest first.
///
/// # Errors
///
/// Returns an error if the actor is not a supervisor.
pub fn list_logs_by_actor(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    actor_id: &str,
) -> Result<LogListResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ReadLogs)?;
    let entries: Vec<LogEntry> = persistence
        .list_logs_by_actor(actor_id.trim())
        .map_err(translate_persistence_error)?;
    log_list(&entries)
}

/// Purges a single log entry.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or no entry has this id.
pub fn delete_log(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    log_id: i64,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::PurgeLogs)?;
    persistence
        .delete_log(log_id)
        .map_err(translate_persistence_error)?;
    info!(actor_id = %actor.id, log_id = log_id, "Purged log entry");

    Ok(DeleteResponse {
        message: format!("Log entry {log_id} deleted"),
    })
}

/// # Errors
///
/// Returns an error if the actor is not a supervisor.
pub fn get_counters(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<CountersResponse, ApiError> {
    AuthorizationService::authorize(actor, Operation::ViewCounters)?;
    let counters: DeliveryCounters = persistence
        .delivery_counters()
        .map_err(translate_persistence_error)?;
    Ok(CountersResponse {
        hall_2_baskets: counters.hall_2_baskets,
        hall_3_baskets: counters.hall_3_baskets,
        total_baskets: counters.total_baskets,
        total_gifts: counters.total_gifts,
    })
}
