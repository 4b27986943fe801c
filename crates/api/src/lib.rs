// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the El Pedregal flow engine.
//!
//! This crate sits between the HTTP server and the engine. It resolves
//! actors, enforces the role table, turns request DTOs into domain values
//! and maps engine and persistence errors onto the API error contract.
//! The engine itself performs no role checks.

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

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Operation};
pub use error::{
    ApiError, AuthError, translate_domain_error, translate_flow_error,
    translate_persistence_error,
};
pub use handlers::{
    bootstrap_admin, create_basket, create_gift, create_staff_user, create_worker, delete_log,
    delete_worker, deliver_basket, deliver_gifts, enter_basket_hall, enter_gift_hall,
    get_counters, get_worker, get_worker_flow, list_logs_by_actor, list_logs_by_worker,
    lookup_worker, record_observation, register_at_window, update_worker, validate_basket_code,
    validate_gift_code,
};
pub use request_response::{
    ActorActivityInfo, BasketInfo, BasketResponse, CountersResponse, CreateItemRequest,
    CreateStaffRequest, CreateWorkerRequest, DeleteResponse, DeliverBasketRequest,
    DeliverGiftsRequest, FlowSummaryInfo, GiftInfo, GiftResponse, LogEntryInfo,
    LogListResponse, NationalIdRequest, ObservationRequest, StaffInfo, UpdateWorkerRequest,
    WorkerFlowResponse, WorkerInfo, WorkerResponse,
};
