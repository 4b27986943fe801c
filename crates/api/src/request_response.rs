// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Timestamps are RFC 3339 strings; dates are `YYYY-MM-DD`.

use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field from an explicit `null`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Checkpoint requests
// ============================================================================

/// A scanned national ID, used by the window and both hall entrances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalIdRequest {
    pub national_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverBasketRequest {
    pub national_id: String,
    /// Basket id (UUID) or scanned basket code.
    pub basket: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverGiftsRequest {
    pub national_id: String,
    /// Gift ids (UUIDs), in scan order.
    pub gift_ids: Vec<String>,
}

// ============================================================================
// Admin requests
// ============================================================================

/// API request to register a worker before the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorkerRequest {
    pub national_id: String,
    pub full_name: String,
    /// Onboarding date (ISO 8601).
    pub onboarding_date: String,
    #[serde(default)]
    pub job_function: Option<String>,
    #[serde(default)]
    pub basket_type: Option<String>,
    #[serde(default)]
    pub children_count: Option<u16>,
    /// `HALL_2` or `HALL_3`.
    pub basket_hall: String,
    /// `HALL_1`, or absent for workers without gifts.
    #[serde(default)]
    pub gift_hall: Option<String>,
}

/// API request to edit a worker.
///
/// Absent fields are left untouched. For nullable fields an explicit `null`
/// clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWorkerRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onboarding_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub job_function: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub basket_type: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub children_count: Option<Option<u16>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basket_hall: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub gift_hall: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRequest {
    pub observation: String,
}

/// API request to register a basket or gift by its printed code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaffRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

// ============================================================================
// Responses
// ============================================================================

/// A worker record as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerInfo {
    pub worker_id: String,
    pub national_id: String,
    pub full_name: String,
    pub onboarding_date: String,
    pub job_function: Option<String>,
    pub basket_type: Option<String>,
    pub children_count: Option<u16>,
    pub basket_hall: String,
    pub gift_hall: Option<String>,
    pub basket_status: String,
    pub gift_status: String,
    pub basket_item_id: Option<String>,
    pub basket_delivered_at: Option<String>,
    pub gifts_delivered_at: Option<String>,
    pub observation: Option<String>,
    pub observation_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Outcome of a checkpoint operation or worker edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub message: String,
    pub worker: WorkerInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketInfo {
    pub basket_id: String,
    pub code: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketResponse {
    pub message: String,
    pub basket: BasketInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftInfo {
    pub gift_id: String,
    pub code: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GiftResponse {
    pub message: String,
    pub gift: GiftInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryInfo {
    pub log_id: i64,
    pub worker_id: String,
    pub actor_id: String,
    pub description: String,
    pub logged_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogListResponse {
    /// Newest first.
    pub logs: Vec<LogEntryInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorActivityInfo {
    pub actor_id: String,
    /// Absent when the actor has no staff profile.
    pub display_name: Option<String>,
    pub role: Option<String>,
    pub action_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSummaryInfo {
    pub total_logs: usize,
    pub first_action: Option<LogEntryInfo>,
    pub last_action: Option<LogEntryInfo>,
    pub basket_status: String,
    pub gift_status: String,
    /// Most active first.
    pub actors: Vec<ActorActivityInfo>,
}

/// A worker's reconstructed flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerFlowResponse {
    pub worker: WorkerInfo,
    pub logs: Vec<LogEntryInfo>,
    pub summary: FlowSummaryInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInfo {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountersResponse {
    pub hall_2_baskets: i64,
    pub hall_3_baskets: i64,
    pub total_baskets: i64,
    pub total_gifts: i64,
}

/// Acknowledges a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}
