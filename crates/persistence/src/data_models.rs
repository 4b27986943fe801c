// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their conversion to domain values.
//!
//! Timestamps are stored as UTC text with microsecond precision
//! (`2026-12-20 09:15:02.123456`), which sorts lexicographically in time
//! order. Dates are stored as `YYYY-MM-DD`.

use std::str::FromStr;

use diesel::prelude::*;
use pedregal_audit::{ActorProfile, LogEntry};
use pedregal_domain::{
    Basket, BasketId, BasketStatus, Gift, GiftId, NationalId, NewWorker, StaffRole, StaffUser,
    Worker, WorkerId,
};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::diesel_schema::{baskets, flow_logs, gift_assignments, gifts, staff_users, workers};
use crate::error::PersistenceError;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:6]");

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Delivery totals shown on the supervision dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryCounters {
    /// Baskets delivered to workers assigned to `HALL_2`.
    pub hall_2_baskets: i64,
    /// Baskets delivered to workers assigned to `HALL_3`.
    pub hall_3_baskets: i64,
    pub total_baskets: i64,
    /// Rows in the gift assignment ledger.
    pub total_gifts: i64,
}

pub fn encode_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(value.to_offset(UtcOffset::UTC).format(TIMESTAMP_FORMAT)?)
}

pub fn decode_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| PersistenceError::CorruptRow(format!("timestamp '{value}': {e}")))
}

pub fn encode_date(value: Date) -> Result<String, PersistenceError> {
    Ok(value.format(DATE_FORMAT)?)
}

fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("date '{value}': {e}")))
}

fn decode_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(decode_timestamp).transpose()
}

fn decode_id<T: FromStr>(kind: &str, value: &str) -> Result<T, PersistenceError> {
    value
        .parse()
        .map_err(|_| PersistenceError::CorruptRow(format!("{kind} id '{value}'")))
}

/// Decodes a status or hall column. Unknown values mean the row was written
/// by something other than this engine.
fn decode_state<T: FromStr>(
    worker: &str,
    field: &'static str,
    value: &str,
) -> Result<T, PersistenceError> {
    value
        .parse()
        .map_err(|_| PersistenceError::UnrecognizedState {
            worker: worker.to_string(),
            field,
            value: value.to_string(),
        })
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = workers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WorkerRow {
    pub worker_id: String,
    pub national_id: String,
    pub full_name: String,
    pub onboarding_date: String,
    pub job_function: Option<String>,
    pub basket_type: Option<String>,
    pub children_count: Option<i32>,
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

impl WorkerRow {
    /// Builds the row for a freshly registered worker.
    pub fn from_new(id: WorkerId, worker: &NewWorker) -> Result<Self, PersistenceError> {
        let now: String = encode_timestamp(OffsetDateTime::now_utc())?;
        Ok(Self {
            worker_id: id.to_string(),
            national_id: worker.national_id.value().to_string(),
            full_name: worker.full_name.clone(),
            onboarding_date: encode_date(worker.onboarding_date)?,
            job_function: worker.job_function.clone(),
            basket_type: worker.basket_type.clone(),
            children_count: worker.children_count.map(i32::from),
            basket_hall: worker.basket_hall.as_str().to_string(),
            gift_hall: worker.gift_hall.map(|h| h.as_str().to_string()),
            basket_status: BasketStatus::Pending.as_str().to_string(),
            gift_status: worker.initial_gift_status().as_str().to_string(),
            basket_item_id: None,
            basket_delivered_at: None,
            gifts_delivered_at: None,
            observation: None,
            observation_at: None,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    pub fn into_worker(self) -> Result<Worker, PersistenceError> {
        let Self {
            worker_id,
            national_id,
            full_name,
            onboarding_date,
            job_function,
            basket_type,
            children_count,
            basket_hall,
            gift_hall,
            basket_status,
            gift_status,
            basket_item_id,
            basket_delivered_at,
            gifts_delivered_at,
            observation,
            observation_at,
            created_at,
            updated_at,
        } = self;
        let id: &str = &worker_id;

        Ok(Worker {
            id: decode_id("worker", id)?,
            national_id: NationalId::parse(&national_id)
                .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?,
            full_name,
            onboarding_date: decode_date(&onboarding_date)?,
            job_function,
            basket_type,
            children_count: children_count
                .map(u16::try_from)
                .transpose()
                .map_err(|e| PersistenceError::CorruptRow(format!("children_count: {e}")))?,
            basket_hall: decode_state(id, "basket_hall", &basket_hall)?,
            gift_hall: gift_hall
                .as_deref()
                .map(|hall| decode_state(id, "gift_hall", hall))
                .transpose()?,
            basket_status: decode_state(id, "basket_status", &basket_status)?,
            gift_status: decode_state(id, "gift_status", &gift_status)?,
            basket_item_id: basket_item_id
                .as_deref()
                .map(|b| decode_id::<BasketId>("basket", b))
                .transpose()?,
            basket_delivered_at: decode_optional_timestamp(basket_delivered_at.as_deref())?,
            gifts_delivered_at: decode_optional_timestamp(gifts_delivered_at.as_deref())?,
            observation,
            observation_at: decode_optional_timestamp(observation_at.as_deref())?,
            created_at: decode_timestamp(&created_at)?,
            updated_at: decode_timestamp(&updated_at)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = baskets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BasketRow {
    pub basket_id: String,
    pub code: String,
    pub created_at: String,
}

impl BasketRow {
    pub fn into_basket(self) -> Result<Basket, PersistenceError> {
        Ok(Basket {
            id: decode_id("basket", &self.basket_id)?,
            code: self.code,
            created_at: decode_timestamp(&self.created_at)?,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = gifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GiftRow {
    pub gift_id: String,
    pub code: String,
    pub created_at: String,
}

impl GiftRow {
    pub fn into_gift(self) -> Result<Gift, PersistenceError> {
        Ok(Gift {
            id: decode_id::<GiftId>("gift", &self.gift_id)?,
            code: self.code,
            created_at: decode_timestamp(&self.created_at)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = gift_assignments)]
pub struct NewAssignmentRow {
    pub worker_id: String,
    pub gift_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = flow_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LogRow {
    pub log_id: i64,
    pub worker_id: String,
    pub actor_id: String,
    pub description: String,
    pub logged_at: String,
}

impl LogRow {
    pub fn into_entry(self) -> Result<LogEntry, PersistenceError> {
        Ok(LogEntry {
            log_id: self.log_id,
            worker_id: decode_id("worker", &self.worker_id)?,
            actor_id: self.actor_id,
            description: self.description,
            logged_at: decode_timestamp(&self.logged_at)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = flow_logs)]
pub struct NewLogRow {
    pub worker_id: String,
    pub actor_id: String,
    pub description: String,
    pub logged_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = staff_users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct StaffRow {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: i32,
}

impl StaffRow {
    pub fn from_user(user: &StaffUser) -> Self {
        Self {
            user_id: user.id.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            role: user.role.as_str().to_string(),
            is_active: i32::from(user.is_active),
        }
    }

    pub fn into_user(self) -> Result<StaffUser, PersistenceError> {
        let role: StaffRole = self.role.parse().map_err(|_| {
            PersistenceError::CorruptRow(format!(
                "staff user {} has role '{}'",
                self.user_id, self.role
            ))
        })?;
        Ok(StaffUser {
            id: self.user_id,
            first_name: self.first_name,
            last_name: self.last_name,
            role,
            is_active: self.is_active != 0,
        })
    }

    pub fn into_profile(self) -> ActorProfile {
        ActorProfile {
            display_name: format!("{} {}", self.first_name, self.last_name),
            actor_id: self.user_id,
            role: self.role,
        }
    }
}
