// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Basket, gift and gift ledger mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::{Basket, BasketId, Gift, GiftId, WorkerId};
use time::OffsetDateTime;
use tracing::info;

use crate::data_models::{BasketRow, GiftRow, NewAssignmentRow, encode_timestamp};
use crate::diesel_schema::{baskets, gift_assignments, gifts};
use crate::error::PersistenceError;

/// Registers a basket under a unique code.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the code is already in use.
pub fn insert_basket(conn: &mut SqliteConnection, code: &str) -> Result<Basket, PersistenceError> {
    let row: BasketRow = BasketRow {
        basket_id: BasketId::generate().to_string(),
        code: code.to_string(),
        created_at: encode_timestamp(OffsetDateTime::now_utc())?,
    };

    info!(basket_id = %row.basket_id, code, "Creating basket");

    diesel::insert_into(baskets::table)
        .values(&row)
        .execute(conn)?;

    row.into_basket()
}

/// Registers a gift under a unique code.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the code is already in use.
pub fn insert_gift(conn: &mut SqliteConnection, code: &str) -> Result<Gift, PersistenceError> {
    let row: GiftRow = GiftRow {
        gift_id: GiftId::generate().to_string(),
        code: code.to_string(),
        created_at: encode_timestamp(OffsetDateTime::now_utc())?,
    };

    info!(gift_id = %row.gift_id, code, "Creating gift");

    diesel::insert_into(gifts::table)
        .values(&row)
        .execute(conn)?;

    row.into_gift()
}

/// Appends one ledger row per gift.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if a gift is already recorded for
/// the worker or a referenced row does not exist.
pub fn insert_assignments(
    conn: &mut SqliteConnection,
    worker_id: WorkerId,
    gift_ids: &[GiftId],
) -> Result<usize, PersistenceError> {
    let created_at: String = encode_timestamp(OffsetDateTime::now_utc())?;
    let rows: Vec<NewAssignmentRow> = gift_ids
        .iter()
        .map(|gift_id| NewAssignmentRow {
            worker_id: worker_id.to_string(),
            gift_id: gift_id.to_string(),
            created_at: created_at.clone(),
        })
        .collect();

    Ok(diesel::insert_into(gift_assignments::table)
        .values(&rows)
        .execute(conn)?)
}
