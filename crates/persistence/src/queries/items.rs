// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Basket and gift queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::{Basket, BasketId, Gift, GiftId};
use tracing::debug;

use crate::data_models::{BasketRow, GiftRow};
use crate::diesel_schema::{baskets, gifts};
use crate::error::PersistenceError;

/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_basket_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<Basket>, PersistenceError> {
    debug!(code, "Looking up basket by code");

    baskets::table
        .filter(baskets::code.eq(code))
        .select(BasketRow::as_select())
        .first(conn)
        .optional()?
        .map(BasketRow::into_basket)
        .transpose()
}

/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_basket_by_id(
    conn: &mut SqliteConnection,
    basket_id: BasketId,
) -> Result<Option<Basket>, PersistenceError> {
    baskets::table
        .find(basket_id.to_string())
        .select(BasketRow::as_select())
        .first(conn)
        .optional()?
        .map(BasketRow::into_basket)
        .transpose()
}

/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_gift_by_code(
    conn: &mut SqliteConnection,
    code: &str,
) -> Result<Option<Gift>, PersistenceError> {
    debug!(code, "Looking up gift by code");

    gifts::table
        .filter(gifts::code.eq(code))
        .select(GiftRow::as_select())
        .first(conn)
        .optional()?
        .map(GiftRow::into_gift)
        .transpose()
}

/// Returns the gifts that exist among `gift_ids`. Repeated ids yield a
/// single row.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn find_gifts_by_ids(
    conn: &mut SqliteConnection,
    gift_ids: &[GiftId],
) -> Result<Vec<Gift>, PersistenceError> {
    let keys: Vec<String> = gift_ids.iter().map(ToString::to_string).collect();
    debug!(requested = keys.len(), "Looking up gifts by id");

    gifts::table
        .filter(gifts::gift_id.eq_any(keys))
        .select(GiftRow::as_select())
        .load(conn)?
        .into_iter()
        .map(GiftRow::into_gift)
        .collect()
}
