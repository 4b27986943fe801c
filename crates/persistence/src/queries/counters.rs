// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Delivery totals.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::{BasketHall, BasketStatus};

use crate::data_models::DeliveryCounters;
use crate::diesel_schema::{gift_assignments, workers};
use crate::error::PersistenceError;

fn count_delivered_baskets(
    conn: &mut SqliteConnection,
    hall: BasketHall,
) -> Result<i64, PersistenceError> {
    Ok(workers::table
        .filter(workers::basket_status.eq(BasketStatus::BasketDelivered.as_str()))
        .filter(workers::basket_hall.eq(hall.as_str()))
        .count()
        .get_result(conn)?)
}

/// Counts delivered baskets per hall and gift ledger rows.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn delivery_counters(conn: &mut SqliteConnection) -> Result<DeliveryCounters, PersistenceError> {
    let hall_2_baskets: i64 = count_delivered_baskets(conn, BasketHall::Hall2)?;
    let hall_3_baskets: i64 = count_delivered_baskets(conn, BasketHall::Hall3)?;
    let total_gifts: i64 = gift_assignments::table.count().get_result(conn)?;

    Ok(DeliveryCounters {
        hall_2_baskets,
        hall_3_baskets,
        total_baskets: hall_2_baskets + hall_3_baskets,
        total_gifts,
    })
}
