// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::StaffUser;
use tracing::debug;

use crate::data_models::StaffRow;
use crate::diesel_schema::staff_users;
use crate::error::PersistenceError;

/// Retrieves a staff user by id.
///
/// # Errors
///
/// Returns an error if the query fails or the role cannot be decoded.
/// Returns `Ok(None)` if the user is not found.
pub fn find_by_id(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<StaffUser>, PersistenceError> {
    debug!(user_id, "Looking up staff user");

    staff_users::table
        .find(user_id)
        .select(StaffRow::as_select())
        .first(conn)
        .optional()?
        .map(StaffRow::into_user)
        .transpose()
}

/// Counts staff users, active or not.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(staff_users::table.count().get_result(conn)?)
}
