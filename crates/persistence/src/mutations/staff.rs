// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use pedregal_domain::StaffUser;
use tracing::info;

use crate::data_models::StaffRow;
use crate::diesel_schema::staff_users;
use crate::error::PersistenceError;

/// Creates a staff user.
///
/// # Errors
///
/// Returns `PersistenceError::Conflict` if the id is already in use.
pub fn insert_staff_user(
    conn: &mut SqliteConnection,
    user: &StaffUser,
) -> Result<(), PersistenceError> {
    info!(user_id = %user.id, role = %user.role, "Creating staff user");

    diesel::insert_into(staff_users::table)
        .values(&StaffRow::from_user(user))
        .execute(conn)?;
    Ok(())
}
