// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use pedregal_domain::{StaffRole, StaffUser};
use pedregal_persistence::Persistence;

use crate::{AuthenticatedActor, CreateWorkerRequest, WorkerResponse, create_worker};

pub const ALL_ROLES: [StaffRole; 7] = [
    StaffRole::WindowAssistant,
    StaffRole::BasketSecurity,
    StaffRole::GiftSecurity,
    StaffRole::BasketDeliveryClerk,
    StaffRole::GiftDeliveryClerk,
    StaffRole::ProcessLead,
    StaffRole::Admin,
];

/// The staff id seeded for a role, e.g. `window_assistant`.
pub fn staff_id(role: StaffRole) -> String {
    role.as_str().to_lowercase()
}

/// Creates a database with one active staff member per role and one
/// inactive admin named `retired`.
pub fn create_test_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    for role in ALL_ROLES {
        persistence
            .create_staff_user(&StaffUser {
                id: staff_id(role),
                first_name: String::from("Test"),
                last_name: role.as_str().to_string(),
                role,
                is_active: true,
            })
            .unwrap();
    }
    persistence
        .create_staff_user(&StaffUser {
            id: String::from("retired"),
            first_name: String::from("Old"),
            last_name: String::from("Admin"),
            role: StaffRole::Admin,
            is_active: false,
        })
        .unwrap();
    persistence
}

pub fn actor(role: StaffRole) -> AuthenticatedActor {
    AuthenticatedActor::new(
        staff_id(role),
        role,
        format!("Test {}", role.as_str()),
    )
}

pub fn worker_request(national_id: &str, gift_hall: Option<&str>) -> CreateWorkerRequest {
    CreateWorkerRequest {
        national_id: national_id.to_string(),
        full_name: String::from("Ana Torres"),
        onboarding_date: String::from("2018-06-11"),
        job_function: Some(String::from("Harvester")),
        basket_type: None,
        children_count: Some(1),
        basket_hall: String::from("HALL_2"),
        gift_hall: gift_hall.map(ToString::to_string),
    }
}

pub fn seed_worker(
    persistence: &mut Persistence,
    national_id: &str,
    gift_hall: Option<&str>,
) -> WorkerResponse {
    create_worker(
        persistence,
        &actor(StaffRole::Admin),
        &worker_request(national_id, gift_hall),
    )
    .unwrap()
}
