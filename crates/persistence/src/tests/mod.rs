// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod counter_tests;
mod item_tests;

use pedregal_audit::Actor;
use pedregal_domain::{
    BasketHall, GiftHall, NationalId, NewWorker, StaffRole, StaffUser, parse_date,
};

use crate::Persistence;

/// Staff seeded into every test database: (id, role).
pub const STAFF: [(&str, StaffRole); 7] = [
    ("window-1", StaffRole::WindowAssistant),
    ("guard-1", StaffRole::BasketSecurity),
    ("gift-guard-1", StaffRole::GiftSecurity),
    ("clerk-1", StaffRole::BasketDeliveryClerk),
    ("gift-clerk-1", StaffRole::GiftDeliveryClerk),
    ("lead-1", StaffRole::ProcessLead),
    ("admin-1", StaffRole::Admin),
];

pub fn seed_staff(persistence: &mut Persistence) {
    for (id, role) in STAFF {
        persistence
            .create_staff_user(&StaffUser {
                id: id.to_string(),
                first_name: String::from("Test"),
                last_name: id.to_string(),
                role,
                is_active: true,
            })
            .unwrap();
    }
}

pub fn create_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    seed_staff(&mut persistence);
    persistence
}

pub fn actor(id: &str) -> Actor {
    let role: StaffRole = STAFF
        .iter()
        .find(|(staff_id, _)| *staff_id == id)
        .map(|(_, role)| *role)
        .expect("seeded staff id");
    Actor::new(id.to_string(), role.as_str().to_string())
}

pub fn new_worker(national_id: &str, gift_hall: Option<GiftHall>) -> NewWorker {
    NewWorker {
        national_id: NationalId::parse(national_id).unwrap(),
        full_name: format!("Worker {national_id}"),
        onboarding_date: parse_date("2019-03-01").unwrap(),
        job_function: Some(String::from("Packer")),
        basket_type: None,
        children_count: Some(2),
        basket_hall: BasketHall::Hall2,
        gift_hall,
    }
}

pub fn national_id(value: &str) -> NationalId {
    NationalId::parse(value).unwrap()
}
