// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pedregal_domain::{StaffRole, StaffUser};

use super::create_test_persistence;
use crate::{Persistence, PersistenceError};

#[test]
fn test_duplicate_basket_code_is_conflict() {
    let mut persistence = create_test_persistence();
    persistence.create_basket("B-001").unwrap();

    let result = persistence.create_basket("B-001");

    assert!(matches!(result, Err(PersistenceError::Conflict(_))));
}

#[test]
fn test_basket_and_gift_codes_are_separate_namespaces() {
    let mut persistence = create_test_persistence();

    let basket = persistence.create_basket("X-001").unwrap();
    let gift = persistence.create_gift("X-001").unwrap();

    assert_eq!(basket.code, gift.code);
    assert!(matches!(
        persistence.create_gift("X-001"),
        Err(PersistenceError::Conflict(_))
    ));
}

#[test]
fn test_staff_user_round_trip() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let user = StaffUser {
        id: String::from("u-77"),
        first_name: String::from("Carmen"),
        last_name: String::from("Vela"),
        role: StaffRole::GiftSecurity,
        is_active: false,
    };

    persistence.create_staff_user(&user).unwrap();

    assert_eq!(persistence.get_staff_user("u-77").unwrap(), Some(user.clone()));
    assert!(persistence.get_staff_user("u-78").unwrap().is_none());
    assert!(matches!(
        persistence.create_staff_user(&user),
        Err(PersistenceError::Conflict(_))
    ));
}

#[test]
fn test_staff_count_includes_inactive_users() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.count_staff_users().unwrap(), 0);

    persistence
        .create_staff_user(&StaffUser {
            id: String::from("gone-1"),
            first_name: String::from("Ex"),
            last_name: String::from("Guard"),
            role: StaffRole::BasketSecurity,
            is_active: false,
        })
        .unwrap();

    assert_eq!(persistence.count_staff_users().unwrap(), 1);
}
