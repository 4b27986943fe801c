// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pedregal::{deliver_basket, deliver_gifts, enter_basket_hall, enter_gift_hall, register_at_window};
use pedregal_domain::{BasketHall, BasketRef, GiftHall};

use super::{actor, create_test_persistence, national_id, new_worker};
use crate::{DeliveryCounters, Persistence};

fn deliver_basket_to(persistence: &mut Persistence, nid: &str, hall: BasketHall, code: &str) {
    let mut worker = new_worker(nid, None);
    worker.basket_hall = hall;
    persistence.create_worker(&worker).unwrap();
    persistence.create_basket(code).unwrap();
    let nid = national_id(nid);
    register_at_window(persistence, &actor("window-1"), &nid).unwrap();
    enter_basket_hall(persistence, &actor("guard-1"), &nid).unwrap();
    deliver_basket(
        persistence,
        &actor("clerk-1"),
        &nid,
        &BasketRef::Code(code.to_string()),
    )
    .unwrap();
}

#[test]
fn test_empty_database_counts_zero() {
    let mut persistence = create_test_persistence();

    assert_eq!(
        persistence.delivery_counters().unwrap(),
        DeliveryCounters::default()
    );
}

#[test]
fn test_counters_split_baskets_by_hall() {
    let mut persistence = create_test_persistence();
    deliver_basket_to(&mut persistence, "40000001", BasketHall::Hall2, "B-1");
    deliver_basket_to(&mut persistence, "40000002", BasketHall::Hall3, "B-2");
    deliver_basket_to(&mut persistence, "40000003", BasketHall::Hall3, "B-3");
    // Registered but never served.
    persistence
        .create_worker(&new_worker("40000004", None))
        .unwrap();

    let counters = persistence.delivery_counters().unwrap();

    assert_eq!(counters.hall_2_baskets, 1);
    assert_eq!(counters.hall_3_baskets, 2);
    assert_eq!(counters.total_baskets, 3);
    assert_eq!(counters.total_gifts, 0);
}

#[test]
fn test_counters_count_ledger_rows() {
    let mut persistence = create_test_persistence();
    persistence
        .create_worker(&new_worker("40123456", Some(GiftHall::Hall1)))
        .unwrap();
    let first = persistence.create_gift("G-1").unwrap();
    let second = persistence.create_gift("G-2").unwrap();
    let nid = national_id("40123456");
    register_at_window(&mut persistence, &actor("window-1"), &nid).unwrap();
    enter_gift_hall(&mut persistence, &actor("gift-guard-1"), &nid).unwrap();
    deliver_gifts(
        &mut persistence,
        &actor("gift-clerk-1"),
        &nid,
        &[first.id, second.id],
    )
    .unwrap();

    let counters = persistence.delivery_counters().unwrap();

    assert_eq!(counters.total_gifts, 2);
    assert_eq!(counters.total_baskets, 0);
}
