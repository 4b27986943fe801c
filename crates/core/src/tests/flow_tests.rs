// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pedregal_domain::{BasketRef, BasketStatus, GiftStatus, WorkerId};

use super::helpers::{MemoryStore, clerk_actor, guard_actor, national_id, window_actor};
use crate::{
    FlowError, deliver_basket, enter_basket_hall, lookup_worker, register_at_window, worker_flow,
};

#[test]
fn test_full_basket_journey_reconstructs_in_order() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::Pending,
        None,
        GiftStatus::NotEligible,
    );
    store.add_basket("B-001");
    let nid = national_id("40123456");

    lookup_worker(&mut store, &window_actor(), &nid).unwrap();
    register_at_window(&mut store, &window_actor(), &nid).unwrap();
    enter_basket_hall(&mut store, &guard_actor(), &nid).unwrap();
    deliver_basket(
        &mut store,
        &clerk_actor(),
        &nid,
        &BasketRef::Code(String::from("B-001")),
    )
    .unwrap();

    let flow = worker_flow(&mut store, worker.id).unwrap();

    assert_eq!(flow.summary.total_logs, 4);
    assert_eq!(flow.summary.basket_status, BasketStatus::BasketDelivered);
    assert!(flow.logs[0].description.starts_with("BASKET_DELIVERY"));
    assert!(flow.logs[3].description.starts_with("WORKER_LOOKUP"));
    let first = flow.summary.first_action.unwrap();
    let last = flow.summary.last_action.unwrap();
    assert!(first.description.starts_with("WORKER_LOOKUP"));
    assert!(last.description.starts_with("BASKET_DELIVERY"));

    let actors = &flow.summary.actors;
    assert_eq!(actors.len(), 3);
    assert_eq!(actors[0].actor_id, "window-1");
    assert_eq!(actors[0].action_count, 2);
    assert_eq!(actors[0].display_name.as_deref(), Some("Rosa Quispe"));
    assert_eq!(actors[1].actor_id, "guard-1");
    // The clerk has no staff profile in this store.
    assert_eq!(actors[2].actor_id, "clerk-1");
    assert_eq!(actors[2].display_name, None);
}

#[test]
fn test_flow_of_worker_without_logs() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::Pending,
        None,
        GiftStatus::NotEligible,
    );

    let flow = worker_flow(&mut store, worker.id).unwrap();

    assert_eq!(flow.summary.total_logs, 0);
    assert!(flow.summary.first_action.is_none());
    assert!(flow.summary.actors.is_empty());
    assert_eq!((store.reads, store.commits), (1, 0));
}

#[test]
fn test_flow_of_unknown_worker_is_not_found() {
    let mut store = MemoryStore::new();

    let err = worker_flow(&mut store, WorkerId::generate()).unwrap_err();

    assert!(matches!(err, FlowError::NotFound { resource: "worker", .. }));
}
