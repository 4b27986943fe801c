// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pedregal_domain::{BasketRef, BasketStatus, DomainError, GiftHall, GiftId, GiftStatus};

use super::helpers::{MemoryStore, clerk_actor, national_id};
use crate::{
    FlowError, StoreError, deliver_basket, deliver_gifts, validate_basket_code, validate_gift_code,
};

fn code(value: &str) -> BasketRef {
    BasketRef::Code(value.to_string())
}

#[test]
fn test_validate_codes_do_not_log() {
    let mut store = MemoryStore::new();
    store.add_basket("B-001");
    store.add_gift("G-001");

    let basket = validate_basket_code(&mut store, " B-001 ").unwrap();
    let gift = validate_gift_code(&mut store, "G-001").unwrap();

    assert_eq!(basket.message, "Basket is valid");
    assert_eq!(basket.subject.code, "B-001");
    assert_eq!(gift.message, "Gift is valid");
    assert!(store.data.logs.is_empty());
    assert_eq!(store.reads, 2);
    assert_eq!(store.commits + store.rollbacks, 0);
}

#[test]
fn test_validate_unknown_code_is_not_found() {
    let mut store = MemoryStore::new();

    let err = validate_basket_code(&mut store, "B-404").unwrap_err();
    assert!(matches!(err, FlowError::NotFound { resource: "basket", .. }));

    let err = validate_gift_code(&mut store, "G-404").unwrap_err();
    assert!(matches!(err, FlowError::NotFound { resource: "gift", .. }));
}

#[test]
fn test_validate_blank_code_is_invalid_input() {
    let mut store = MemoryStore::new();

    let err = validate_basket_code(&mut store, "   ").unwrap_err();

    assert!(matches!(
        err,
        FlowError::PreconditionViolation(DomainError::InvalidItemCode(_))
    ));
}

#[test]
fn test_basket_delivery_records_basket_and_time() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );
    let basket = store.add_basket("B-001");

    let outcome = deliver_basket(
        &mut store,
        &clerk_actor(),
        &national_id("40123456"),
        &code("B-001"),
    )
    .unwrap();

    assert_eq!(outcome.message, "Basket B-001 delivered to Worker 40123456");
    let after = store.worker(worker.id);
    assert_eq!(after.basket_status, BasketStatus::BasketDelivered);
    assert_eq!(after.basket_item_id, Some(basket.id));
    assert!(after.basket_delivered_at.is_some());
    let logs = store.logs_for(worker.id);
    assert_eq!(logs.len(), 1);
    assert_eq!(
        logs[0].description,
        "BASKET_DELIVERY: national_id=40123456, basket=B-001"
    );
}

#[test]
fn test_basket_delivery_accepts_basket_id() {
    let mut store = MemoryStore::new();
    store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );
    let basket = store.add_basket("B-001");

    let outcome = deliver_basket(
        &mut store,
        &clerk_actor(),
        &national_id("40123456"),
        &BasketRef::Id(basket.id),
    )
    .unwrap();

    assert_eq!(outcome.subject.basket_item_id, Some(basket.id));
}

#[test]
fn test_repeat_basket_delivery_keeps_first_basket() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );
    let first = store.add_basket("B-001");
    store.add_basket("B-002");
    deliver_basket(&mut store, &clerk_actor(), &national_id("40123456"), &code("B-001")).unwrap();

    let outcome =
        deliver_basket(&mut store, &clerk_actor(), &national_id("40123456"), &code("B-002"))
            .unwrap();

    assert!(outcome.message.contains("already received their basket"));
    assert_eq!(store.worker(worker.id).basket_item_id, Some(first.id));
    assert_eq!(store.logs_for(worker.id).len(), 1);
}

#[test]
fn test_basket_delivery_before_hall_is_refused() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::WindowScanned,
        None,
        GiftStatus::NotEligible,
    );
    store.add_basket("B-001");

    let err = deliver_basket(&mut store, &clerk_actor(), &national_id("40123456"), &code("B-001"))
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::PreconditionViolation(DomainError::HallNotEntered { .. })
    ));
    assert_eq!(store.worker(worker.id).basket_item_id, None);
    assert!(store.logs_for(worker.id).is_empty());
}

#[test]
fn test_basket_delivery_with_unknown_basket_is_not_found() {
    let mut store = MemoryStore::new();
    store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );

    let err = deliver_basket(&mut store, &clerk_actor(), &national_id("40123456"), &code("B-404"))
        .unwrap_err();

    assert!(matches!(err, FlowError::NotFound { resource: "basket", .. }));
}

#[test]
fn test_basket_cannot_go_to_two_workers() {
    let mut store = MemoryStore::new();
    store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );
    let second = store.add_worker(
        "40999999",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );
    store.add_basket("B-001");
    deliver_basket(&mut store, &clerk_actor(), &national_id("40123456"), &code("B-001")).unwrap();

    let err = deliver_basket(&mut store, &clerk_actor(), &national_id("40999999"), &code("B-001"))
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::PreconditionViolation(DomainError::BasketAlreadyAssigned { .. })
    ));
    assert_eq!(store.worker(second.id).basket_status, BasketStatus::HallEntered);
    assert!(store.logs_for(second.id).is_empty());
}

#[test]
fn test_gift_delivery_writes_ledger_and_single_log() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::WindowScanned,
        Some(GiftHall::Hall1),
        GiftStatus::HallEntered,
    );
    let first = store.add_gift("G-001");
    let second = store.add_gift("G-002");

    let outcome = deliver_gifts(
        &mut store,
        &clerk_actor(),
        &national_id("40123456"),
        &[second.id, first.id],
    )
    .unwrap();

    assert_eq!(outcome.message, "2 gift(s) delivered to Worker 40123456");
    let after = store.worker(worker.id);
    assert_eq!(after.gift_status, GiftStatus::GiftsDelivered);
    assert!(after.gifts_delivered_at.is_some());
    assert_eq!(store.data.assignments.len(), 2);
    let logs = store.logs_for(worker.id);
    assert_eq!(logs.len(), 1);
    assert_eq!(
        logs[0].description,
        "GIFT_DELIVERY: national_id=40123456, gifts=G-002, G-001"
    );
}

#[test]
fn test_gift_delivery_rejects_partially_valid_list() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::WindowScanned,
        Some(GiftHall::Hall1),
        GiftStatus::HallEntered,
    );
    let gift = store.add_gift("G-001");

    let err = deliver_gifts(
        &mut store,
        &clerk_actor(),
        &national_id("40123456"),
        &[gift.id, GiftId::generate()],
    )
    .unwrap_err();

    assert!(matches!(
        err,
        FlowError::PreconditionViolation(DomainError::GiftsNotFound {
            requested: 2,
            found: 1
        })
    ));
    assert_eq!(store.worker(worker.id).gift_status, GiftStatus::HallEntered);
    assert!(store.data.assignments.is_empty());
    assert!(store.logs_for(worker.id).is_empty());
}

#[test]
fn test_gift_delivery_rejects_empty_list_without_transaction() {
    let mut store = MemoryStore::new();

    let err = deliver_gifts(&mut store, &clerk_actor(), &national_id("40123456"), &[]).unwrap_err();

    assert!(matches!(
        err,
        FlowError::PreconditionViolation(DomainError::EmptyGiftList)
    ));
    assert_eq!(store.commits + store.rollbacks, 0);
}

#[test]
fn test_gift_delivery_to_ineligible_worker_is_refused() {
    let mut store = MemoryStore::new();
    store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        None,
        GiftStatus::NotEligible,
    );
    let gift = store.add_gift("G-001");

    let err = deliver_gifts(&mut store, &clerk_actor(), &national_id("40123456"), &[gift.id])
        .unwrap_err();

    assert!(matches!(
        err,
        FlowError::PreconditionViolation(DomainError::NotEligibleForGifts { .. })
    ));
}

#[test]
fn test_repeat_gift_delivery_is_informational() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        Some(GiftHall::Hall1),
        GiftStatus::HallEntered,
    );
    let gift = store.add_gift("G-001");
    deliver_gifts(&mut store, &clerk_actor(), &national_id("40123456"), &[gift.id]).unwrap();

    let outcome =
        deliver_gifts(&mut store, &clerk_actor(), &national_id("40123456"), &[gift.id]).unwrap();

    assert!(outcome.message.contains("already received their gifts"));
    assert_eq!(store.data.assignments.len(), 1);
    assert_eq!(store.logs_for(worker.id).len(), 1);
}

#[test]
fn test_ledger_failure_rolls_back_status_and_log() {
    let mut store = MemoryStore::new();
    let worker = store.add_worker(
        "40123456",
        BasketStatus::HallEntered,
        Some(GiftHall::Hall1),
        GiftStatus::HallEntered,
    );
    let gift = store.add_gift("G-001");
    store.fail_ledger = true;

    let err = deliver_gifts(&mut store, &clerk_actor(), &national_id("40123456"), &[gift.id])
        .unwrap_err();

    assert!(matches!(err, FlowError::Store(StoreError::Backend(_))));
    let after = store.worker(worker.id);
    assert_eq!(after.gift_status, GiftStatus::HallEntered);
    assert!(after.gifts_delivered_at.is_none());
    assert!(store.logs_for(worker.id).is_empty());
}
