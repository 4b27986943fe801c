// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BasketHall, BasketId, BasketRef, DomainError, GiftHall, GiftId, GiftStatus, NationalId,
    NewWorker, StatusChange, WorkerAmendment, parse_date,
};

fn create_test_new_worker(gift_hall: Option<GiftHall>) -> NewWorker {
    NewWorker {
        national_id: NationalId::parse("40123456").unwrap(),
        full_name: String::from("Ana Torres"),
        onboarding_date: parse_date("2019-03-01").unwrap(),
        job_function: Some(String::from("Operator")),
        basket_type: None,
        children_count: Some(2),
        basket_hall: BasketHall::Hall2,
        gift_hall,
    }
}

#[test]
fn test_national_id_is_trimmed() {
    let national_id: NationalId = NationalId::parse("  40123456 ").unwrap();
    assert_eq!(national_id.value(), "40123456");
}

#[test]
fn test_national_id_length_bounds() {
    assert!(NationalId::parse("1234567").is_err());
    assert!(NationalId::parse("12345678").is_ok());
    assert!(NationalId::parse("12345678901234567890").is_ok());
    assert!(NationalId::parse("123456789012345678901").is_err());
    assert!(matches!(
        NationalId::parse("   "),
        Err(DomainError::InvalidNationalId { .. })
    ));
}

#[test]
fn test_new_worker_without_gift_hall_is_not_eligible() {
    assert_eq!(
        create_test_new_worker(None).initial_gift_status(),
        GiftStatus::NotEligible
    );
    assert_eq!(
        create_test_new_worker(Some(GiftHall::Hall1)).initial_gift_status(),
        GiftStatus::Pending
    );
}

#[test]
fn test_amendment_clearing_gift_hall_forces_not_eligible() {
    let amendment: WorkerAmendment = WorkerAmendment {
        gift_hall: Some(None),
        ..WorkerAmendment::default()
    };
    assert_eq!(
        amendment.gift_status_after(GiftStatus::WindowScanned),
        Some(GiftStatus::NotEligible)
    );
    assert_eq!(amendment.gift_status_after(GiftStatus::NotEligible), None);
}

#[test]
fn test_amendment_assigning_gift_hall_reopens_gift_track() {
    let amendment: WorkerAmendment = WorkerAmendment {
        gift_hall: Some(Some(GiftHall::Hall1)),
        ..WorkerAmendment::default()
    };
    assert_eq!(
        amendment.gift_status_after(GiftStatus::NotEligible),
        Some(GiftStatus::Pending)
    );
    assert_eq!(amendment.gift_status_after(GiftStatus::HallEntered), None);
    assert_eq!(
        WorkerAmendment::default().gift_status_after(GiftStatus::Pending),
        None
    );
}

#[test]
fn test_basket_ref_prefers_uuid() {
    let id: BasketId = BasketId::generate();
    assert_eq!(BasketRef::parse(&id.to_string()), Ok(BasketRef::Id(id)));
    assert_eq!(
        BasketRef::parse(" B-100 "),
        Ok(BasketRef::Code(String::from("B-100")))
    );
    assert!(BasketRef::parse("").is_err());
}

#[test]
fn test_identifier_parse_errors_name_the_kind() {
    let err = "G-1".parse::<GiftId>().unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidIdentifier {
            kind: "gift",
            value: String::from("G-1"),
        }
    );
}

#[test]
fn test_hall_strings() {
    assert_eq!("HALL_3".parse::<BasketHall>(), Ok(BasketHall::Hall3));
    assert_eq!(GiftHall::Hall1.as_str(), "HALL_1");
    assert!("HALL_1".parse::<BasketHall>().is_err());
}

#[test]
fn test_empty_status_change() {
    assert!(StatusChange::default().is_empty());
    let change: StatusChange = StatusChange {
        gift_status: Some(GiftStatus::HallEntered),
        ..StatusChange::default()
    };
    assert!(!change.is_empty());
}
