// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;
use rust_decimal::Decimal;
use time::macros::date;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::NoActiveTariff;
    assert_eq!(
        format!("{err}"),
        "No active tariff version found for provided parameters"
    );

    let err: DomainError = DomainError::BaseRateNotFound {
        vehicle_category_id: 3,
    };
    assert_eq!(format!("{err}"), "Base rate not found for vehicle category 3");

    let err: DomainError = DomainError::RegionCoefficientNotFound { region_id: 77 };
    assert_eq!(format!("{err}"), "Region coefficient not found for region 77");

    let err: DomainError = DomainError::PowerCoefficientNotFound { power_hp: 120 };
    assert_eq!(format!("{err}"), "Power coefficient not found for 120 hp");

    let err: DomainError = DomainError::TermCoefficientNotFound { term_months: 9 };
    assert_eq!(
        format!("{err}"),
        "Insurance term coefficient not found for 9 months"
    );

    let err: DomainError = DomainError::KvsCoefficientNotFound {
        age_years: 19,
        experience_years: 1,
    };
    assert_eq!(
        format!("{err}"),
        "Age/experience coefficient not found for age 19 and experience 1"
    );

    let err: DomainError = DomainError::KbmClassNotFound {
        class_code: String::from("13"),
    };
    assert_eq!(
        format!("{err}"),
        "Bonus-malus class '13' is not available in the active tariff"
    );

    let err: DomainError = DomainError::InvalidKbmClass(String::from("14"));
    assert_eq!(format!("{err}"), "Invalid bonus-malus class code: '14'");

    let err: DomainError = DomainError::PowerOutOfRange { power_hp: 2001 };
    assert_eq!(
        format!("{err}"),
        "Engine power must be in range 1..=2000 hp, got 2001"
    );

    let err: DomainError = DomainError::DateInFuture {
        field: "driverBirthDate",
        date: date!(2030 - 01 - 01),
    };
    assert_eq!(
        format!("{err}"),
        "driverBirthDate cannot be in the future: 2030-01-01"
    );

    let err: DomainError = DomainError::InvalidTransition {
        entity: "claim",
        from: "CLOSED",
        action: "APPROVE",
    };
    assert_eq!(
        format!("{err}"),
        "Transition CLOSED -> APPROVE is not allowed for claim"
    );

    let err: DomainError = DomainError::NonPositiveApprovedAmount {
        amount: Decimal::ZERO,
    };
    assert_eq!(format!("{err}"), "approvedAmount must be > 0, got 0");

    let err: DomainError = DomainError::InvalidCardNumberLength { digits: 12 };
    assert_eq!(format!("{err}"), "Card number length is invalid: 12 digits");

    let err: DomainError = DomainError::PaymentNotStartable {
        application_status: "NEW",
    };
    assert_eq!(
        format!("{err}"),
        "Application is not approved for payment (status: NEW)"
    );
}
