// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::memory::MemoryStore;
use crate::pricing::{PricingResult, resolve_premium};
use crate::tests::helpers::{
    CATEGORY_PASSENGER, NOW, TODAY, dec, example_quote, kbm, seed_default_tariff,
    seed_tariff_version,
};
use osago_domain::{BaseRateRow, DomainError, DriverMode, KbmCoefficientRow, QuoteInput};
use time::macros::date;

#[test]
fn test_worked_example_premium() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let result: PricingResult =
        resolve_premium(&store, &example_quote(), Some(7), TODAY, NOW).unwrap();

    // 5000.00 * 1.00 * 1.30 * 1.00 * 1.00 * 0.95 * 1.0000 = 6175.00
    assert_eq!(result.amount, dec("6175.00"));
    assert_eq!(result.factors.tariff_version_id, 1);
    assert_eq!(result.factors.base_rate, dec("5000.00"));
    assert_eq!(result.factors.power, dec("1.30"));
    assert_eq!(result.factors.age_experience, dec("0.95"));
    assert_eq!(result.factors.kbm, dec("1.0000"));

    let profile = result.driver_profile.unwrap();
    assert_eq!(profile.age_years, 30);
    assert_eq!(profile.experience_years, 8);
}

#[test]
fn test_resolution_is_deterministic() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let first: PricingResult =
        resolve_premium(&store, &example_quote(), None, TODAY, NOW).unwrap();
    let second: PricingResult =
        resolve_premium(&store, &example_quote(), None, TODAY, NOW).unwrap();

    assert_eq!(first.amount, second.amount);
    assert_eq!(first.factors, second.factors);
}

#[test]
fn test_calculation_record_persisted() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let result: PricingResult =
        resolve_premium(&store, &example_quote(), Some(7), TODAY, NOW).unwrap();

    assert_eq!(store.calculation_count(), 1);
    let record = store.calculation(result.calculation_id).unwrap();
    assert_eq!(record.user_id, Some(7));
    assert_eq!(record.amount, dec("6175.00"));
    assert_eq!(record.factors, result.factors);
    assert_eq!(record.kbm_class, kbm("4"));
    assert_eq!(record.created_at, NOW);
}

#[test]
fn test_unlimited_mode_needs_no_dates_and_skips_kvs() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);
    // No KVS band would match; unlimited mode must not care.
    store.set_kvs_coefficients(1, vec![]);

    let input: QuoteInput = QuoteInput {
        driver_mode: DriverMode::Unlimited,
        driver_birth_date: None,
        license_issue_date: None,
        ..example_quote()
    };

    let result: PricingResult = resolve_premium(&store, &input, None, TODAY, NOW).unwrap();

    assert_eq!(result.driver_profile, None);
    assert_eq!(result.factors.age_experience, dec("1"));
    assert_eq!(result.factors.driver_mode, dec("1.80"));
    // 5000.00 * 1.00 * 1.30 * 1.80 * 1.00 * 1 * 1.0000 = 11700.00
    assert_eq!(result.amount, dec("11700.00"));
}

#[test]
fn test_blank_kbm_class_defaults_to_three() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let input: QuoteInput = QuoteInput {
        kbm_class_code: None,
        ..example_quote()
    };

    let result: PricingResult = resolve_premium(&store, &input, None, TODAY, NOW).unwrap();

    assert_eq!(result.factors.kbm_class, kbm("3"));
    assert_eq!(result.factors.kbm, dec("1.1700"));
}

#[test]
fn test_kbm_fallback_when_table_absent() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);
    store.set_kbm_table_present(false);

    let input: QuoteInput = QuoteInput {
        kbm_class_code: Some(String::from("13")),
        ..example_quote()
    };

    let result: PricingResult = resolve_premium(&store, &input, None, TODAY, NOW).unwrap();

    // The statutory schedule prices class 13 at 0.4600.
    assert_eq!(result.factors.kbm, dec("0.4600"));
}

#[test]
fn test_kbm_class_missing_from_present_table() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let input: QuoteInput = QuoteInput {
        kbm_class_code: Some(String::from("13")),
        ..example_quote()
    };

    // The table exists but has no class 13 row, so the pre-check rejects
    // the only version and the error names the class.
    assert!(matches!(
        resolve_premium(&store, &input, None, TODAY, NOW),
        Err(CoreError::DomainViolation(DomainError::KbmClassNotFound { .. }))
    ));
}

#[test]
fn test_distinct_not_found_errors_per_dimension() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let unknown_category: QuoteInput = QuoteInput {
        vehicle_category_id: 99,
        ..example_quote()
    };
    assert!(matches!(
        resolve_premium(&store, &unknown_category, None, TODAY, NOW),
        Err(CoreError::DomainViolation(DomainError::BaseRateNotFound {
            vehicle_category_id: 99
        }))
    ));

    let unknown_region: QuoteInput = QuoteInput {
        region_id: 99,
        ..example_quote()
    };
    assert!(matches!(
        resolve_premium(&store, &unknown_region, None, TODAY, NOW),
        Err(CoreError::DomainViolation(
            DomainError::RegionCoefficientNotFound { region_id: 99 }
        ))
    ));

    let unknown_term: QuoteInput = QuoteInput {
        term_months: 9,
        ..example_quote()
    };
    assert!(matches!(
        resolve_premium(&store, &unknown_term, None, TODAY, NOW),
        Err(CoreError::DomainViolation(
            DomainError::TermCoefficientNotFound { term_months: 9 }
        ))
    ));
}

#[test]
fn test_no_power_band_error() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);
    store.set_power_coefficients(1, vec![]);

    assert!(matches!(
        resolve_premium(&store, &example_quote(), None, TODAY, NOW),
        Err(CoreError::DomainViolation(
            DomainError::PowerCoefficientNotFound { power_hp: 120 }
        ))
    ));
}

#[test]
fn test_kvs_band_miss_is_an_error_for_limited_mode() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);
    store.set_kvs_coefficients(1, vec![]);

    assert!(matches!(
        resolve_premium(&store, &example_quote(), None, TODAY, NOW),
        Err(CoreError::DomainViolation(
            DomainError::KvsCoefficientNotFound { .. }
        ))
    ));
    // The failed resolution must not leave a partial calculation behind.
    assert_eq!(store.calculation_count(), 0);
}

#[test]
fn test_no_tariff_at_all() {
    let store: MemoryStore = MemoryStore::new();

    assert!(matches!(
        resolve_premium(&store, &example_quote(), None, TODAY, NOW),
        Err(CoreError::DomainViolation(DomainError::NoActiveTariff))
    ));
}

#[test]
fn test_expired_version_not_selected() {
    let store: MemoryStore = MemoryStore::new();
    seed_tariff_version(&store, 1, date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31)));

    assert!(matches!(
        resolve_premium(&store, &example_quote(), None, TODAY, NOW),
        Err(CoreError::DomainViolation(DomainError::NoActiveTariff))
    ));
}

#[test]
fn test_latest_valid_from_wins() {
    let store: MemoryStore = MemoryStore::new();
    seed_tariff_version(&store, 1, date!(2025 - 01 - 01), None);
    seed_tariff_version(&store, 2, date!(2026 - 01 - 01), None);
    // The newer version prices the base rate differently.
    store.set_base_rates(
        2,
        vec![BaseRateRow {
            vehicle_category_id: CATEGORY_PASSENGER,
            base_rate: dec("6000.00"),
        }],
    );

    let result: PricingResult =
        resolve_premium(&store, &example_quote(), None, TODAY, NOW).unwrap();

    assert_eq!(result.factors.tariff_version_id, 2);
    assert_eq!(result.factors.base_rate, dec("6000.00"));
}

#[test]
fn test_same_valid_from_highest_id_wins() {
    let store: MemoryStore = MemoryStore::new();
    seed_tariff_version(&store, 1, date!(2026 - 01 - 01), None);
    seed_tariff_version(&store, 2, date!(2026 - 01 - 01), None);

    let result: PricingResult =
        resolve_premium(&store, &example_quote(), None, TODAY, NOW).unwrap();

    assert_eq!(result.factors.tariff_version_id, 2);
}

#[test]
fn test_falls_back_to_older_version_satisfying_all_dimensions() {
    let store: MemoryStore = MemoryStore::new();
    seed_tariff_version(&store, 1, date!(2025 - 01 - 01), None);
    seed_tariff_version(&store, 2, date!(2026 - 01 - 01), None);
    // The newest version cannot price class 4; the older one can.
    store.set_kbm_coefficients(
        2,
        vec![KbmCoefficientRow {
            class_code: kbm("3"),
            coefficient: dec("1.1700"),
        }],
    );

    let result: PricingResult =
        resolve_premium(&store, &example_quote(), None, TODAY, NOW).unwrap();

    assert_eq!(result.factors.tariff_version_id, 1);
}

#[test]
fn test_invalid_input_rejected_before_any_lookup() {
    let store: MemoryStore = MemoryStore::new();
    seed_default_tariff(&store);

    let input: QuoteInput = QuoteInput {
        power_hp: 0,
        ..example_quote()
    };
    assert!(matches!(
        resolve_premium(&store, &input, None, TODAY, NOW),
        Err(CoreError::DomainViolation(DomainError::PowerOutOfRange { .. }))
    ));

    let input: QuoteInput = QuoteInput {
        kbm_class_code: Some(String::from("14")),
        ..example_quote()
    };
    assert!(matches!(
        resolve_premium(&store, &input, None, TODAY, NOW),
        Err(CoreError::DomainViolation(DomainError::InvalidKbmClass(_)))
    ));

    assert_eq!(store.calculation_count(), 0);
}
