// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the engine test suites.

use crate::memory::MemoryStore;
use osago_domain::{
    BaseRateRow, DriverMode, DriverModeCoefficientRow, KbmClass, KbmCoefficientRow,
    KvsCoefficientRow, PowerCoefficientRow, QuoteInput, RegionCoefficientRow, TariffVersion,
    TermCoefficientRow,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub const TODAY: Date = date!(2026 - 06 - 15);
pub const NOW: OffsetDateTime = datetime!(2026-06-15 12:00 UTC);

pub const CATEGORY_PASSENGER: i64 = 1;
pub const REGION_R1: i64 = 1;

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn kbm(code: &str) -> KbmClass {
    KbmClass::parse(Some(code)).unwrap()
}

/// Seeds one active tariff version (id 1, open-ended window) with the
/// standard table set used across the suites.
pub fn seed_default_tariff(store: &MemoryStore) {
    seed_tariff_version(store, 1, date!(2026 - 01 - 01), None);
}

/// Seeds a tariff version with the standard table set under an arbitrary
/// id and validity window.
pub fn seed_tariff_version(
    store: &MemoryStore,
    version_id: i64,
    valid_from: Date,
    valid_to: Option<Date>,
) {
    store.add_tariff_version(TariffVersion {
        id: version_id,
        is_active: true,
        valid_from,
        valid_to,
    });
    store.set_base_rates(
        version_id,
        vec![BaseRateRow {
            vehicle_category_id: CATEGORY_PASSENGER,
            base_rate: dec("5000.00"),
        }],
    );
    store.set_region_coefficients(
        version_id,
        vec![RegionCoefficientRow {
            region_id: REGION_R1,
            coefficient: dec("1.00"),
        }],
    );
    store.set_power_coefficients(
        version_id,
        vec![
            PowerCoefficientRow {
                hp_from: 1,
                hp_to: Some(70),
                coefficient: dec("1.00"),
            },
            PowerCoefficientRow {
                hp_from: 71,
                hp_to: Some(100),
                coefficient: dec("1.10"),
            },
            PowerCoefficientRow {
                hp_from: 101,
                hp_to: Some(150),
                coefficient: dec("1.30"),
            },
            PowerCoefficientRow {
                hp_from: 151,
                hp_to: None,
                coefficient: dec("1.50"),
            },
        ],
    );
    store.set_term_coefficients(
        version_id,
        vec![
            TermCoefficientRow {
                months: 3,
                coefficient: dec("0.50"),
            },
            TermCoefficientRow {
                months: 6,
                coefficient: dec("0.70"),
            },
            TermCoefficientRow {
                months: 12,
                coefficient: dec("1.00"),
            },
        ],
    );
    store.set_driver_mode_coefficients(
        version_id,
        DriverModeCoefficientRow {
            limited: dec("1.00"),
            unlimited: dec("1.80"),
        },
    );
    store.set_kvs_coefficients(
        version_id,
        vec![
            KvsCoefficientRow {
                age_from: 16,
                age_to: Some(21),
                exp_from: 0,
                exp_to: Some(2),
                coefficient: dec("1.87"),
            },
            KvsCoefficientRow {
                age_from: 22,
                age_to: None,
                exp_from: 3,
                exp_to: None,
                coefficient: dec("0.95"),
            },
        ],
    );
    store.set_kbm_coefficients(
        version_id,
        vec![
            KbmCoefficientRow {
                class_code: kbm("3"),
                coefficient: dec("1.1700"),
            },
            KbmCoefficientRow {
                class_code: kbm("4"),
                coefficient: dec("1.0000"),
            },
        ],
    );
}

/// The worked-example quote: passenger category, region R1, 120 hp,
/// 12 months, limited drivers aged 30 with 8 years of experience,
/// bonus-malus class 4.
pub fn example_quote() -> QuoteInput {
    QuoteInput {
        vehicle_category_id: CATEGORY_PASSENGER,
        region_id: REGION_R1,
        power_hp: 120,
        term_months: 12,
        driver_mode: DriverMode::Limited,
        driver_birth_date: Some(date!(1996 - 03 - 10)),
        license_issue_date: Some(date!(2018 - 05 - 01)),
        kbm_class_code: Some(String::from("4")),
    }
}
