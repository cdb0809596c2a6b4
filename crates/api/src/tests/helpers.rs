// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the API test suites.

use osago_core::MemoryStore;
use osago_domain::{
    BaseRateRow, DriverModeCoefficientRow, KbmClass, KbmCoefficientRow, KvsCoefficientRow,
    PowerCoefficientRow, RegionCoefficientRow, TariffVersion, TermCoefficientRow,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

use crate::request_response::QuoteRequest;

pub const TODAY: Date = date!(2026 - 06 - 15);
pub const NOW: OffsetDateTime = datetime!(2026-06-15 12:00 UTC);

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Seeds one active tariff version (id 1) with the standard table set.
pub fn seeded_store() -> MemoryStore {
    let store: MemoryStore = MemoryStore::new();
    store.add_tariff_version(TariffVersion {
        id: 1,
        is_active: true,
        valid_from: date!(2026 - 01 - 01),
        valid_to: None,
    });
    store.set_base_rates(
        1,
        vec![BaseRateRow {
            vehicle_category_id: 1,
            base_rate: dec("5000.00"),
        }],
    );
    store.set_region_coefficients(
        1,
        vec![RegionCoefficientRow {
            region_id: 1,
            coefficient: dec("1.00"),
        }],
    );
    store.set_power_coefficients(
        1,
        vec![PowerCoefficientRow {
            hp_from: 1,
            hp_to: None,
            coefficient: dec("1.30"),
        }],
    );
    store.set_term_coefficients(
        1,
        vec![TermCoefficientRow {
            months: 12,
            coefficient: dec("1.00"),
        }],
    );
    store.set_driver_mode_coefficients(
        1,
        DriverModeCoefficientRow {
            limited: dec("1.00"),
            unlimited: dec("1.80"),
        },
    );
    store.set_kvs_coefficients(
        1,
        vec![KvsCoefficientRow {
            age_from: 22,
            age_to: None,
            exp_from: 3,
            exp_to: None,
            coefficient: dec("0.95"),
        }],
    );
    store.set_kbm_coefficients(
        1,
        vec![
            KbmCoefficientRow {
                class_code: KbmClass::parse(Some("3")).unwrap(),
                coefficient: dec("1.1700"),
            },
            KbmCoefficientRow {
                class_code: KbmClass::parse(Some("4")).unwrap(),
                coefficient: dec("1.0000"),
            },
        ],
    );
    store
}

/// The worked-example quote request.
pub fn example_request() -> QuoteRequest {
    QuoteRequest {
        vehicle_category_id: 1,
        region_id: 1,
        power_hp: 120,
        term_months: 12,
        driver_mode: String::from("limited"),
        driver_birth_date: Some(date!(1996 - 03 - 10)),
        license_issue_date: Some(date!(2018 - 05 - 01)),
        kbm_class_code: Some(String::from("4")),
    }
}
