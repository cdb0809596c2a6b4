// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Versioned tariff data: the tariff version window and the coefficient
//! table rows it bundles.
//!
//! All seven coefficient tables share one lookup abstraction: a row knows
//! whether it matches a key and how to rank itself when several rows match
//! (range tables prefer the highest band start, so an overlapping dataset
//! degrades deterministically instead of crashing).

use crate::types::KbmClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// A dated, versioned bundle of coefficient tables.
///
/// Exactly one version is expected to be current for a given calendar
/// date; selection prefers the most recently started valid version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffVersion {
    /// The version identifier.
    pub id: i64,
    /// Whether the version participates in selection at all.
    pub is_active: bool,
    /// First day the version is in force.
    pub valid_from: Date,
    /// Last day the version is in force; `None` leaves the window open.
    pub valid_to: Option<Date>,
}

impl TariffVersion {
    /// Returns true if this version is in force on `today`.
    #[must_use]
    pub fn is_current(&self, today: Date) -> bool {
        self.is_active
            && self.valid_from <= today
            && self.valid_to.is_none_or(|until| until >= today)
    }
}

/// A coefficient table row that can be matched against a lookup key.
///
/// `rank` orders rows when more than one matches; the highest rank wins.
/// Exact-match tables rank every row equally.
pub trait CoefficientRow {
    /// The lookup key for this table.
    type Key: ?Sized;

    /// Whether this row applies to the given key.
    fn matches(&self, key: &Self::Key) -> bool;

    /// Tie-break rank among matching rows (higher wins).
    fn rank(&self) -> (i64, i64);

    /// The multiplicative coefficient this row carries.
    fn coefficient(&self) -> Decimal;
}

/// Selects the single applicable row for a key.
///
/// Among matching rows the one with the highest rank is chosen, so
/// overlapping range bands resolve to the band with the highest start.
#[must_use]
pub fn select_coefficient<'a, R: CoefficientRow>(rows: &'a [R], key: &R::Key) -> Option<&'a R> {
    rows.iter()
        .filter(|row| row.matches(key))
        .max_by_key(|row| row.rank())
}

/// Base rate per vehicle category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRateRow {
    /// The vehicle category this rate applies to.
    pub vehicle_category_id: i64,
    /// The base rate in currency units.
    pub base_rate: Decimal,
}

impl CoefficientRow for BaseRateRow {
    type Key = i64;

    fn matches(&self, key: &i64) -> bool {
        self.vehicle_category_id == *key
    }

    fn rank(&self) -> (i64, i64) {
        (0, 0)
    }

    fn coefficient(&self) -> Decimal {
        self.base_rate
    }
}

/// Regional multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCoefficientRow {
    /// The region this coefficient applies to.
    pub region_id: i64,
    /// The multiplier.
    pub coefficient: Decimal,
}

impl CoefficientRow for RegionCoefficientRow {
    type Key = i64;

    fn matches(&self, key: &i64) -> bool {
        self.region_id == *key
    }

    fn rank(&self) -> (i64, i64) {
        (0, 0)
    }

    fn coefficient(&self) -> Decimal {
        self.coefficient
    }
}

/// Engine power band multiplier. The upper bound may be open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerCoefficientRow {
    /// Inclusive lower bound in horsepower.
    pub hp_from: i32,
    /// Inclusive upper bound in horsepower; `None` leaves the band open.
    pub hp_to: Option<i32>,
    /// The multiplier.
    pub coefficient: Decimal,
}

impl CoefficientRow for PowerCoefficientRow {
    type Key = i32;

    fn matches(&self, key: &i32) -> bool {
        self.hp_from <= *key && self.hp_to.is_none_or(|to| to >= *key)
    }

    fn rank(&self) -> (i64, i64) {
        (i64::from(self.hp_from), 0)
    }

    fn coefficient(&self) -> Decimal {
        self.coefficient
    }
}

/// Term length multiplier, keyed by an exact month count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermCoefficientRow {
    /// The term length in months.
    pub months: i32,
    /// The multiplier.
    pub coefficient: Decimal,
}

impl CoefficientRow for TermCoefficientRow {
    type Key = i32;

    fn matches(&self, key: &i32) -> bool {
        self.months == *key
    }

    fn rank(&self) -> (i64, i64) {
        (0, 0)
    }

    fn coefficient(&self) -> Decimal {
        self.coefficient
    }
}

/// The two fixed driver-mode multipliers of a tariff version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverModeCoefficientRow {
    /// Multiplier for a fixed driver list.
    pub limited: Decimal,
    /// Multiplier for unrestricted drivers.
    pub unlimited: Decimal,
}

/// Age × experience band multiplier, consulted only for limited mode.
///
/// Both upper bounds may be open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KvsCoefficientRow {
    /// Inclusive lower age bound in full years.
    pub age_from: i32,
    /// Inclusive upper age bound; `None` leaves the band open.
    pub age_to: Option<i32>,
    /// Inclusive lower experience bound in full years.
    pub exp_from: i32,
    /// Inclusive upper experience bound; `None` leaves the band open.
    pub exp_to: Option<i32>,
    /// The multiplier.
    pub coefficient: Decimal,
}

impl CoefficientRow for KvsCoefficientRow {
    type Key = (i32, i32);

    fn matches(&self, key: &(i32, i32)) -> bool {
        let (age, experience): (i32, i32) = *key;
        self.age_from <= age
            && self.age_to.is_none_or(|to| to >= age)
            && self.exp_from <= experience
            && self.exp_to.is_none_or(|to| to >= experience)
    }

    fn rank(&self) -> (i64, i64) {
        (i64::from(self.age_from), i64::from(self.exp_from))
    }

    fn coefficient(&self) -> Decimal {
        self.coefficient
    }
}

/// Bonus-malus class multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KbmCoefficientRow {
    /// The class code this row prices.
    pub class_code: KbmClass,
    /// The multiplier.
    pub coefficient: Decimal,
}

impl CoefficientRow for KbmCoefficientRow {
    type Key = KbmClass;

    fn matches(&self, key: &KbmClass) -> bool {
        self.class_code == *key
    }

    fn rank(&self) -> (i64, i64) {
        (0, 0)
    }

    fn coefficient(&self) -> Decimal {
        self.coefficient
    }
}

/// The statutory bonus-malus schedule.
///
/// Applied when the active tariff dataset carries no KBM table at all.
/// Whether substituting the statutory values in that situation is intended
/// business policy or a stop-gap for incomplete seed data needs
/// confirmation from the tariff owner; the engine preserves the behavior.
#[must_use]
pub fn default_kbm_coefficient(class: &KbmClass) -> Decimal {
    match class.as_str() {
        "M" => Decimal::new(3_9200, 4),
        "0" => Decimal::new(2_9400, 4),
        "1" => Decimal::new(2_2500, 4),
        "2" => Decimal::new(1_7600, 4),
        "4" => Decimal::new(1_0000, 4),
        "5" => Decimal::new(9100, 4),
        "6" => Decimal::new(8300, 4),
        "7" => Decimal::new(7800, 4),
        "8" => Decimal::new(7400, 4),
        "9" => Decimal::new(6800, 4),
        "10" => Decimal::new(6300, 4),
        "11" => Decimal::new(5700, 4),
        "12" => Decimal::new(5200, 4),
        "13" => Decimal::new(4600, 4),
        // Class "3" and anything unexpected fall back to the no-history value.
        _ => Decimal::new(1_1700, 4),
    }
}
