// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quote input validation and premium composition.
//!
//! Validation and composition are pure and deterministic: the calculation
//! date is always supplied by the caller, never read from the clock, and
//! rounding happens exactly once at the final amount.

use crate::error::DomainError;
use crate::types::{DriverMode, KbmClass};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::Date;

/// The raw inputs of a premium quote request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteInput {
    /// The vehicle category reference.
    pub vehicle_category_id: i64,
    /// The registration region reference.
    pub region_id: i64,
    /// Declared engine power in horsepower.
    pub power_hp: i32,
    /// Requested policy term in months.
    pub term_months: i32,
    /// Fixed driver list or unrestricted.
    pub driver_mode: DriverMode,
    /// Driver birth date; required when the driver list is limited.
    pub driver_birth_date: Option<Date>,
    /// Driver license issue date; required when the driver list is limited.
    pub license_issue_date: Option<Date>,
    /// Bonus-malus class code; blank defaults to class "3".
    pub kbm_class_code: Option<String>,
}

/// Driver age and experience derived from the quote input dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverProfile {
    /// Age in full elapsed years.
    pub age_years: i32,
    /// Driving experience in full elapsed years.
    pub experience_years: i32,
}

/// Calculates full elapsed years between two dates.
///
/// Uses calendar-anniversary truncation: a year counts only once the full
/// anniversary has been reached or passed. Never rounds up.
#[must_use]
pub fn full_years_between(from: Date, to: Date) -> i32 {
    if to < from {
        return 0;
    }

    let years_diff: i32 = to.year() - from.year();
    let anniversary_reached: bool =
        (u8::from(to.month()), to.day()) >= (u8::from(from.month()), from.day());

    if anniversary_reached {
        years_diff
    } else {
        (years_diff - 1).max(0)
    }
}

/// Validates a quote input and derives the driver profile.
///
/// For unlimited mode the result is `None`: age and experience are never
/// consulted and absent dates are not an error.
///
/// # Errors
///
/// Returns an error if:
/// - Engine power is outside 1..=2000
/// - The term is not a positive month count
/// - Limited mode is requested without both driver dates
/// - Either driver date lies in the future
pub fn validate_quote_input(
    input: &QuoteInput,
    today: Date,
) -> Result<Option<DriverProfile>, DomainError> {
    if !(1..=2000).contains(&input.power_hp) {
        return Err(DomainError::PowerOutOfRange {
            power_hp: input.power_hp,
        });
    }
    if input.term_months <= 0 {
        return Err(DomainError::InvalidTermMonths {
            term_months: input.term_months,
        });
    }

    match input.driver_mode {
        DriverMode::Unlimited => Ok(None),
        DriverMode::Limited => {
            let birth_date: Date = input.driver_birth_date.ok_or(DomainError::MissingDriverDate {
                field: "driverBirthDate",
            })?;
            let license_date: Date =
                input.license_issue_date.ok_or(DomainError::MissingDriverDate {
                    field: "licenseIssueDate",
                })?;

            if birth_date > today {
                return Err(DomainError::DateInFuture {
                    field: "driverBirthDate",
                    date: birth_date,
                });
            }
            if license_date > today {
                return Err(DomainError::DateInFuture {
                    field: "licenseIssueDate",
                    date: license_date,
                });
            }

            Ok(Some(DriverProfile {
                age_years: full_years_between(birth_date, today),
                experience_years: full_years_between(license_date, today),
            }))
        }
    }
}

/// The resolved multiplicative factors of one premium calculation.
///
/// Every factor is recorded exactly as used so the calculation can be
/// audited without re-resolving the tariff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumFactors {
    /// The tariff version the factors were resolved from.
    pub tariff_version_id: i64,
    /// Base rate for the vehicle category.
    pub base_rate: Decimal,
    /// Regional multiplier.
    pub region: Decimal,
    /// Engine power band multiplier.
    pub power: Decimal,
    /// Driver-mode multiplier.
    pub driver_mode: Decimal,
    /// Term length multiplier.
    pub term: Decimal,
    /// Age/experience multiplier; identity for unlimited mode.
    pub age_experience: Decimal,
    /// The normalized bonus-malus class.
    pub kbm_class: KbmClass,
    /// Bonus-malus multiplier.
    pub kbm: Decimal,
}

/// Composes the final premium from resolved factors.
///
/// Factors multiply at full precision; the product is rounded half-up to
/// two decimals exactly once.
#[must_use]
pub fn compose_premium(factors: &PremiumFactors) -> Decimal {
    let amount: Decimal = factors.base_rate
        * factors.region
        * factors.power
        * factors.driver_mode
        * factors.term
        * factors.age_experience
        * factors.kbm;

    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use time::macros::date;

    const TODAY: Date = date!(2026 - 06 - 15);

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn limited_input() -> QuoteInput {
        QuoteInput {
            vehicle_category_id: 1,
            region_id: 1,
            power_hp: 120,
            term_months: 12,
            driver_mode: DriverMode::Limited,
            driver_birth_date: Some(date!(1996 - 03 - 10)),
            license_issue_date: Some(date!(2018 - 05 - 01)),
            kbm_class_code: Some(String::from("4")),
        }
    }

    fn factors() -> PremiumFactors {
        PremiumFactors {
            tariff_version_id: 1,
            base_rate: dec("5000.00"),
            region: dec("1.00"),
            power: dec("1.30"),
            driver_mode: dec("1.00"),
            term: dec("1.00"),
            age_experience: dec("0.95"),
            kbm_class: KbmClass::parse(Some("4")).unwrap(),
            kbm: dec("1.0000"),
        }
    }

    #[test]
    fn test_full_years_before_anniversary() {
        assert_eq!(
            full_years_between(date!(2020 - 03 - 15), date!(2021 - 03 - 14)),
            0
        );
    }

    #[test]
    fn test_full_years_on_anniversary() {
        assert_eq!(
            full_years_between(date!(2020 - 03 - 15), date!(2021 - 03 - 15)),
            1
        );
    }

    #[test]
    fn test_full_years_after_anniversary() {
        assert_eq!(
            full_years_between(date!(2020 - 03 - 15), date!(2025 - 07 - 01)),
            5
        );
    }

    #[test]
    fn test_full_years_reversed_dates() {
        assert_eq!(
            full_years_between(date!(2025 - 01 - 01), date!(2020 - 01 - 01)),
            0
        );
    }

    #[test]
    fn test_validate_derives_driver_profile() {
        let profile: DriverProfile = validate_quote_input(&limited_input(), TODAY)
            .unwrap()
            .unwrap();

        assert_eq!(profile.age_years, 30);
        assert_eq!(profile.experience_years, 8);
    }

    #[test]
    fn test_validate_unlimited_ignores_dates() {
        let input: QuoteInput = QuoteInput {
            driver_mode: DriverMode::Unlimited,
            driver_birth_date: None,
            license_issue_date: None,
            ..limited_input()
        };

        assert_eq!(validate_quote_input(&input, TODAY).unwrap(), None);
    }

    #[test]
    fn test_validate_rejects_power_out_of_range() {
        for power_hp in [0, -5, 2001] {
            let input: QuoteInput = QuoteInput {
                power_hp,
                ..limited_input()
            };
            assert!(matches!(
                validate_quote_input(&input, TODAY),
                Err(DomainError::PowerOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_term() {
        let input: QuoteInput = QuoteInput {
            term_months: 0,
            ..limited_input()
        };
        assert!(matches!(
            validate_quote_input(&input, TODAY),
            Err(DomainError::InvalidTermMonths { .. })
        ));
    }

    #[test]
    fn test_validate_requires_dates_for_limited_mode() {
        let input: QuoteInput = QuoteInput {
            driver_birth_date: None,
            ..limited_input()
        };
        assert!(matches!(
            validate_quote_input(&input, TODAY),
            Err(DomainError::MissingDriverDate {
                field: "driverBirthDate"
            })
        ));

        let input: QuoteInput = QuoteInput {
            license_issue_date: None,
            ..limited_input()
        };
        assert!(matches!(
            validate_quote_input(&input, TODAY),
            Err(DomainError::MissingDriverDate {
                field: "licenseIssueDate"
            })
        ));
    }

    #[test]
    fn test_validate_rejects_future_dates() {
        let input: QuoteInput = QuoteInput {
            driver_birth_date: Some(date!(2030 - 01 - 01)),
            ..limited_input()
        };
        assert!(matches!(
            validate_quote_input(&input, TODAY),
            Err(DomainError::DateInFuture { .. })
        ));
    }

    #[test]
    fn test_compose_premium_worked_example() {
        // 5000.00 * 1.00 * 1.30 * 1.00 * 1.00 * 0.95 * 1.0000 = 6175.00
        assert_eq!(compose_premium(&factors()), dec("6175.00"));
    }

    #[test]
    fn test_compose_premium_rounds_half_up() {
        let f: PremiumFactors = PremiumFactors {
            base_rate: dec("100.00"),
            power: dec("1.0005"),
            age_experience: dec("1.00"),
            ..factors()
        };
        // 100.00 * 1.0005 = 100.0500 -> 100.05; add a factor that lands on
        // the midpoint: 100.00 * 1.000050 would be 100.005 -> 100.01.
        assert_eq!(compose_premium(&f), dec("100.05"));

        let f: PremiumFactors = PremiumFactors {
            base_rate: dec("100.00"),
            power: dec("1.00005"),
            age_experience: dec("1.00"),
            ..factors()
        };
        assert_eq!(compose_premium(&f), dec("100.01"));
    }

    #[test]
    fn test_compose_premium_deterministic() {
        assert_eq!(compose_premium(&factors()), compose_premium(&factors()));
    }

    #[test]
    fn test_premium_monotonic_in_single_factor() {
        let base: Decimal = compose_premium(&factors());

        let raised: PremiumFactors = PremiumFactors {
            kbm: dec("1.1700"),
            ..factors()
        };
        assert!(compose_premium(&raised) > base);

        let lowered: PremiumFactors = PremiumFactors {
            age_experience: dec("0.90"),
            ..factors()
        };
        assert!(compose_premium(&lowered) < base);
    }
}
