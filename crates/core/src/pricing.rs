// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tariff resolution: selecting the applicable tariff version and
//! composing the premium from its coefficient tables.
//!
//! Version selection runs an existence pre-check over every dimension
//! before any coefficient is fetched, so an unsatisfiable request fails
//! fast with the precise missing dimension instead of producing a partial
//! calculation.

use crate::error::CoreError;
use crate::store::{CalculationStore, NewCalculationRecord, TariffStore};
use osago_domain::{
    DomainError, DriverMode, DriverProfile, KbmClass, PremiumFactors, QuoteInput, compose_premium,
    default_kbm_coefficient, select_coefficient, validate_quote_input,
};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// The outcome of a successful premium resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingResult {
    /// Identifier of the persisted calculation record.
    pub calculation_id: i64,
    /// Every factor exactly as used.
    pub factors: PremiumFactors,
    /// Derived driver age/experience; `None` for unlimited mode.
    pub driver_profile: Option<DriverProfile>,
    /// The final premium, rounded half-up to two decimals.
    pub amount: Decimal,
}

/// Checks that a version has at least one row for every requested
/// dimension. The age/experience table is not pre-checked: its bands
/// depend on derived values and a miss is reported at fetch time.
fn version_satisfies<S: TariffStore>(
    store: &S,
    tariff_version_id: i64,
    input: &QuoteInput,
    kbm_class: &KbmClass,
    kbm_table_present: bool,
) -> bool {
    first_missing_dimension(store, tariff_version_id, input, kbm_class, kbm_table_present)
        .is_none()
}

/// Returns the error for the first dimension a version cannot satisfy.
fn first_missing_dimension<S: TariffStore>(
    store: &S,
    tariff_version_id: i64,
    input: &QuoteInput,
    kbm_class: &KbmClass,
    kbm_table_present: bool,
) -> Option<DomainError> {
    if select_coefficient(&store.base_rates(tariff_version_id), &input.vehicle_category_id)
        .is_none()
    {
        return Some(DomainError::BaseRateNotFound {
            vehicle_category_id: input.vehicle_category_id,
        });
    }
    if select_coefficient(&store.region_coefficients(tariff_version_id), &input.region_id)
        .is_none()
    {
        return Some(DomainError::RegionCoefficientNotFound {
            region_id: input.region_id,
        });
    }
    if select_coefficient(&store.power_coefficients(tariff_version_id), &input.power_hp).is_none()
    {
        return Some(DomainError::PowerCoefficientNotFound {
            power_hp: input.power_hp,
        });
    }
    if select_coefficient(&store.term_coefficients(tariff_version_id), &input.term_months)
        .is_none()
    {
        return Some(DomainError::TermCoefficientNotFound {
            term_months: input.term_months,
        });
    }
    if store.driver_mode_coefficients(tariff_version_id).is_none() {
        return Some(DomainError::DriverModeCoefficientNotFound);
    }
    if kbm_table_present
        && select_coefficient(&store.kbm_coefficients(tariff_version_id), kbm_class).is_none()
    {
        return Some(DomainError::KbmClassNotFound {
            class_code: kbm_class.as_str().to_string(),
        });
    }
    None
}

/// Resolves the premium for a quote request and persists the calculation.
///
/// The returned result carries the calculation record identifier so a
/// later application draft can reference it without recomputing.
///
/// # Errors
///
/// Returns an error if:
/// - The input fails validation (power range, term, driver dates)
/// - The bonus-malus class code is not a legal code
/// - No active tariff version satisfies every requested dimension; the
///   error names the first missing dimension of the newest version, or
///   `NoActiveTariff` when no version is in force at all
/// - A coefficient fetch comes back empty (one distinct error per
///   dimension, including the age/experience band)
pub fn resolve_premium<S>(
    store: &S,
    input: &QuoteInput,
    user_id: Option<i64>,
    today: Date,
    now: OffsetDateTime,
) -> Result<PricingResult, CoreError>
where
    S: TariffStore + CalculationStore,
{
    let driver_profile: Option<DriverProfile> = validate_quote_input(input, today)?;
    let kbm_class: KbmClass = KbmClass::parse(input.kbm_class_code.as_deref())?;
    let kbm_table_present: bool = store.kbm_table_present();

    let mut candidates: Vec<_> = store
        .active_versions(today)
        .into_iter()
        .filter(|v| v.is_current(today))
        .collect();
    // Latest validity start wins; ties go to the most recently created.
    candidates.sort_by(|a, b| (b.valid_from, b.id).cmp(&(a.valid_from, a.id)));

    let version_id: i64 = match candidates
        .iter()
        .find(|v| version_satisfies(store, v.id, input, &kbm_class, kbm_table_present))
    {
        Some(version) => version.id,
        None => {
            // Report the newest version's first gap; with no version in
            // force at all there is nothing more precise to say.
            let err: DomainError = candidates.first().map_or(DomainError::NoActiveTariff, |v| {
                first_missing_dimension(store, v.id, input, &kbm_class, kbm_table_present)
                    .unwrap_or(DomainError::NoActiveTariff)
            });
            return Err(err.into());
        }
    };

    let base_rate: Decimal =
        select_coefficient(&store.base_rates(version_id), &input.vehicle_category_id)
            .map(|row| row.base_rate)
            .ok_or(DomainError::BaseRateNotFound {
                vehicle_category_id: input.vehicle_category_id,
            })?;

    let region: Decimal =
        select_coefficient(&store.region_coefficients(version_id), &input.region_id)
            .map(|row| row.coefficient)
            .ok_or(DomainError::RegionCoefficientNotFound {
                region_id: input.region_id,
            })?;

    let power: Decimal = select_coefficient(&store.power_coefficients(version_id), &input.power_hp)
        .map(|row| row.coefficient)
        .ok_or(DomainError::PowerCoefficientNotFound {
            power_hp: input.power_hp,
        })?;

    let term: Decimal = select_coefficient(&store.term_coefficients(version_id), &input.term_months)
        .map(|row| row.coefficient)
        .ok_or(DomainError::TermCoefficientNotFound {
            term_months: input.term_months,
        })?;

    let driver_mode_row = store
        .driver_mode_coefficients(version_id)
        .ok_or(DomainError::DriverModeCoefficientNotFound)?;
    let driver_mode: Decimal = match input.driver_mode {
        DriverMode::Limited => driver_mode_row.limited,
        DriverMode::Unlimited => driver_mode_row.unlimited,
    };

    let age_experience: Decimal = match driver_profile {
        // Unlimited drivers are priced without an age/experience factor.
        None => Decimal::ONE,
        Some(profile) => select_coefficient(
            &store.kvs_coefficients(version_id),
            &(profile.age_years, profile.experience_years),
        )
        .map(|row| row.coefficient)
        .ok_or(DomainError::KvsCoefficientNotFound {
            age_years: profile.age_years,
            experience_years: profile.experience_years,
        })?,
    };

    let kbm: Decimal = if kbm_table_present {
        select_coefficient(&store.kbm_coefficients(version_id), &kbm_class)
            .map(|row| row.coefficient)
            .ok_or(DomainError::KbmClassNotFound {
                class_code: kbm_class.as_str().to_string(),
            })?
    } else {
        default_kbm_coefficient(&kbm_class)
    };

    let factors: PremiumFactors = PremiumFactors {
        tariff_version_id: version_id,
        base_rate,
        region,
        power,
        driver_mode,
        term,
        age_experience,
        kbm_class: kbm_class.clone(),
        kbm,
    };
    let amount: Decimal = compose_premium(&factors);

    let calculation_id: i64 = store.insert_calculation(NewCalculationRecord {
        user_id,
        vehicle_category_id: input.vehicle_category_id,
        region_id: input.region_id,
        power_hp: input.power_hp,
        driver_mode: input.driver_mode,
        term_months: input.term_months,
        driver_birth_date: input.driver_birth_date,
        license_issue_date: input.license_issue_date,
        kbm_class,
        factors: factors.clone(),
        amount,
        created_at: now,
    });

    Ok(PricingResult {
        calculation_id,
        factors,
        driver_profile,
        amount,
    })
}
