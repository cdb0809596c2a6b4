// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No tariff version is active for the requested calculation date.
    NoActiveTariff,
    /// No base rate row exists for the vehicle category.
    BaseRateNotFound {
        /// The requested vehicle category.
        vehicle_category_id: i64,
    },
    /// No region coefficient row exists for the region.
    RegionCoefficientNotFound {
        /// The requested region.
        region_id: i64,
    },
    /// No power coefficient band contains the requested engine power.
    PowerCoefficientNotFound {
        /// The requested engine power in horsepower.
        power_hp: i32,
    },
    /// No term coefficient row exists for the requested term.
    TermCoefficientNotFound {
        /// The requested term in months.
        term_months: i32,
    },
    /// The driver-mode coefficient pair is missing from the tariff version.
    DriverModeCoefficientNotFound,
    /// No age/experience coefficient band matches the derived driver profile.
    KvsCoefficientNotFound {
        /// Derived driver age in full years.
        age_years: i32,
        /// Derived driving experience in full years.
        experience_years: i32,
    },
    /// The bonus-malus class is not present in the active tariff.
    KbmClassNotFound {
        /// The normalized class code.
        class_code: String,
    },
    /// The bonus-malus class code is not one of the legal codes.
    InvalidKbmClass(String),
    /// Engine power is outside the supported range.
    PowerOutOfRange {
        /// The rejected value.
        power_hp: i32,
    },
    /// Term length must be a positive number of months.
    InvalidTermMonths {
        /// The rejected value.
        term_months: i32,
    },
    /// A date field required for the limited-drivers mode is missing.
    MissingDriverDate {
        /// The missing field name.
        field: &'static str,
    },
    /// A date field lies in the future.
    DateInFuture {
        /// The offending field name.
        field: &'static str,
        /// The rejected date.
        date: Date,
    },
    /// A status string could not be parsed.
    InvalidStatus {
        /// The entity the status belongs to.
        entity: &'static str,
        /// The unparseable value.
        status: String,
    },
    /// An action string could not be parsed.
    InvalidAction {
        /// The entity the action applies to.
        entity: &'static str,
        /// The unparseable value.
        action: String,
    },
    /// The requested action is not legal from the current status.
    InvalidTransition {
        /// The entity the transition applies to.
        entity: &'static str,
        /// The current status.
        from: &'static str,
        /// The attempted action.
        action: &'static str,
    },
    /// The claim no longer accepts writes.
    ClaimNotOperable {
        /// The status that closed the claim to updates.
        status: &'static str,
    },
    /// A payment provider name is required.
    MissingProvider,
    /// An approval decision is missing its monetary amount.
    MissingApprovedAmount,
    /// An approval amount must be strictly positive.
    NonPositiveApprovedAmount {
        /// The rejected amount.
        amount: Decimal,
    },
    /// A rejection decision is missing its rationale comment.
    MissingDecisionComment,
    /// Card number length is outside 13..=19 digits.
    InvalidCardNumberLength {
        /// Number of digits after stripping separators.
        digits: usize,
    },
    /// Card number failed the Luhn checksum.
    CardChecksumFailed,
    /// Card expiry month is outside 1..=12.
    InvalidExpiryMonth {
        /// The rejected value.
        month: i32,
    },
    /// Card expiry year is outside the accepted window.
    InvalidExpiryYear {
        /// The rejected value.
        year: i32,
    },
    /// CVV must be 3 or 4 digits.
    InvalidCvv,
    /// Payment cannot be started because the application is not approved.
    PaymentNotStartable {
        /// The application status that blocked the payment.
        application_status: &'static str,
    },
    /// Payment cannot be confirmed from the current statuses.
    PaymentNotConfirmable {
        /// The current payment status.
        payment_status: &'static str,
        /// The current application status.
        application_status: &'static str,
    },
    /// Payment cannot be failed from the current status.
    PaymentNotFailable {
        /// The current payment status.
        payment_status: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoActiveTariff => {
                write!(f, "No active tariff version found for provided parameters")
            }
            Self::BaseRateNotFound {
                vehicle_category_id,
            } => {
                write!(
                    f,
                    "Base rate not found for vehicle category {vehicle_category_id}"
                )
            }
            Self::RegionCoefficientNotFound { region_id } => {
                write!(f, "Region coefficient not found for region {region_id}")
            }
            Self::PowerCoefficientNotFound { power_hp } => {
                write!(f, "Power coefficient not found for {power_hp} hp")
            }
            Self::TermCoefficientNotFound { term_months } => {
                write!(
                    f,
                    "Insurance term coefficient not found for {term_months} months"
                )
            }
            Self::DriverModeCoefficientNotFound => {
                write!(f, "Driver-mode coefficient not found in active tariff")
            }
            Self::KvsCoefficientNotFound {
                age_years,
                experience_years,
            } => {
                write!(
                    f,
                    "Age/experience coefficient not found for age {age_years} and experience {experience_years}"
                )
            }
            Self::KbmClassNotFound { class_code } => {
                write!(
                    f,
                    "Bonus-malus class '{class_code}' is not available in the active tariff"
                )
            }
            Self::InvalidKbmClass(code) => {
                write!(f, "Invalid bonus-malus class code: '{code}'")
            }
            Self::PowerOutOfRange { power_hp } => {
                write!(f, "Engine power must be in range 1..=2000 hp, got {power_hp}")
            }
            Self::InvalidTermMonths { term_months } => {
                write!(f, "Term must be a positive number of months, got {term_months}")
            }
            Self::MissingDriverDate { field } => {
                write!(f, "{field} is required when the driver list is limited")
            }
            Self::DateInFuture { field, date } => {
                write!(f, "{field} cannot be in the future: {date}")
            }
            Self::InvalidStatus { entity, status } => {
                write!(f, "Invalid {entity} status: '{status}'")
            }
            Self::InvalidAction { entity, action } => {
                write!(f, "Invalid {entity} action: '{action}'")
            }
            Self::InvalidTransition {
                entity,
                from,
                action,
            } => {
                write!(f, "Transition {from} -> {action} is not allowed for {entity}")
            }
            Self::ClaimNotOperable { status } => {
                write!(f, "Claim in status {status} no longer accepts updates")
            }
            Self::MissingProvider => {
                write!(f, "provider is required")
            }
            Self::MissingApprovedAmount => {
                write!(f, "approvedAmount is required for approval")
            }
            Self::NonPositiveApprovedAmount { amount } => {
                write!(f, "approvedAmount must be > 0, got {amount}")
            }
            Self::MissingDecisionComment => {
                write!(f, "decisionComment is required for rejection")
            }
            Self::InvalidCardNumberLength { digits } => {
                write!(f, "Card number length is invalid: {digits} digits")
            }
            Self::CardChecksumFailed => {
                write!(f, "Card number failed Luhn check")
            }
            Self::InvalidExpiryMonth { month } => {
                write!(f, "Expiration month is invalid: {month}")
            }
            Self::InvalidExpiryYear { year } => {
                write!(f, "Expiration year is invalid: {year}")
            }
            Self::InvalidCvv => {
                write!(f, "CVV is invalid")
            }
            Self::PaymentNotStartable { application_status } => {
                write!(
                    f,
                    "Application is not approved for payment (status: {application_status})"
                )
            }
            Self::PaymentNotConfirmable {
                payment_status,
                application_status,
            } => {
                write!(
                    f,
                    "Payment cannot be confirmed (payment: {payment_status}, application: {application_status})"
                )
            }
            Self::PaymentNotFailable { payment_status } => {
                write!(f, "Payment cannot be failed in status {payment_status}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
