// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod application;
mod claim;
mod error;
mod payment;
mod quote;
mod tariff;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use application::{
    ApplicationAction, ApplicationStatus, can_delete_draft, next_application_status,
};
pub use claim::{
    ClaimAction, ClaimDecision, ClaimStatus, can_operate, next_claim_status, resolve_close,
    validate_claim_decision,
};
pub use error::DomainError;
pub use payment::{
    CardDetails, PaymentConfirm, PaymentFailure, PaymentStart, PaymentStatus,
    confirm_payment_success, fail_payment, luhn_valid, start_payment, validate_card,
};
pub use quote::{
    DriverProfile, PremiumFactors, QuoteInput, compose_premium, full_years_between,
    validate_quote_input,
};
pub use tariff::{
    BaseRateRow, CoefficientRow, DriverModeCoefficientRow, KbmCoefficientRow, KvsCoefficientRow,
    PowerCoefficientRow, RegionCoefficientRow, TariffVersion, TermCoefficientRow,
    default_kbm_coefficient, select_coefficient,
};
pub use types::{AccidentType, DriverMode, KBM_CLASS_CODES, KbmClass, PolicyStatus};
pub use validation::{
    ApplicationCreateData, ClaimCreateData, MAX_ATTACHMENT_BYTES, ValidationIssue,
    validate_application_create, validate_attachment, validate_claim_create,
};
