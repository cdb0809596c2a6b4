// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! DTOs are distinct from domain types and represent the API contract:
//! enums travel as strings and are parsed at the handler boundary.

use osago_audit::HistoryEntry;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// API request for a premium quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// The vehicle category reference.
    pub vehicle_category_id: i64,
    /// The registration region reference.
    pub region_id: i64,
    /// Declared engine power in horsepower.
    pub power_hp: i32,
    /// Requested policy term in months.
    pub term_months: i32,
    /// Driver mode: "limited" or "unlimited".
    pub driver_mode: String,
    /// Driver birth date; required for limited mode.
    pub driver_birth_date: Option<Date>,
    /// License issue date; required for limited mode.
    pub license_issue_date: Option<Date>,
    /// Bonus-malus class code; blank defaults to class "3".
    pub kbm_class_code: Option<String>,
}

/// API response for a successful quote, with the full factor breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Identifier of the persisted calculation record.
    pub calculation_id: i64,
    /// The tariff version the quote was priced from.
    pub tariff_version_id: i64,
    /// Base rate for the vehicle category.
    pub base_rate: Decimal,
    /// Regional multiplier.
    pub region_coefficient: Decimal,
    /// Engine power band multiplier.
    pub power_coefficient: Decimal,
    /// Driver-mode multiplier.
    pub driver_mode_coefficient: Decimal,
    /// Term length multiplier.
    pub term_coefficient: Decimal,
    /// Age/experience multiplier (1 for unlimited mode).
    pub kvs_coefficient: Decimal,
    /// The normalized bonus-malus class.
    pub kbm_class_code: String,
    /// Bonus-malus multiplier.
    pub kbm_coefficient: Decimal,
    /// Derived driver age, for limited mode.
    pub driver_age_years: Option<i32>,
    /// Derived driving experience, for limited mode.
    pub driver_experience_years: Option<i32>,
    /// The final premium.
    pub amount: Decimal,
}

/// API request to apply an action to a policy application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationActionRequest {
    /// The action, e.g. "TAKE_IN_REVIEW" or "APPROVE".
    pub action: String,
    /// Optional decision rationale.
    pub comment: Option<String>,
}

/// API response after an application action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationActionResponse {
    /// The application acted on.
    pub application_id: i64,
    /// The new status.
    pub status: String,
}

/// API response after deleting a draft application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDraftResponse {
    /// The application removed.
    pub application_id: i64,
    /// Always "DELETED".
    pub status: String,
}

/// API request to apply an action to a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimActionRequest {
    /// The action, e.g. "APPROVE", "REJECT", "CLOSE".
    pub action: String,
    /// Payout amount; required for approval.
    pub approved_amount: Option<Decimal>,
    /// Decision rationale; required for rejection.
    pub decision_comment: Option<String>,
    /// For close: whether the payout was made.
    pub paid: Option<bool>,
    /// For close: when the payout was made.
    pub paid_at: Option<OffsetDateTime>,
}

/// API response after a claim action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimActionResponse {
    /// The claim acted on.
    pub claim_id: i64,
    /// The new status.
    pub status: String,
}

/// API request to start a card payment for an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPaymentRequest {
    /// The card number.
    pub card_number: String,
    /// Expiration month (1..=12).
    pub exp_month: i32,
    /// Expiration four-digit year.
    pub exp_year: i32,
    /// The card verification value.
    pub cvv: String,
    /// The payment provider label.
    pub provider: String,
}

/// API response after starting a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentStartResponse {
    /// Identifier of the created payment.
    pub payment_id: i64,
    /// Status of the created payment.
    pub payment_status: String,
    /// Status the application advanced to.
    pub application_status: String,
    /// Status the policy advanced to.
    pub policy_status: String,
}

/// API response after confirming a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmResponse {
    /// Identifier of the confirmed payment.
    pub payment_id: i64,
    /// Status of the confirmed payment.
    pub payment_status: String,
    /// Status the application advanced to.
    pub application_status: String,
    /// Status the policy advanced to.
    pub policy_status: String,
    /// The payment timestamp.
    pub paid_at: OffsetDateTime,
}

/// API response after failing a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFailResponse {
    /// Identifier of the failed payment.
    pub payment_id: i64,
    /// Status of the failed payment.
    pub payment_status: String,
    /// Status the application reverted to.
    pub application_status: String,
    /// Status the policy reverted to.
    pub policy_status: String,
}

/// API response after ensuring an agent assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignAgentResponse {
    /// The user the assignment was ensured for.
    pub user_id: i64,
    /// The assigned agent; `None` when no agents exist.
    pub agent_id: Option<i64>,
}

/// A status-history entry as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntryInfo {
    /// The status before the transition.
    pub old_status: Option<String>,
    /// The status after the transition.
    pub new_status: String,
    /// Optional comment attached to the transition.
    pub comment: Option<String>,
    /// When the transition happened.
    pub created_at: OffsetDateTime,
    /// The acting user, if user-initiated.
    pub changed_by_user_id: Option<i64>,
}

impl From<&HistoryEntry> for HistoryEntryInfo {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            old_status: entry.old_status().map(String::from),
            new_status: entry.new_status().to_string(),
            comment: entry.comment().map(String::from),
            created_at: entry.created_at(),
            changed_by_user_id: entry.changed_by_user_id(),
        }
    }
}
