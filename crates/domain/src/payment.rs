// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment status tracking, card validation, and the combined payment
//! outcomes.
//!
//! A payment operation moves three entities in lockstep: the payment
//! itself, the owning application, and the issued policy. Each pure
//! function here returns the target statuses for all three; applying them
//! against storage is the caller's concern.

use crate::application::ApplicationStatus;
use crate::error::DomainError;
use crate::types::PolicyStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Created, not yet confirmed by the provider.
    New,
    /// Reported in-flight by the provider.
    Pending,
    /// Confirmed successful. Terminal.
    Success,
    /// Failed or abandoned. Terminal.
    Failed,
}

impl PaymentStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }

    /// Returns true if the payment can still be confirmed or failed.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::New | Self::Pending)
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidStatus {
                entity: "payment",
                status: s.to_string(),
            }),
        }
    }
}

/// Card details supplied when starting a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    /// The card number; separators are stripped before validation.
    pub card_number: String,
    /// Expiration month (1..=12).
    pub exp_month: i32,
    /// Expiration four-digit year.
    pub exp_year: i32,
    /// The card verification value (3 or 4 digits).
    pub cvv: String,
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a number with the Luhn checksum.
///
/// Digits are summed from the right with every second digit doubled;
/// doubles above 9 subtract 9. Valid iff the total is divisible by 10.
#[must_use]
pub fn luhn_valid(number: &str) -> bool {
    let mut sum: u32 = 0;
    let mut alternate: bool = false;

    for c in number.chars().rev() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        let mut n: u32 = digit;
        if alternate {
            n *= 2;
            if n > 9 {
                n -= 9;
            }
        }
        sum += n;
        alternate = !alternate;
    }

    sum % 10 == 0
}

/// Validates card details before a payment may be created.
///
/// # Errors
///
/// Returns an error if:
/// - The digits-only card number is shorter than 13 or longer than 19
/// - The card number fails the Luhn checksum
/// - The expiry month is outside 1..=12
/// - The expiry year is outside 2024..=2100
/// - The CVV is not 3 or 4 digits
pub fn validate_card(card: &CardDetails) -> Result<(), DomainError> {
    let digits: String = digits_only(&card.card_number);
    if !(13..=19).contains(&digits.len()) {
        return Err(DomainError::InvalidCardNumberLength {
            digits: digits.len(),
        });
    }
    if !luhn_valid(&digits) {
        return Err(DomainError::CardChecksumFailed);
    }
    if !(1..=12).contains(&card.exp_month) {
        return Err(DomainError::InvalidExpiryMonth {
            month: card.exp_month,
        });
    }
    if !(2024..=2100).contains(&card.exp_year) {
        return Err(DomainError::InvalidExpiryYear {
            year: card.exp_year,
        });
    }
    let cvv_digits: String = digits_only(&card.cvv);
    if !(3..=4).contains(&cvv_digits.len()) {
        return Err(DomainError::InvalidCvv);
    }
    Ok(())
}

/// The target statuses produced by starting a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStart {
    /// Status of the newly created payment.
    pub payment_status: PaymentStatus,
    /// Status the owning application advances to.
    pub application_status: ApplicationStatus,
    /// Status the issued policy advances to.
    pub policy_status: PolicyStatus,
}

/// Validates the card and computes the statuses for a new payment.
///
/// Only legal while the owning application is approved (or already has a
/// pending payment being retried).
///
/// # Errors
///
/// Returns an error if the application is not in `APPROVED` or
/// `PAYMENT_PENDING`, or if the card fails validation.
pub fn start_payment(
    application_status: ApplicationStatus,
    card: &CardDetails,
) -> Result<PaymentStart, DomainError> {
    if !matches!(
        application_status,
        ApplicationStatus::Approved | ApplicationStatus::PaymentPending
    ) {
        return Err(DomainError::PaymentNotStartable {
            application_status: application_status.as_str(),
        });
    }
    validate_card(card)?;

    Ok(PaymentStart {
        payment_status: PaymentStatus::New,
        application_status: ApplicationStatus::PaymentPending,
        policy_status: PolicyStatus::PendingPay,
    })
}

/// The combined outcome of a confirmed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirm {
    /// Status of the confirmed payment.
    pub payment_status: PaymentStatus,
    /// Status the owning application advances to.
    pub application_status: ApplicationStatus,
    /// Status the issued policy advances to.
    pub policy_status: PolicyStatus,
    /// Whether the client should be notified.
    pub notify_client: bool,
    /// Notification title.
    pub notification_title: &'static str,
    /// Notification body.
    pub notification_message: &'static str,
    /// The payment timestamp.
    pub paid_at: OffsetDateTime,
}

/// Computes the statuses for a successful payment confirmation.
///
/// # Errors
///
/// Returns an error if the payment is not open (`NEW`/`PENDING`) or the
/// application is not awaiting payment (`PAYMENT_PENDING`/`APPROVED`).
pub fn confirm_payment_success(
    payment_status: PaymentStatus,
    application_status: ApplicationStatus,
    now: OffsetDateTime,
) -> Result<PaymentConfirm, DomainError> {
    if !matches!(
        application_status,
        ApplicationStatus::PaymentPending | ApplicationStatus::Approved
    ) || !payment_status.is_open()
    {
        return Err(DomainError::PaymentNotConfirmable {
            payment_status: payment_status.as_str(),
            application_status: application_status.as_str(),
        });
    }

    Ok(PaymentConfirm {
        payment_status: PaymentStatus::Success,
        application_status: ApplicationStatus::Paid,
        policy_status: PolicyStatus::Active,
        notify_client: true,
        notification_title: "Policy payment successful",
        notification_message: "Your policy has been activated.",
        paid_at: now,
    })
}

/// The combined outcome of a failed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentFailure {
    /// Status of the failed payment.
    pub payment_status: PaymentStatus,
    /// Status the owning application reverts to.
    pub application_status: ApplicationStatus,
    /// Status the issued policy reverts to.
    pub policy_status: PolicyStatus,
    /// Whether the client should be notified. Always false.
    pub notify_client: bool,
}

/// Computes the statuses for a failed payment.
///
/// The application reverts to `APPROVED` only if it had advanced to
/// `PAYMENT_PENDING`; any other status is left unchanged. The policy
/// always reverts to `DRAFT`.
///
/// # Errors
///
/// Returns an error if the payment is not open (`NEW`/`PENDING`).
pub fn fail_payment(
    payment_status: PaymentStatus,
    application_status: ApplicationStatus,
) -> Result<PaymentFailure, DomainError> {
    if !payment_status.is_open() {
        return Err(DomainError::PaymentNotFailable {
            payment_status: payment_status.as_str(),
        });
    }

    let reverted: ApplicationStatus = if application_status == ApplicationStatus::PaymentPending {
        ApplicationStatus::Approved
    } else {
        application_status
    };

    Ok(PaymentFailure {
        payment_status: PaymentStatus::Failed,
        application_status: reverted,
        policy_status: PolicyStatus::Draft,
        notify_client: false,
    })
}
