// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment orchestration: starting, confirming, and failing a payment.
//!
//! A payment operation moves three rows in lockstep — payment,
//! application, policy — each through its own conditional write. The
//! expected-status sets are exactly the legal source statuses, so a
//! concurrent decision on any of the three surfaces as a conflict.

use crate::error::CoreError;
use crate::store::CaseStore;
use osago_audit::HistoryEntry;
use osago_domain::{
    ApplicationStatus, CardDetails, DomainError, PaymentStatus, PolicyStatus,
    confirm_payment_success as confirm_outcome, fail_payment as failure_outcome,
    start_payment as start_outcome,
};
use rust_decimal::Decimal;
use time::OffsetDateTime;

/// The outcome of starting a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedPayment {
    /// Identifier of the created payment.
    pub payment_id: i64,
    /// Status of the created payment.
    pub payment_status: PaymentStatus,
    /// Status the application advanced to.
    pub application_status: ApplicationStatus,
    /// Status the policy advanced to.
    pub policy_status: PolicyStatus,
}

/// The outcome of a confirmed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedPayment {
    /// Identifier of the confirmed payment.
    pub payment_id: i64,
    /// Status of the confirmed payment.
    pub payment_status: PaymentStatus,
    /// Status the application advanced to.
    pub application_status: ApplicationStatus,
    /// Status the policy advanced to.
    pub policy_status: PolicyStatus,
    /// The payment timestamp.
    pub paid_at: OffsetDateTime,
}

/// The outcome of a failed payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPayment {
    /// Identifier of the failed payment.
    pub payment_id: i64,
    /// Status of the failed payment.
    pub payment_status: PaymentStatus,
    /// Status the application reverted to.
    pub application_status: ApplicationStatus,
    /// Status the policy reverted to.
    pub policy_status: PolicyStatus,
}

fn resolve_policy_id<S: CaseStore>(store: &S, application_id: i64) -> Result<i64, CoreError> {
    store
        .application_policy_id(application_id)
        .ok_or(CoreError::NotFound {
            entity: "policy application",
            id: application_id,
        })?
        .ok_or(CoreError::NotFound {
            entity: "policy",
            id: application_id,
        })
}

/// Validates the card and creates a payment for an approved application.
///
/// Advances the application to `PAYMENT_PENDING` and the policy to
/// `PENDING_PAY` in the same operation.
///
/// # Errors
///
/// Returns an error if:
/// - The application, its policy, or the premium cannot be found
/// - The provider name is blank
/// - The application is not approved, or the card fails validation
/// - A concurrent actor moved the application or policy first (`Conflict`)
pub fn start_payment_for_application<S: CaseStore>(
    store: &S,
    application_id: i64,
    card: &CardDetails,
    provider: &str,
    now: OffsetDateTime,
) -> Result<StartedPayment, CoreError> {
    if provider.trim().is_empty() {
        return Err(DomainError::MissingProvider.into());
    }

    let application_status: ApplicationStatus =
        store
            .application_status(application_id)
            .ok_or(CoreError::NotFound {
                entity: "policy application",
                id: application_id,
            })?;
    let policy_id: i64 = resolve_policy_id(store, application_id)?;
    let amount: Decimal = store.policy_premium(policy_id).ok_or(CoreError::NotFound {
        entity: "policy",
        id: policy_id,
    })?;

    let outcome = start_outcome(application_status, card)?;

    let payment_id: i64 = store.create_payment(policy_id, amount, provider.trim(), now);

    let affected: usize = store.update_application_status(
        application_id,
        &[ApplicationStatus::Approved, ApplicationStatus::PaymentPending],
        outcome.application_status,
        now,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy application",
            id: application_id,
        });
    }
    let affected: usize = store.update_policy_status(
        policy_id,
        &[PolicyStatus::Draft, PolicyStatus::PendingPay],
        outcome.policy_status,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy",
            id: policy_id,
        });
    }

    if application_status != outcome.application_status {
        store.append_application_history(
            application_id,
            HistoryEntry::new(
                Some(application_status.as_str().to_string()),
                outcome.application_status.as_str().to_string(),
                Some(String::from("payment started")),
                now,
                None,
            ),
        );
    }

    Ok(StartedPayment {
        payment_id,
        payment_status: outcome.payment_status,
        application_status: outcome.application_status,
        policy_status: outcome.policy_status,
    })
}

/// Confirms the latest payment of an application as successful.
///
/// Sets the payment to `SUCCESS`, the application to `PAID`, the policy
/// to `ACTIVE`, and signals a client-facing notification.
///
/// # Errors
///
/// Returns an error if:
/// - The application, its policy, or its payment cannot be found
/// - The payment or application is not in a confirmable status
/// - A concurrent actor moved any of the three rows first (`Conflict`)
pub fn confirm_payment_success<S: CaseStore>(
    store: &S,
    application_id: i64,
    now: OffsetDateTime,
) -> Result<ConfirmedPayment, CoreError> {
    let application_status: ApplicationStatus =
        store
            .application_status(application_id)
            .ok_or(CoreError::NotFound {
                entity: "policy application",
                id: application_id,
            })?;
    let policy_id: i64 = resolve_policy_id(store, application_id)?;
    let payment_id: i64 =
        store
            .latest_payment_for_application(application_id)
            .ok_or(CoreError::NotFound {
                entity: "payment",
                id: application_id,
            })?;
    let payment_status: PaymentStatus =
        store.payment_status(payment_id).ok_or(CoreError::NotFound {
            entity: "payment",
            id: payment_id,
        })?;

    let outcome = confirm_outcome(payment_status, application_status, now)?;

    let affected: usize = store.update_payment_status(
        payment_id,
        &[PaymentStatus::New, PaymentStatus::Pending],
        outcome.payment_status,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "payment",
            id: payment_id,
        });
    }
    let affected: usize = store.update_application_status(
        application_id,
        &[ApplicationStatus::PaymentPending, ApplicationStatus::Approved],
        outcome.application_status,
        now,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy application",
            id: application_id,
        });
    }
    let affected: usize = store.update_policy_status(
        policy_id,
        &[PolicyStatus::PendingPay, PolicyStatus::Draft],
        outcome.policy_status,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy",
            id: policy_id,
        });
    }

    store.append_application_history(
        application_id,
        HistoryEntry::new(
            Some(application_status.as_str().to_string()),
            outcome.application_status.as_str().to_string(),
            Some(String::from("payment confirmed")),
            now,
            None,
        ),
    );

    if outcome.notify_client {
        if let Some(user_id) = store.application_user_id(application_id) {
            store.push_notification(
                user_id,
                outcome.notification_title,
                outcome.notification_message,
            );
        }
    }

    Ok(ConfirmedPayment {
        payment_id,
        payment_status: outcome.payment_status,
        application_status: outcome.application_status,
        policy_status: outcome.policy_status,
        paid_at: outcome.paid_at,
    })
}

/// Marks the latest payment of an application as failed.
///
/// The application reverts to `APPROVED` if it had advanced to
/// `PAYMENT_PENDING`; the policy reverts to `DRAFT`. No client
/// notification is sent.
///
/// # Errors
///
/// Returns an error if:
/// - The application, its policy, or its payment cannot be found
/// - The payment has already settled
/// - A concurrent actor moved a row first (`Conflict`)
pub fn fail_payment<S: CaseStore>(
    store: &S,
    application_id: i64,
    now: OffsetDateTime,
) -> Result<FailedPayment, CoreError> {
    let application_status: ApplicationStatus =
        store
            .application_status(application_id)
            .ok_or(CoreError::NotFound {
                entity: "policy application",
                id: application_id,
            })?;
    let policy_id: i64 = resolve_policy_id(store, application_id)?;
    let payment_id: i64 =
        store
            .latest_payment_for_application(application_id)
            .ok_or(CoreError::NotFound {
                entity: "payment",
                id: application_id,
            })?;
    let payment_status: PaymentStatus =
        store.payment_status(payment_id).ok_or(CoreError::NotFound {
            entity: "payment",
            id: payment_id,
        })?;

    let outcome = failure_outcome(payment_status, application_status)?;

    let affected: usize = store.update_payment_status(
        payment_id,
        &[PaymentStatus::New, PaymentStatus::Pending],
        outcome.payment_status,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "payment",
            id: payment_id,
        });
    }

    if outcome.application_status != application_status {
        let affected: usize = store.update_application_status(
            application_id,
            &[application_status],
            outcome.application_status,
            now,
        );
        if affected == 0 {
            return Err(CoreError::Conflict {
                entity: "policy application",
                id: application_id,
            });
        }
        store.append_application_history(
            application_id,
            HistoryEntry::new(
                Some(application_status.as_str().to_string()),
                outcome.application_status.as_str().to_string(),
                Some(String::from("payment failed")),
                now,
                None,
            ),
        );
    }

    let affected: usize = store.update_policy_status(
        policy_id,
        &[PolicyStatus::PendingPay, PolicyStatus::Draft],
        outcome.policy_status,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy",
            id: policy_id,
        });
    }

    Ok(FailedPayment {
        payment_id,
        payment_status: outcome.payment_status,
        application_status: outcome.application_status,
        policy_status: outcome.policy_status,
    })
}
