// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Policy application status tracking and transition logic.
//!
//! Transitions are enumerated in a static table; anything not listed is an
//! invalid transition. Status changes are agent- or client-initiated; the
//! system never advances an application on its own.

use crate::error::DomainError;
use crate::types::PolicyStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a policy application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted, awaiting an agent.
    New,
    /// An agent is reviewing the application.
    InReview,
    /// The agent requested more information from the client.
    NeedInfo,
    /// Approved; the client may start payment.
    Approved,
    /// A payment has been started and awaits confirmation.
    PaymentPending,
    /// Paid; the policy is active. Terminal.
    Paid,
    /// Rejected by the agent. Terminal.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InReview => "IN_REVIEW",
            Self::NeedInfo => "NEED_INFO",
            Self::Approved => "APPROVED",
            Self::PaymentPending => "PAYMENT_PENDING",
            Self::Paid => "PAID",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns true if no action can leave this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Rejected)
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "IN_REVIEW" => Ok(Self::InReview),
            "NEED_INFO" => Ok(Self::NeedInfo),
            "APPROVED" => Ok(Self::Approved),
            "PAYMENT_PENDING" => Ok(Self::PaymentPending),
            "PAID" => Ok(Self::Paid),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidStatus {
                entity: "policy application",
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actions that can be applied to a policy application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationAction {
    /// Agent takes the application into review.
    TakeInReview,
    /// Agent requests additional information.
    RequestInfo,
    /// Agent approves the application.
    Approve,
    /// Agent rejects the application.
    Reject,
    /// Client starts payment.
    Pay,
    /// Payment provider confirms the payment.
    ConfirmPayment,
}

impl ApplicationAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TakeInReview => "TAKE_IN_REVIEW",
            Self::RequestInfo => "REQUEST_INFO",
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::Pay => "PAY",
            Self::ConfirmPayment => "CONFIRM_PAYMENT",
        }
    }
}

impl FromStr for ApplicationAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TAKE_IN_REVIEW" => Ok(Self::TakeInReview),
            "REQUEST_INFO" => Ok(Self::RequestInfo),
            "APPROVE" => Ok(Self::Approve),
            "REJECT" => Ok(Self::Reject),
            "PAY" => Ok(Self::Pay),
            "CONFIRM_PAYMENT" => Ok(Self::ConfirmPayment),
            _ => Err(DomainError::InvalidAction {
                entity: "policy application",
                action: s.to_string(),
            }),
        }
    }
}

/// The complete application transition table.
///
/// Any `(status, action)` pair absent from this table is invalid.
const TRANSITIONS: [(ApplicationStatus, ApplicationAction, ApplicationStatus); 10] = [
    (
        ApplicationStatus::New,
        ApplicationAction::TakeInReview,
        ApplicationStatus::InReview,
    ),
    (
        ApplicationStatus::New,
        ApplicationAction::Reject,
        ApplicationStatus::Rejected,
    ),
    (
        ApplicationStatus::InReview,
        ApplicationAction::RequestInfo,
        ApplicationStatus::NeedInfo,
    ),
    (
        ApplicationStatus::InReview,
        ApplicationAction::Approve,
        ApplicationStatus::Approved,
    ),
    (
        ApplicationStatus::InReview,
        ApplicationAction::Reject,
        ApplicationStatus::Rejected,
    ),
    (
        ApplicationStatus::NeedInfo,
        ApplicationAction::TakeInReview,
        ApplicationStatus::InReview,
    ),
    (
        ApplicationStatus::NeedInfo,
        ApplicationAction::Reject,
        ApplicationStatus::Rejected,
    ),
    (
        ApplicationStatus::Approved,
        ApplicationAction::Pay,
        ApplicationStatus::PaymentPending,
    ),
    (
        ApplicationStatus::Approved,
        ApplicationAction::Reject,
        ApplicationStatus::Rejected,
    ),
    (
        ApplicationStatus::PaymentPending,
        ApplicationAction::ConfirmPayment,
        ApplicationStatus::Paid,
    ),
];

/// Computes the status an action leads to from the current status.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` for any pair not listed in the
/// transition table.
pub fn next_application_status(
    current: ApplicationStatus,
    action: ApplicationAction,
) -> Result<ApplicationStatus, DomainError> {
    TRANSITIONS
        .iter()
        .find(|(from, via, _)| *from == current && *via == action)
        .map(|(_, _, to)| *to)
        .ok_or(DomainError::InvalidTransition {
            entity: "policy application",
            from: current.as_str(),
            action: action.as_str(),
        })
}

/// Whether a draft application may still be deleted by its owner.
///
/// Two conditions must hold: the application has not reached a terminal
/// status, and the linked policy (if one was issued) has not started
/// activation. The policy check is deliberate: a policy past `PENDING_PAY`
/// must not be silently destroyed with its application.
#[must_use]
pub const fn can_delete_draft(
    application_status: ApplicationStatus,
    policy_status: Option<PolicyStatus>,
) -> bool {
    let allowed_by_application: bool = matches!(
        application_status,
        ApplicationStatus::New
            | ApplicationStatus::InReview
            | ApplicationStatus::NeedInfo
            | ApplicationStatus::Approved
            | ApplicationStatus::PaymentPending
    );
    let allowed_by_policy: bool = matches!(
        policy_status,
        None | Some(PolicyStatus::Draft) | Some(PolicyStatus::PendingPay)
    );
    allowed_by_application && allowed_by_policy
}
