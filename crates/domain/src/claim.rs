// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Claim status tracking, transition logic, and decision validation.
//!
//! A decision carries either an approved amount or a rejection comment,
//! never both. Closed and rejected claims reject all further writes,
//! including attachment uploads and client notes.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of an insurance claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimStatus {
    /// Filed, awaiting an agent.
    New,
    /// An agent is reviewing the claim.
    InReview,
    /// The agent requested more information from the client.
    NeedInfo,
    /// Approved with a payout amount.
    Approved,
    /// Rejected with a rationale.
    Rejected,
    /// Closed after a decision. Terminal.
    Closed,
}

impl ClaimStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InReview => "IN_REVIEW",
            Self::NeedInfo => "NEED_INFO",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns true if no action can leave this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl FromStr for ClaimStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "IN_REVIEW" => Ok(Self::InReview),
            "NEED_INFO" => Ok(Self::NeedInfo),
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidStatus {
                entity: "claim",
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actions that can be applied to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClaimAction {
    /// Agent takes the claim into review.
    TakeInReview,
    /// Agent requests additional information.
    RequestInfo,
    /// Client supplied the requested information.
    ClientUpdate,
    /// Agent approves a payout.
    Approve,
    /// Agent rejects the claim.
    Reject,
    /// Agent closes a decided claim.
    Close,
}

impl ClaimAction {
    /// Returns the string representation of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TakeInReview => "TAKE_IN_REVIEW",
            Self::RequestInfo => "REQUEST_INFO",
            Self::ClientUpdate => "CLIENT_UPDATE",
            Self::Approve => "APPROVE",
            Self::Reject => "REJECT",
            Self::Close => "CLOSE",
        }
    }
}

impl FromStr for ClaimAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TAKE_IN_REVIEW" => Ok(Self::TakeInReview),
            "REQUEST_INFO" => Ok(Self::RequestInfo),
            "CLIENT_UPDATE" => Ok(Self::ClientUpdate),
            "APPROVE" => Ok(Self::Approve),
            "REJECT" => Ok(Self::Reject),
            "CLOSE" => Ok(Self::Close),
            _ => Err(DomainError::InvalidAction {
                entity: "claim",
                action: s.to_string(),
            }),
        }
    }
}

/// The complete claim transition table.
///
/// Any `(status, action)` pair absent from this table is invalid.
/// Both decisions are reachable from every active handling status: an
/// agent may approve or reject immediately without taking the claim into
/// review first.
const TRANSITIONS: [(ClaimStatus, ClaimAction, ClaimStatus); 11] = [
    (ClaimStatus::New, ClaimAction::TakeInReview, ClaimStatus::InReview),
    (ClaimStatus::New, ClaimAction::Approve, ClaimStatus::Approved),
    (ClaimStatus::New, ClaimAction::Reject, ClaimStatus::Rejected),
    (
        ClaimStatus::InReview,
        ClaimAction::RequestInfo,
        ClaimStatus::NeedInfo,
    ),
    (ClaimStatus::InReview, ClaimAction::Approve, ClaimStatus::Approved),
    (ClaimStatus::InReview, ClaimAction::Reject, ClaimStatus::Rejected),
    (
        ClaimStatus::NeedInfo,
        ClaimAction::ClientUpdate,
        ClaimStatus::InReview,
    ),
    (ClaimStatus::NeedInfo, ClaimAction::Approve, ClaimStatus::Approved),
    (ClaimStatus::NeedInfo, ClaimAction::Reject, ClaimStatus::Rejected),
    (ClaimStatus::Approved, ClaimAction::Close, ClaimStatus::Closed),
    (ClaimStatus::Rejected, ClaimAction::Close, ClaimStatus::Closed),
];

/// Computes the status an action leads to from the current status.
///
/// # Errors
///
/// Returns `DomainError::InvalidTransition` for any pair not listed in the
/// transition table.
pub fn next_claim_status(
    current: ClaimStatus,
    action: ClaimAction,
) -> Result<ClaimStatus, DomainError> {
    TRANSITIONS
        .iter()
        .find(|(from, via, _)| *from == current && *via == action)
        .map(|(_, _, to)| *to)
        .ok_or(DomainError::InvalidTransition {
            entity: "claim",
            from: current.as_str(),
            action: action.as_str(),
        })
}

/// The decision payload accompanying an approve or reject action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimDecision {
    /// The payout amount; required and strictly positive for approval.
    pub approved_amount: Option<Decimal>,
    /// The rationale; required and non-blank for rejection.
    pub decision_comment: Option<String>,
}

/// Validates the decision payload for a given action.
///
/// Actions other than approve/reject carry no decision requirements and
/// pass unconditionally.
///
/// # Errors
///
/// Returns an error if:
/// - Approval has no amount, or the amount is not strictly positive
/// - Rejection has no comment, or the comment is blank
pub fn validate_claim_decision(
    action: ClaimAction,
    decision: &ClaimDecision,
) -> Result<(), DomainError> {
    match action {
        ClaimAction::Approve => match decision.approved_amount {
            None => Err(DomainError::MissingApprovedAmount),
            Some(amount) if amount <= Decimal::ZERO => {
                Err(DomainError::NonPositiveApprovedAmount { amount })
            }
            Some(_) => Ok(()),
        },
        ClaimAction::Reject => {
            let has_comment: bool = decision
                .decision_comment
                .as_deref()
                .is_some_and(|comment| !comment.trim().is_empty());
            if has_comment {
                Ok(())
            } else {
                Err(DomainError::MissingDecisionComment)
            }
        }
        _ => Ok(()),
    }
}

/// Whether a claim still accepts writes (attachments, client notes).
///
/// False exactly for closed and rejected claims.
#[must_use]
pub const fn can_operate(status: ClaimStatus) -> bool {
    !matches!(status, ClaimStatus::Closed | ClaimStatus::Rejected)
}

/// Resolves the payout timestamp recorded when closing a claim.
///
/// A paid closure stamps the supplied time, defaulting to `now`; an unpaid
/// closure clears the timestamp.
#[must_use]
pub const fn resolve_close(
    paid: bool,
    paid_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> Option<OffsetDateTime> {
    if paid {
        match paid_at {
            Some(at) => Some(at),
            None => Some(now),
        }
    } else {
        None
    }
}
