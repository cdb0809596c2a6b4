// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application and claim transition orchestration.
//!
//! Every transition follows the same sequence: read the current status,
//! let the domain compute the successor, apply a conditional write with
//! the read status as the expected set, and append a history entry. A
//! write that affects zero rows means another actor decided first; that
//! surfaces as a conflict, never as a silent overwrite.

use crate::error::CoreError;
use crate::store::{CaseStore, ClaimFieldUpdate};
use osago_audit::HistoryEntry;
use osago_domain::{
    ApplicationAction, ApplicationStatus, ClaimAction, ClaimDecision, ClaimStatus, DomainError,
    PolicyStatus, can_delete_draft, can_operate, next_application_status, next_claim_status,
    resolve_close, validate_claim_decision,
};
use time::OffsetDateTime;

fn history_entry(
    old_status: &str,
    new_status: &str,
    comment: Option<&str>,
    now: OffsetDateTime,
    acting_user_id: Option<i64>,
) -> HistoryEntry {
    HistoryEntry::new(
        Some(old_status.to_string()),
        new_status.to_string(),
        comment.map(ToString::to_string),
        now,
        acting_user_id,
    )
}

/// Applies an action to a policy application.
///
/// # Errors
///
/// Returns an error if:
/// - The application does not exist
/// - The action is not legal from the current status
/// - Another actor changed the status first (`Conflict`)
pub fn apply_application_action<S: CaseStore>(
    store: &S,
    application_id: i64,
    action: ApplicationAction,
    comment: Option<&str>,
    acting_user_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<ApplicationStatus, CoreError> {
    let current: ApplicationStatus =
        store
            .application_status(application_id)
            .ok_or(CoreError::NotFound {
                entity: "policy application",
                id: application_id,
            })?;
    let next: ApplicationStatus = next_application_status(current, action)?;

    let affected: usize = store.update_application_status(application_id, &[current], next, now);
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy application",
            id: application_id,
        });
    }

    store.append_application_history(
        application_id,
        history_entry(current.as_str(), next.as_str(), comment, now, acting_user_id),
    );

    Ok(next)
}

/// The payload accompanying a claim action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimActionPayload {
    /// Decision fields; validated for approve and reject.
    pub decision: ClaimDecision,
    /// For close: whether the payout was made.
    pub close_paid: bool,
    /// For close: when the payout was made; defaults to now when paid.
    pub close_paid_at: Option<OffsetDateTime>,
}

/// Computes the claim field updates an action carries.
fn claim_field_update(
    action: ClaimAction,
    payload: &ClaimActionPayload,
    now: OffsetDateTime,
) -> ClaimFieldUpdate {
    match action {
        ClaimAction::Approve => ClaimFieldUpdate {
            approved_amount: Some(payload.decision.approved_amount),
            decision_comment: Some(payload.decision.decision_comment.clone()),
            decided_at: Some(Some(now)),
            paid_at: Some(None),
        },
        ClaimAction::Reject => ClaimFieldUpdate {
            approved_amount: Some(None),
            decision_comment: Some(payload.decision.decision_comment.clone()),
            decided_at: Some(Some(now)),
            paid_at: Some(None),
        },
        ClaimAction::Close => ClaimFieldUpdate {
            paid_at: Some(resolve_close(payload.close_paid, payload.close_paid_at, now)),
            ..ClaimFieldUpdate::default()
        },
        _ => ClaimFieldUpdate::default(),
    }
}

/// Applies an action to a claim.
///
/// Approve and reject validate their decision payload before anything is
/// written; the decision fields land in the same conditional write as the
/// status, so a lost race applies neither.
///
/// # Errors
///
/// Returns an error if:
/// - The claim does not exist
/// - The decision payload fails validation
/// - The action is not legal from the current status
/// - Another actor changed the status first (`Conflict`)
pub fn apply_claim_action<S: CaseStore>(
    store: &S,
    claim_id: i64,
    action: ClaimAction,
    payload: &ClaimActionPayload,
    acting_user_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<ClaimStatus, CoreError> {
    let current: ClaimStatus = store.claim_status(claim_id).ok_or(CoreError::NotFound {
        entity: "claim",
        id: claim_id,
    })?;
    validate_claim_decision(action, &payload.decision)?;
    let next: ClaimStatus = next_claim_status(current, action)?;

    let affected: usize = store.update_claim_status(
        claim_id,
        &[current],
        next,
        claim_field_update(action, payload, now),
        now,
    );
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "claim",
            id: claim_id,
        });
    }

    store.append_claim_history(
        claim_id,
        history_entry(
            current.as_str(),
            next.as_str(),
            payload.decision.decision_comment.as_deref(),
            now,
            acting_user_id,
        ),
    );

    Ok(next)
}

/// Deletes a draft application together with its unactivated policy.
///
/// Deletion is guarded by two entities at once: the application must not
/// have reached a terminal status, and the linked policy must not have
/// started activation.
///
/// # Errors
///
/// Returns an error if:
/// - The application does not exist
/// - Either guard fails, or another actor deleted or advanced the
///   application first (`Conflict`)
pub fn delete_draft_application<S: CaseStore>(
    store: &S,
    application_id: i64,
) -> Result<(), CoreError> {
    let application_status: ApplicationStatus =
        store
            .application_status(application_id)
            .ok_or(CoreError::NotFound {
                entity: "policy application",
                id: application_id,
            })?;
    let policy_id: Option<i64> =
        store
            .application_policy_id(application_id)
            .ok_or(CoreError::NotFound {
                entity: "policy application",
                id: application_id,
            })?;
    let policy_status: Option<PolicyStatus> = policy_id.and_then(|id| store.policy_status(id));

    if !can_delete_draft(application_status, policy_status) {
        return Err(CoreError::Conflict {
            entity: "policy application",
            id: application_id,
        });
    }

    let affected: usize = store.delete_application(application_id);
    if affected == 0 {
        return Err(CoreError::Conflict {
            entity: "policy application",
            id: application_id,
        });
    }

    Ok(())
}

/// Verifies that a claim still accepts writes.
///
/// Guards the attachment-upload and client-note paths: closed and
/// rejected claims reject all further writes.
///
/// # Errors
///
/// Returns an error if the claim does not exist or no longer accepts
/// updates.
pub fn ensure_claim_operable<S: CaseStore>(store: &S, claim_id: i64) -> Result<(), CoreError> {
    let status: ClaimStatus = store.claim_status(claim_id).ok_or(CoreError::NotFound {
        entity: "claim",
        id: claim_id,
    })?;

    if can_operate(status) {
        Ok(())
    } else {
        Err(CoreError::DomainViolation(DomainError::ClaimNotOperable {
            status: status.as_str(),
        }))
    }
}
