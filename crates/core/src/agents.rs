// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin agent assignment.
//!
//! The "last assigned" pointer is never held in memory; it is derived
//! from durable state on every call so the rotation stays correct across
//! process restarts and multiple instances. The assignment write is
//! conditional ("assign where still unassigned"): of two concurrent
//! first-touches, exactly one write lands and the loser re-reads the
//! now-stable assignment.

use crate::error::CoreError;
use crate::store::AgentStore;

/// Picks the next agent in the cyclic rotation.
///
/// The roster must be ascending. Selection takes the first agent with an
/// id strictly greater than the last assigned one, wrapping to the
/// smallest id when the last assigned agent was the highest (or when
/// nothing was ever assigned). An empty roster yields `None`.
#[must_use]
pub fn next_agent_id(roster: &[i64], last_assigned: Option<i64>) -> Option<i64> {
    match last_assigned {
        Some(last) => roster
            .iter()
            .copied()
            .find(|id| *id > last)
            .or_else(|| roster.first().copied()),
        None => roster.first().copied(),
    }
}

/// Ensures a user has an assigned agent, assigning the next one in the
/// rotation if necessary.
///
/// Idempotent: a user that already has an agent keeps it, with no write.
/// Returns `None` when no agents exist at all — the caller treats this as
/// "cannot onboard now", not as a failure.
///
/// # Errors
///
/// Returns `CoreError::NotFound` if the user does not exist.
pub fn ensure_agent_assigned<S: AgentStore>(
    store: &S,
    user_id: i64,
) -> Result<Option<i64>, CoreError> {
    let current: Option<i64> = store.assigned_agent(user_id).ok_or(CoreError::NotFound {
        entity: "user",
        id: user_id,
    })?;
    if current.is_some() {
        return Ok(current);
    }

    let roster: Vec<i64> = store.agent_ids();
    let Some(candidate) = next_agent_id(&roster, store.last_assigned_agent_id()) else {
        return Ok(None);
    };

    // Zero rows affected means a concurrent caller assigned first; the
    // re-read below returns whichever assignment actually landed.
    store.assign_agent_if_unassigned(user_id, candidate);

    store.assigned_agent(user_id).ok_or(CoreError::NotFound {
        entity: "user",
        id: user_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_agent_after_last_assigned() {
        assert_eq!(next_agent_id(&[1, 2, 5, 9], Some(5)), Some(9));
        assert_eq!(next_agent_id(&[1, 2, 5, 9], Some(2)), Some(5));
    }

    #[test]
    fn test_next_agent_wraps_at_roster_end() {
        assert_eq!(next_agent_id(&[1, 2, 5, 9], Some(9)), Some(1));
    }

    #[test]
    fn test_next_agent_with_no_history_takes_smallest() {
        assert_eq!(next_agent_id(&[3, 7, 11], None), Some(3));
    }

    #[test]
    fn test_next_agent_last_assigned_no_longer_on_roster() {
        // The previously assigned agent was removed; rotation continues
        // from the next higher id.
        assert_eq!(next_agent_id(&[1, 2, 9], Some(5)), Some(9));
    }

    #[test]
    fn test_next_agent_empty_roster() {
        assert_eq!(next_agent_id(&[], Some(5)), None);
        assert_eq!(next_agent_id(&[], None), None);
    }
}
