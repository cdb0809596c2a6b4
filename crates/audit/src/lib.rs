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
    clippy::all
)]

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// An immutable record of one status transition.
///
/// Every successful case transition must produce exactly one history
/// entry. Entries are immutable once created and capture:
/// - The status before the transition (absent for creation)
/// - The status after the transition
/// - An optional free-text comment (decision rationale)
/// - When the transition happened
/// - Who initiated it (absent for system-driven transitions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The status before the transition.
    old_status: Option<String>,
    /// The status after the transition.
    new_status: String,
    /// Optional comment attached to the transition.
    comment: Option<String>,
    /// When the transition happened.
    created_at: OffsetDateTime,
    /// The acting user, if the transition was user-initiated.
    changed_by_user_id: Option<i64>,
}

impl HistoryEntry {
    /// Creates a new `HistoryEntry`.
    ///
    /// Once created, a history entry is immutable.
    #[must_use]
    pub const fn new(
        old_status: Option<String>,
        new_status: String,
        comment: Option<String>,
        created_at: OffsetDateTime,
        changed_by_user_id: Option<i64>,
    ) -> Self {
        Self {
            old_status,
            new_status,
            comment,
            created_at,
            changed_by_user_id,
        }
    }

    /// The status before the transition.
    #[must_use]
    pub fn old_status(&self) -> Option<&str> {
        self.old_status.as_deref()
    }

    /// The status after the transition.
    #[must_use]
    pub fn new_status(&self) -> &str {
        &self.new_status
    }

    /// The comment attached to the transition, if any.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// When the transition happened.
    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// The acting user, if the transition was user-initiated.
    #[must_use]
    pub const fn changed_by_user_id(&self) -> Option<i64> {
        self.changed_by_user_id
    }
}

/// An append-only log of history entries for one case.
///
/// The log exposes no mutation beyond `push`: entries are never edited or
/// removed once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry to the log.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// The recorded entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// The number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry(old: Option<&str>, new: &str) -> HistoryEntry {
        HistoryEntry::new(
            old.map(String::from),
            String::from(new),
            Some(String::from("test comment")),
            datetime!(2026-06-15 12:00 UTC),
            Some(7),
        )
    }

    #[test]
    fn test_entry_creation_captures_all_fields() {
        let e: HistoryEntry = entry(Some("NEW"), "IN_REVIEW");

        assert_eq!(e.old_status(), Some("NEW"));
        assert_eq!(e.new_status(), "IN_REVIEW");
        assert_eq!(e.comment(), Some("test comment"));
        assert_eq!(e.created_at(), datetime!(2026-06-15 12:00 UTC));
        assert_eq!(e.changed_by_user_id(), Some(7));
    }

    #[test]
    fn test_creation_entry_has_no_old_status() {
        let e: HistoryEntry = entry(None, "NEW");
        assert_eq!(e.old_status(), None);
    }

    #[test]
    fn test_log_appends_in_order() {
        let mut log: HistoryLog = HistoryLog::new();
        assert!(log.is_empty());

        log.push(entry(None, "NEW"));
        log.push(entry(Some("NEW"), "IN_REVIEW"));
        log.push(entry(Some("IN_REVIEW"), "APPROVED"));

        assert_eq!(log.len(), 3);
        assert_eq!(log.entries()[0].new_status(), "NEW");
        assert_eq!(log.entries()[2].new_status(), "APPROVED");
    }

    #[test]
    fn test_entry_equality() {
        assert_eq!(entry(Some("NEW"), "IN_REVIEW"), entry(Some("NEW"), "IN_REVIEW"));
        assert_ne!(entry(Some("NEW"), "IN_REVIEW"), entry(None, "IN_REVIEW"));
    }
}
