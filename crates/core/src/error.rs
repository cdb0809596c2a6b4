// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use osago_domain::DomainError;

/// Errors that can occur while orchestrating domain rules against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A referenced entity does not exist.
    NotFound {
        /// The entity kind.
        entity: &'static str,
        /// The missing identifier.
        id: i64,
    },
    /// A conditional write affected zero rows: another actor changed the
    /// entity first. The caller must refresh and retry; the engine never
    /// retries silently.
    Conflict {
        /// The entity kind.
        entity: &'static str,
        /// The contended identifier.
        id: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
            Self::Conflict { entity, id } => {
                write!(f, "{entity} {id} was modified concurrently")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
