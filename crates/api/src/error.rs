// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! The four variants are the whole public taxonomy: fixable input,
//! missing data, illegal transition, and lost race. Translation never
//! collapses a conflict into anything retryable-looking; "refresh and
//! retry" is the caller's decision.

use osago_core::CoreError;
use osago_domain::DomainError;
use thiserror::Error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request is malformed or incomplete; the caller can fix it.
    #[error("Validation failed: {message}")]
    Validation {
        /// A human-readable description of the problem.
        message: String,
    },
    /// A referenced entity or coefficient row does not exist.
    #[error("Not found: {message}")]
    NotFound {
        /// A human-readable description of what is missing.
        message: String,
    },
    /// The requested action is not legal from the current status.
    #[error("Invalid transition: {message}")]
    InvalidTransition {
        /// A human-readable description of the rejected transition.
        message: String,
    },
    /// Another actor changed the entity first. Refresh and retry.
    #[error("Conflict: {message}")]
    Conflict {
        /// A human-readable description of the contention.
        message: String,
    },
}

/// Translates a domain error into the API taxonomy.
#[must_use]
pub fn translate_domain_error(err: &DomainError) -> ApiError {
    match err {
        DomainError::NoActiveTariff
        | DomainError::BaseRateNotFound { .. }
        | DomainError::RegionCoefficientNotFound { .. }
        | DomainError::PowerCoefficientNotFound { .. }
        | DomainError::TermCoefficientNotFound { .. }
        | DomainError::DriverModeCoefficientNotFound
        | DomainError::KvsCoefficientNotFound { .. }
        | DomainError::KbmClassNotFound { .. } => ApiError::NotFound {
            message: err.to_string(),
        },
        DomainError::InvalidTransition { .. }
        | DomainError::ClaimNotOperable { .. }
        | DomainError::PaymentNotStartable { .. }
        | DomainError::PaymentNotConfirmable { .. }
        | DomainError::PaymentNotFailable { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        _ => ApiError::Validation {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into the API taxonomy.
#[must_use]
pub fn translate_core_error(err: &CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NotFound { .. } => ApiError::NotFound {
            message: err.to_string(),
        },
        CoreError::Conflict { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(&err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(&err)
    }
}
