// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The legal bonus-malus class codes in ascending-discount order.
///
/// "M" is the penalty class; "13" carries the largest discount.
pub const KBM_CLASS_CODES: [&str; 15] = [
    "M", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13",
];

/// A bonus-malus (KBM) class code.
///
/// Codes are normalized to uppercase. A blank or missing code defaults to
/// class "3", the statutory class for drivers without claims history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KbmClass {
    value: String,
}

impl KbmClass {
    /// Normalizes and validates a class code.
    ///
    /// `None` or a blank string yields the default class "3".
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidKbmClass` if the trimmed, uppercased
    /// value is not one of the legal codes.
    pub fn parse(value: Option<&str>) -> Result<Self, DomainError> {
        let normalized: String = match value {
            None => String::from("3"),
            Some(raw) if raw.trim().is_empty() => String::from("3"),
            Some(raw) => raw.trim().to_uppercase(),
        };

        if KBM_CLASS_CODES.contains(&normalized.as_str()) {
            Ok(Self { value: normalized })
        } else {
            Err(DomainError::InvalidKbmClass(normalized))
        }
    }

    /// Returns the normalized class code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl Default for KbmClass {
    fn default() -> Self {
        Self {
            value: String::from("3"),
        }
    }
}

impl std::fmt::Display for KbmClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Whether the policy covers a fixed driver list or any driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverMode {
    /// A fixed list of named drivers. Age/experience pricing applies.
    Limited,
    /// Any driver may operate the vehicle.
    Unlimited,
}

impl DriverMode {
    /// Returns the string representation of the mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Limited => "limited",
            Self::Unlimited => "unlimited",
        }
    }
}

impl FromStr for DriverMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "limited" => Ok(Self::Limited),
            "unlimited" => Ok(Self::Unlimited),
            _ => Err(DomainError::InvalidStatus {
                entity: "driver mode",
                status: s.to_string(),
            }),
        }
    }
}

/// Lifecycle status of an issued policy.
///
/// The policy has its own lifecycle separate from the application that
/// produced it; payment operations move both in lockstep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicyStatus {
    /// Issued but not yet paid for.
    Draft,
    /// A payment has been started and awaits confirmation.
    PendingPay,
    /// Paid and in force.
    Active,
    /// Cancelled before or after activation.
    Cancelled,
}

impl PolicyStatus {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::PendingPay => "PENDING_PAY",
            Self::Active => "ACTIVE",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for PolicyStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PENDING_PAY" => Ok(Self::PendingPay),
            "ACTIVE" => Ok(Self::Active),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus {
                entity: "policy",
                status: s.to_string(),
            }),
        }
    }
}

/// Classification of the insured event reported in a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccidentType {
    /// Road traffic collision.
    Collision,
    /// Vehicle theft.
    Theft,
    /// Fire damage.
    Fire,
    /// Storm, flood, hail and similar events.
    NaturalDisaster,
    /// Deliberate third-party damage.
    Vandalism,
    /// Anything not covered by the named categories.
    Other,
}

impl AccidentType {
    /// Returns the string representation used for persistence.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Collision => "COLLISION",
            Self::Theft => "THEFT",
            Self::Fire => "FIRE",
            Self::NaturalDisaster => "NATURAL_DISASTER",
            Self::Vandalism => "VANDALISM",
            Self::Other => "OTHER",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kbm_class_defaults_to_three() {
        assert_eq!(KbmClass::parse(None).unwrap().as_str(), "3");
        assert_eq!(KbmClass::parse(Some("")).unwrap().as_str(), "3");
        assert_eq!(KbmClass::parse(Some("   ")).unwrap().as_str(), "3");
    }

    #[test]
    fn test_kbm_class_normalizes_to_uppercase() {
        assert_eq!(KbmClass::parse(Some("m")).unwrap().as_str(), "M");
        assert_eq!(KbmClass::parse(Some(" 13 ")).unwrap().as_str(), "13");
    }

    #[test]
    fn test_kbm_class_rejects_unknown_codes() {
        assert!(KbmClass::parse(Some("14")).is_err());
        assert!(KbmClass::parse(Some("X")).is_err());
        assert!(KbmClass::parse(Some("-1")).is_err());
    }

    #[test]
    fn test_driver_mode_round_trip() {
        for mode in [DriverMode::Limited, DriverMode::Unlimited] {
            assert_eq!(mode.as_str().parse::<DriverMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_policy_status_round_trip() {
        for status in [
            PolicyStatus::Draft,
            PolicyStatus::PendingPay,
            PolicyStatus::Active,
            PolicyStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<PolicyStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_policy_status_serde_uses_screaming_case() {
        let json: String = serde_json::to_string(&PolicyStatus::PendingPay).unwrap();
        assert_eq!(json, "\"PENDING_PAY\"");
    }
}
