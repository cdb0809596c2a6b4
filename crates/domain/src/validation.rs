// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Create-payload validation for applications, claims, and attachments.
//!
//! Unlike the state machines, which fail on the first rule violation,
//! these validators collect every issue so a client can fix a whole form
//! in one round trip.

use crate::claim::{ClaimStatus, can_operate};
use crate::types::AccidentType;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Maximum accepted attachment size in bytes (20 MiB).
pub const MAX_ATTACHMENT_BYTES: i64 = 20 * 1024 * 1024;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The offending field.
    pub field: &'static str,
    /// What is wrong with it.
    pub message: &'static str,
}

impl ValidationIssue {
    const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// The payload submitted when drafting a policy application from a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCreateData {
    /// The calculation the application is drafted from.
    pub calc_request_id: Option<i64>,
    /// Vehicle brand.
    pub vehicle_brand: Option<String>,
    /// VIN or registration number; at least one must be present.
    pub vin_or_reg: Option<String>,
    /// Full name of the insured person.
    pub insured_person_name: Option<String>,
    /// Requested coverage start date.
    pub start_date: Option<Date>,
    /// The client confirmed the data is accurate.
    pub consent_accuracy: bool,
    /// The client consented to personal data processing.
    pub consent_personal_data: bool,
}

/// Validates an application create payload, collecting every issue.
#[must_use]
pub fn validate_application_create(
    data: &ApplicationCreateData,
    today: Date,
) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if !data.calc_request_id.is_some_and(|id| id > 0) {
        issues.push(ValidationIssue::new("calcRequestId", "is required"));
    }
    if is_blank(data.vehicle_brand.as_deref()) {
        issues.push(ValidationIssue::new("vehicleBrand", "is required"));
    }
    if is_blank(data.vin_or_reg.as_deref()) {
        issues.push(ValidationIssue::new("vinOrReg", "is required"));
    }
    if is_blank(data.insured_person_name.as_deref()) {
        issues.push(ValidationIssue::new("insuredPersonName", "is required"));
    }
    match data.start_date {
        None => issues.push(ValidationIssue::new("startDate", "is required")),
        Some(start) if start < today => {
            issues.push(ValidationIssue::new("startDate", "cannot be in the past"));
        }
        Some(_) => {}
    }
    if !data.consent_accuracy {
        issues.push(ValidationIssue::new("consentAccuracy", "must be accepted"));
    }
    if !data.consent_personal_data {
        issues.push(ValidationIssue::new(
            "consentPersonalData",
            "must be accepted",
        ));
    }

    issues
}

/// The payload submitted when filing a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimCreateData {
    /// The policy the claim is filed under.
    pub policy_id: Option<i64>,
    /// Free-text description of the event.
    pub description: Option<String>,
    /// Classification of the event.
    pub accident_type: Option<AccidentType>,
    /// When the event happened.
    pub accident_at: Option<OffsetDateTime>,
    /// Where the event happened.
    pub accident_place: Option<String>,
    /// Contact phone number.
    pub contact_phone: Option<String>,
    /// Optional contact email.
    pub contact_email: Option<String>,
    /// The client confirmed the data is accurate.
    pub consent_accuracy: bool,
    /// The client consented to personal data processing.
    pub consent_personal_data: bool,
}

/// Validates a claim create payload, collecting every issue.
#[must_use]
pub fn validate_claim_create(data: &ClaimCreateData) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    let description_ok: bool = data
        .description
        .as_deref()
        .is_some_and(|d| d.trim().len() >= 10);
    if !description_ok {
        issues.push(ValidationIssue::new("description", "is too short"));
    }
    if data.accident_type.is_none() {
        issues.push(ValidationIssue::new("accidentType", "is required"));
    }
    if data.accident_at.is_none() {
        issues.push(ValidationIssue::new("accidentAt", "is required"));
    }
    if is_blank(data.accident_place.as_deref()) {
        issues.push(ValidationIssue::new("accidentPlace", "is required"));
    }
    let phone_ok: bool = data
        .contact_phone
        .as_deref()
        .is_some_and(|p| digit_count(p) >= 10);
    if !phone_ok {
        issues.push(ValidationIssue::new("contactPhone", "is invalid"));
    }
    if !data.consent_accuracy {
        issues.push(ValidationIssue::new("consentAccuracy", "must be accepted"));
    }
    if !data.consent_personal_data {
        issues.push(ValidationIssue::new(
            "consentPersonalData",
            "must be accepted",
        ));
    }

    issues
}

/// Validates an attachment upload against the owning claim's status.
///
/// Closed and rejected claims accept no further uploads.
#[must_use]
pub fn validate_attachment(
    status: ClaimStatus,
    file_name: &str,
    size_bytes: i64,
) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> = Vec::new();

    if !can_operate(status) {
        issues.push(ValidationIssue::new(
            "claim",
            "attachments are not allowed for closed or rejected claims",
        ));
    }
    if file_name.trim().is_empty() {
        issues.push(ValidationIssue::new("fileName", "is required"));
    }
    if size_bytes <= 0 {
        issues.push(ValidationIssue::new("file", "is empty"));
    } else if size_bytes > MAX_ATTACHMENT_BYTES {
        issues.push(ValidationIssue::new("file", "is too large"));
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    const TODAY: Date = date!(2026 - 06 - 15);

    fn valid_application() -> ApplicationCreateData {
        ApplicationCreateData {
            calc_request_id: Some(42),
            vehicle_brand: Some(String::from("Lada")),
            vin_or_reg: Some(String::from("XTA210990Y1234567")),
            insured_person_name: Some(String::from("Ivan Petrov")),
            start_date: Some(date!(2026 - 07 - 01)),
            consent_accuracy: true,
            consent_personal_data: true,
        }
    }

    fn valid_claim() -> ClaimCreateData {
        ClaimCreateData {
            policy_id: Some(7),
            description: Some(String::from("Rear-ended at a traffic light")),
            accident_type: Some(AccidentType::Collision),
            accident_at: Some(datetime!(2026-06-10 08:30 UTC)),
            accident_place: Some(String::from("Moscow, Tverskaya 1")),
            contact_phone: Some(String::from("+7 (916) 123-45-67")),
            contact_email: None,
            consent_accuracy: true,
            consent_personal_data: true,
        }
    }

    #[test]
    fn test_valid_application_has_no_issues() {
        assert!(validate_application_create(&valid_application(), TODAY).is_empty());
    }

    #[test]
    fn test_application_collects_all_issues() {
        let data: ApplicationCreateData = ApplicationCreateData {
            calc_request_id: None,
            vehicle_brand: Some(String::from("  ")),
            vin_or_reg: None,
            insured_person_name: None,
            start_date: None,
            consent_accuracy: false,
            consent_personal_data: false,
        };

        let issues: Vec<ValidationIssue> = validate_application_create(&data, TODAY);
        assert_eq!(issues.len(), 7);
    }

    #[test]
    fn test_application_start_date_in_past() {
        let data: ApplicationCreateData = ApplicationCreateData {
            start_date: Some(date!(2026 - 06 - 14)),
            ..valid_application()
        };

        let issues: Vec<ValidationIssue> = validate_application_create(&data, TODAY);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "startDate");
    }

    #[test]
    fn test_valid_claim_has_no_issues() {
        assert!(validate_claim_create(&valid_claim()).is_empty());
    }

    #[test]
    fn test_claim_short_description() {
        let data: ClaimCreateData = ClaimCreateData {
            description: Some(String::from("too short")),
            ..valid_claim()
        };

        let issues: Vec<ValidationIssue> = validate_claim_create(&data);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "description");
    }

    #[test]
    fn test_claim_phone_needs_ten_digits() {
        let data: ClaimCreateData = ClaimCreateData {
            contact_phone: Some(String::from("123-45-67")),
            ..valid_claim()
        };

        let issues: Vec<ValidationIssue> = validate_claim_create(&data);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "contactPhone");
    }

    #[test]
    fn test_attachment_accepted_for_active_claim() {
        assert!(validate_attachment(ClaimStatus::InReview, "photo.jpg", 1024).is_empty());
    }

    #[test]
    fn test_attachment_rejected_for_settled_claims() {
        for status in [ClaimStatus::Closed, ClaimStatus::Rejected] {
            let issues: Vec<ValidationIssue> = validate_attachment(status, "photo.jpg", 1024);
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].field, "claim");
        }
    }

    #[test]
    fn test_attachment_size_limits() {
        assert_eq!(
            validate_attachment(ClaimStatus::New, "a.pdf", 0)[0].message,
            "is empty"
        );
        assert_eq!(
            validate_attachment(ClaimStatus::New, "a.pdf", MAX_ATTACHMENT_BYTES + 1)[0].message,
            "is too large"
        );
        assert!(validate_attachment(ClaimStatus::New, "a.pdf", MAX_ATTACHMENT_BYTES).is_empty());
    }
}
