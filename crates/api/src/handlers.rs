// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Handlers parse DTO fields into domain types, call the engine, and map
//! results and errors back onto the API contract. They carry no transport
//! concerns; a server layer routes requests to them.

use osago_core::{
    AgentStore, CalculationStore, CaseStore, ClaimActionPayload, ConfirmedPayment, FailedPayment,
    PricingResult, StartedPayment, TariffStore, apply_application_action, apply_claim_action,
    confirm_payment_success, delete_draft_application, ensure_agent_assigned, fail_payment,
    resolve_premium, start_payment_for_application,
};
use osago_domain::{
    ApplicationAction, CardDetails, ClaimAction, ClaimDecision, DriverMode, QuoteInput,
};
use time::{Date, OffsetDateTime};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::request_response::{
    ApplicationActionRequest, ApplicationActionResponse, AssignAgentResponse, CardPaymentRequest,
    ClaimActionRequest, ClaimActionResponse, DeleteDraftResponse, PaymentConfirmResponse,
    PaymentFailResponse, PaymentStartResponse, QuoteRequest, QuoteResponse,
};

/// Prices a quote and persists the calculation record.
///
/// # Errors
///
/// Returns an error if the input fails validation or no tariff satisfies
/// the requested dimensions.
pub fn handle_quote<S>(
    store: &S,
    request: &QuoteRequest,
    user_id: Option<i64>,
    today: Date,
    now: OffsetDateTime,
) -> Result<QuoteResponse, ApiError>
where
    S: TariffStore + CalculationStore,
{
    let driver_mode: DriverMode =
        request
            .driver_mode
            .parse()
            .map_err(|_| ApiError::Validation {
                message: format!("driver_mode '{}' is not recognized", request.driver_mode),
            })?;

    let input: QuoteInput = QuoteInput {
        vehicle_category_id: request.vehicle_category_id,
        region_id: request.region_id,
        power_hp: request.power_hp,
        term_months: request.term_months,
        driver_mode,
        driver_birth_date: request.driver_birth_date,
        license_issue_date: request.license_issue_date,
        kbm_class_code: request.kbm_class_code.clone(),
    };

    let result: PricingResult =
        resolve_premium(store, &input, user_id, today, now).map_err(|err| {
            warn!(?err, "quote rejected");
            ApiError::from(err)
        })?;

    info!(
        calculation_id = result.calculation_id,
        tariff_version_id = result.factors.tariff_version_id,
        amount = %result.amount,
        "quote priced"
    );

    Ok(QuoteResponse {
        calculation_id: result.calculation_id,
        tariff_version_id: result.factors.tariff_version_id,
        base_rate: result.factors.base_rate,
        region_coefficient: result.factors.region,
        power_coefficient: result.factors.power,
        driver_mode_coefficient: result.factors.driver_mode,
        term_coefficient: result.factors.term,
        kvs_coefficient: result.factors.age_experience,
        kbm_class_code: result.factors.kbm_class.as_str().to_string(),
        kbm_coefficient: result.factors.kbm,
        driver_age_years: result.driver_profile.map(|p| p.age_years),
        driver_experience_years: result.driver_profile.map(|p| p.experience_years),
        amount: result.amount,
    })
}

/// Applies an action to a policy application.
///
/// # Errors
///
/// Returns an error if the action is unknown, not legal from the current
/// status, or lost a concurrent race.
pub fn handle_application_action<S: CaseStore>(
    store: &S,
    application_id: i64,
    request: &ApplicationActionRequest,
    acting_user_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<ApplicationActionResponse, ApiError> {
    let action: ApplicationAction = request.action.parse().map_err(|_| ApiError::Validation {
        message: format!("action '{}' is not recognized", request.action),
    })?;

    let status = apply_application_action(
        store,
        application_id,
        action,
        request.comment.as_deref(),
        acting_user_id,
        now,
    )
    .map_err(|err| {
        warn!(application_id, action = %request.action, ?err, "application action rejected");
        ApiError::from(err)
    })?;

    info!(application_id, status = status.as_str(), "application transitioned");

    Ok(ApplicationActionResponse {
        application_id,
        status: status.as_str().to_string(),
    })
}

/// Deletes a draft application and its unactivated policy.
///
/// # Errors
///
/// Returns an error if the application cannot be found or is no longer
/// deletable.
pub fn handle_delete_draft<S: CaseStore>(
    store: &S,
    application_id: i64,
) -> Result<DeleteDraftResponse, ApiError> {
    delete_draft_application(store, application_id).map_err(|err| {
        warn!(application_id, ?err, "draft deletion rejected");
        ApiError::from(err)
    })?;

    info!(application_id, "draft application deleted");

    Ok(DeleteDraftResponse {
        application_id,
        status: String::from("DELETED"),
    })
}

/// Applies an action to a claim.
///
/// # Errors
///
/// Returns an error if the action is unknown, the decision payload is
/// invalid, the transition is illegal, or a concurrent decision won.
pub fn handle_claim_action<S: CaseStore>(
    store: &S,
    claim_id: i64,
    request: &ClaimActionRequest,
    acting_user_id: Option<i64>,
    now: OffsetDateTime,
) -> Result<ClaimActionResponse, ApiError> {
    let action: ClaimAction = request.action.parse().map_err(|_| ApiError::Validation {
        message: format!("action '{}' is not recognized", request.action),
    })?;

    let payload: ClaimActionPayload = ClaimActionPayload {
        decision: ClaimDecision {
            approved_amount: request.approved_amount,
            decision_comment: request.decision_comment.clone(),
        },
        close_paid: request.paid.unwrap_or(false),
        close_paid_at: request.paid_at,
    };

    let status =
        apply_claim_action(store, claim_id, action, &payload, acting_user_id, now).map_err(
            |err| {
                warn!(claim_id, action = %request.action, ?err, "claim action rejected");
                ApiError::from(err)
            },
        )?;

    info!(claim_id, status = status.as_str(), "claim transitioned");

    Ok(ClaimActionResponse {
        claim_id,
        status: status.as_str().to_string(),
    })
}

/// Starts a card payment for an approved application.
///
/// # Errors
///
/// Returns an error if the card or provider is invalid, the application
/// is not approved, or a concurrent actor intervened.
pub fn handle_start_payment<S: CaseStore>(
    store: &S,
    application_id: i64,
    request: &CardPaymentRequest,
    now: OffsetDateTime,
) -> Result<PaymentStartResponse, ApiError> {
    let card: CardDetails = CardDetails {
        card_number: request.card_number.clone(),
        exp_month: request.exp_month,
        exp_year: request.exp_year,
        cvv: request.cvv.clone(),
    };

    let started: StartedPayment =
        start_payment_for_application(store, application_id, &card, &request.provider, now)
            .map_err(|err| {
                warn!(application_id, ?err, "payment start rejected");
                ApiError::from(err)
            })?;

    info!(
        application_id,
        payment_id = started.payment_id,
        "payment started"
    );

    Ok(PaymentStartResponse {
        payment_id: started.payment_id,
        payment_status: started.payment_status.as_str().to_string(),
        application_status: started.application_status.as_str().to_string(),
        policy_status: started.policy_status.as_str().to_string(),
    })
}

/// Confirms the latest payment of an application as successful.
///
/// # Errors
///
/// Returns an error if no payment exists, the statuses do not permit
/// confirmation, or a concurrent actor intervened.
pub fn handle_confirm_payment<S: CaseStore>(
    store: &S,
    application_id: i64,
    now: OffsetDateTime,
) -> Result<PaymentConfirmResponse, ApiError> {
    let confirmed: ConfirmedPayment =
        confirm_payment_success(store, application_id, now).map_err(|err| {
            warn!(application_id, ?err, "payment confirmation rejected");
            ApiError::from(err)
        })?;

    info!(
        application_id,
        payment_id = confirmed.payment_id,
        "payment confirmed"
    );

    Ok(PaymentConfirmResponse {
        payment_id: confirmed.payment_id,
        payment_status: confirmed.payment_status.as_str().to_string(),
        application_status: confirmed.application_status.as_str().to_string(),
        policy_status: confirmed.policy_status.as_str().to_string(),
        paid_at: confirmed.paid_at,
    })
}

/// Marks the latest payment of an application as failed.
///
/// # Errors
///
/// Returns an error if no payment exists or it has already settled.
pub fn handle_fail_payment<S: CaseStore>(
    store: &S,
    application_id: i64,
    now: OffsetDateTime,
) -> Result<PaymentFailResponse, ApiError> {
    let failed: FailedPayment = fail_payment(store, application_id, now).map_err(|err| {
        warn!(application_id, ?err, "payment failure rejected");
        ApiError::from(err)
    })?;

    info!(
        application_id,
        payment_id = failed.payment_id,
        "payment failed"
    );

    Ok(PaymentFailResponse {
        payment_id: failed.payment_id,
        payment_status: failed.payment_status.as_str().to_string(),
        application_status: failed.application_status.as_str().to_string(),
        policy_status: failed.policy_status.as_str().to_string(),
    })
}

/// Ensures a user has an assigned agent.
///
/// # Errors
///
/// Returns an error if the user does not exist.
pub fn handle_ensure_agent<S: AgentStore>(
    store: &S,
    user_id: i64,
) -> Result<AssignAgentResponse, ApiError> {
    let agent_id: Option<i64> = ensure_agent_assigned(store, user_id).map_err(|err| {
        warn!(user_id, ?err, "agent assignment failed");
        ApiError::from(err)
    })?;

    match agent_id {
        Some(agent) => info!(user_id, agent, "agent assignment ensured"),
        None => warn!(user_id, "no agents available for assignment"),
    }

    Ok(AssignAgentResponse { user_id, agent_id })
}
