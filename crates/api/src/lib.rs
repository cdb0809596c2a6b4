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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    handle_application_action, handle_claim_action, handle_confirm_payment, handle_delete_draft,
    handle_ensure_agent, handle_fail_payment, handle_quote, handle_start_payment,
};
pub use request_response::{
    ApplicationActionRequest, ApplicationActionResponse, AssignAgentResponse, CardPaymentRequest,
    ClaimActionRequest, ClaimActionResponse, DeleteDraftResponse, HistoryEntryInfo,
    PaymentConfirmResponse, PaymentFailResponse, PaymentStartResponse, QuoteRequest, QuoteResponse,
};
