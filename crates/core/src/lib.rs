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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod agents;
mod cases;
mod error;
mod memory;
mod payment;
mod pricing;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use agents::{ensure_agent_assigned, next_agent_id};
pub use cases::{
    ClaimActionPayload, apply_application_action, apply_claim_action, delete_draft_application,
    ensure_claim_operable,
};
pub use error::CoreError;
pub use memory::{
    ApplicationRow, ClaimRow, MemoryStore, Notification, PaymentRow, PolicyRow,
};
pub use payment::{
    ConfirmedPayment, FailedPayment, StartedPayment, confirm_payment_success, fail_payment,
    start_payment_for_application,
};
pub use pricing::{PricingResult, resolve_premium};
pub use store::{
    AgentStore, CalculationStore, CaseStore, ClaimFieldUpdate, NewCalculationRecord, TariffStore,
};
