// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator traits through which the engine reaches durable state.
//!
//! The engine owns no storage. Every status change goes through a
//! conditional writer — "set the new status where the current status is
//! still one of the expected set" — returning the affected-row count, so
//! concurrent actors resolve through compare-and-set instead of locks.
//! All methods take `&self`: a store is a shared handle and synchronizes
//! internally, like a database connection.

use osago_audit::HistoryEntry;
use osago_domain::{
    ApplicationStatus, BaseRateRow, ClaimStatus, DriverMode, DriverModeCoefficientRow, KbmClass,
    KbmCoefficientRow, KvsCoefficientRow, PaymentStatus, PolicyStatus, PowerCoefficientRow,
    PremiumFactors, RegionCoefficientRow, TariffVersion, TermCoefficientRow,
};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// Read access to versioned tariff data.
pub trait TariffStore {
    /// All versions in force on `today`, ordered by `valid_from`
    /// descending, ties broken by highest id.
    fn active_versions(&self, today: Date) -> Vec<TariffVersion>;

    /// Base rate rows of a version.
    fn base_rates(&self, tariff_version_id: i64) -> Vec<BaseRateRow>;

    /// Region coefficient rows of a version.
    fn region_coefficients(&self, tariff_version_id: i64) -> Vec<RegionCoefficientRow>;

    /// Power band rows of a version.
    fn power_coefficients(&self, tariff_version_id: i64) -> Vec<PowerCoefficientRow>;

    /// Term coefficient rows of a version.
    fn term_coefficients(&self, tariff_version_id: i64) -> Vec<TermCoefficientRow>;

    /// The driver-mode coefficient pair of a version, if present.
    fn driver_mode_coefficients(&self, tariff_version_id: i64) -> Option<DriverModeCoefficientRow>;

    /// Age/experience band rows of a version.
    fn kvs_coefficients(&self, tariff_version_id: i64) -> Vec<KvsCoefficientRow>;

    /// Bonus-malus rows of a version.
    fn kbm_coefficients(&self, tariff_version_id: i64) -> Vec<KbmCoefficientRow>;

    /// Whether the dataset carries a bonus-malus table at all.
    ///
    /// When false the engine substitutes the statutory schedule instead
    /// of failing.
    fn kbm_table_present(&self) -> bool;
}

/// A premium calculation ready to be persisted.
///
/// Calculation records are immutable audit entities: created once per
/// quote, never mutated, referenced (not copied) when an application is
/// drafted from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalculationRecord {
    /// The quoting user, if authenticated.
    pub user_id: Option<i64>,
    /// Requested vehicle category.
    pub vehicle_category_id: i64,
    /// Requested region.
    pub region_id: i64,
    /// Requested engine power.
    pub power_hp: i32,
    /// Requested driver mode.
    pub driver_mode: DriverMode,
    /// Requested term in months.
    pub term_months: i32,
    /// Driver birth date, when supplied.
    pub driver_birth_date: Option<Date>,
    /// License issue date, when supplied.
    pub license_issue_date: Option<Date>,
    /// The normalized bonus-malus class.
    pub kbm_class: KbmClass,
    /// Every factor exactly as used, with the resolved version id.
    pub factors: PremiumFactors,
    /// The final rounded premium.
    pub amount: Decimal,
    /// When the calculation was made.
    pub created_at: OffsetDateTime,
}

/// Write access for calculation records.
pub trait CalculationStore {
    /// Persists a calculation record and returns its identifier.
    fn insert_calculation(&self, record: NewCalculationRecord) -> i64;
}

/// Field updates applied to a claim together with a status transition.
///
/// Outer `None` leaves the column untouched; `Some(inner)` sets it, with
/// `Some(None)` clearing it. Piggybacks on the conditional status write so
/// a lost race never applies decision fields either.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClaimFieldUpdate {
    /// The approved payout amount.
    pub approved_amount: Option<Option<Decimal>>,
    /// The decision rationale.
    pub decision_comment: Option<Option<String>>,
    /// When the decision was made.
    pub decided_at: Option<Option<OffsetDateTime>>,
    /// When the payout was made.
    pub paid_at: Option<Option<OffsetDateTime>>,
}

/// Read and conditional-write access to cases and their satellites.
pub trait CaseStore {
    /// Current status of an application, if it exists.
    fn application_status(&self, application_id: i64) -> Option<ApplicationStatus>;

    /// The policy linked to an application. Outer `None` means the
    /// application does not exist; inner `None` means no policy yet.
    fn application_policy_id(&self, application_id: i64) -> Option<Option<i64>>;

    /// The owner of an application, if it exists.
    fn application_user_id(&self, application_id: i64) -> Option<i64>;

    /// Current status of a policy, if it exists.
    fn policy_status(&self, policy_id: i64) -> Option<PolicyStatus>;

    /// The premium amount of a policy, if it exists.
    fn policy_premium(&self, policy_id: i64) -> Option<Decimal>;

    /// Current status of a claim, if it exists.
    fn claim_status(&self, claim_id: i64) -> Option<ClaimStatus>;

    /// Current status of a payment, if it exists.
    fn payment_status(&self, payment_id: i64) -> Option<PaymentStatus>;

    /// The most recently created payment for an application's policy.
    fn latest_payment_for_application(&self, application_id: i64) -> Option<i64>;

    /// Conditionally advances an application.
    ///
    /// Returns the number of rows affected: 1 if the current status was in
    /// `expected`, 0 otherwise.
    fn update_application_status(
        &self,
        application_id: i64,
        expected: &[ApplicationStatus],
        new_status: ApplicationStatus,
        updated_at: OffsetDateTime,
    ) -> usize;

    /// Conditionally advances a claim, applying `fields` with the status.
    fn update_claim_status(
        &self,
        claim_id: i64,
        expected: &[ClaimStatus],
        new_status: ClaimStatus,
        fields: ClaimFieldUpdate,
        updated_at: OffsetDateTime,
    ) -> usize;

    /// Conditionally advances a payment.
    fn update_payment_status(
        &self,
        payment_id: i64,
        expected: &[PaymentStatus],
        new_status: PaymentStatus,
    ) -> usize;

    /// Conditionally advances a policy.
    fn update_policy_status(
        &self,
        policy_id: i64,
        expected: &[PolicyStatus],
        new_status: PolicyStatus,
    ) -> usize;

    /// Creates a payment in status `NEW` and returns its identifier.
    fn create_payment(
        &self,
        policy_id: i64,
        amount: Decimal,
        provider: &str,
        created_at: OffsetDateTime,
    ) -> i64;

    /// Deletes an application and its draft policy.
    ///
    /// Returns the number of applications removed (0 or 1).
    fn delete_application(&self, application_id: i64) -> usize;

    /// Appends an entry to an application's history.
    fn append_application_history(&self, application_id: i64, entry: HistoryEntry);

    /// Appends an entry to a claim's history.
    fn append_claim_history(&self, claim_id: i64, entry: HistoryEntry);

    /// Records a client-facing notification signal. Delivery is the
    /// transport collaborator's concern.
    fn push_notification(&self, user_id: i64, title: &str, message: &str);
}

/// Read and conditional-write access to the agent roster and assignments.
pub trait AgentStore {
    /// All agent identifiers, ascending.
    fn agent_ids(&self) -> Vec<i64>;

    /// The agent most recently assigned across applications and claims,
    /// by creation time. Derived from durable state, never cached.
    fn last_assigned_agent_id(&self) -> Option<i64>;

    /// A user's assigned agent. Outer `None` means the user does not
    /// exist; inner `None` means no agent assigned yet.
    fn assigned_agent(&self, user_id: i64) -> Option<Option<i64>>;

    /// Conditionally assigns an agent: "set where still unassigned".
    ///
    /// Returns the number of rows affected: 1 if the user had no agent, 0
    /// if another actor assigned one first.
    fn assign_agent_if_unassigned(&self, user_id: i64, agent_id: i64) -> usize;
}
