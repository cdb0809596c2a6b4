// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory reference implementation of the collaborator traits.
//!
//! Backs the engine test suites and serves as the executable reference
//! for what a storage adapter must provide — in particular the
//! compare-and-set semantics of the conditional writers. Interior state
//! sits behind a single mutex; every trait call locks, acts, and releases,
//! so concurrent callers interleave between calls exactly as they would
//! against a database.

use crate::store::{
    AgentStore, CalculationStore, CaseStore, ClaimFieldUpdate, NewCalculationRecord, TariffStore,
};
use osago_audit::{HistoryEntry, HistoryLog};
use osago_domain::{
    ApplicationStatus, BaseRateRow, ClaimStatus, DriverModeCoefficientRow, KbmCoefficientRow,
    KvsCoefficientRow, PaymentStatus, PolicyStatus, PowerCoefficientRow, RegionCoefficientRow,
    TariffVersion, TermCoefficientRow,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use time::{Date, OffsetDateTime};

/// A policy application row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRow {
    /// The owning user.
    pub user_id: i64,
    /// Current status.
    pub status: ApplicationStatus,
    /// The issued policy, if any.
    pub policy_id: Option<i64>,
    /// Last update time, if any update happened.
    pub updated_at: Option<OffsetDateTime>,
}

/// A policy row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRow {
    /// Current status.
    pub status: PolicyStatus,
    /// The premium owed for this policy.
    pub premium: Decimal,
}

/// A claim row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRow {
    /// Current status.
    pub status: ClaimStatus,
    /// Approved payout amount, when decided positively.
    pub approved_amount: Option<Decimal>,
    /// Decision rationale.
    pub decision_comment: Option<String>,
    /// When the decision was made.
    pub decided_at: Option<OffsetDateTime>,
    /// When the payout was made.
    pub paid_at: Option<OffsetDateTime>,
}

/// A payment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRow {
    /// The policy being paid for.
    pub policy_id: i64,
    /// The amount charged.
    pub amount: Decimal,
    /// The provider label.
    pub provider: String,
    /// Current status.
    pub status: PaymentStatus,
    /// Creation time.
    pub created_at: OffsetDateTime,
}

/// A recorded client notification signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The recipient.
    pub user_id: i64,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub message: String,
}

#[derive(Debug, Default)]
struct Inner {
    versions: Vec<TariffVersion>,
    base_rates: HashMap<i64, Vec<BaseRateRow>>,
    region_coefficients: HashMap<i64, Vec<RegionCoefficientRow>>,
    power_coefficients: HashMap<i64, Vec<PowerCoefficientRow>>,
    term_coefficients: HashMap<i64, Vec<TermCoefficientRow>>,
    driver_mode_coefficients: HashMap<i64, DriverModeCoefficientRow>,
    kvs_coefficients: HashMap<i64, Vec<KvsCoefficientRow>>,
    kbm_coefficients: HashMap<i64, Vec<KbmCoefficientRow>>,
    kbm_table_present: bool,
    next_id: i64,
    calculations: Vec<(i64, NewCalculationRecord)>,
    applications: HashMap<i64, ApplicationRow>,
    policies: HashMap<i64, PolicyRow>,
    claims: HashMap<i64, ClaimRow>,
    payments: HashMap<i64, PaymentRow>,
    application_history: HashMap<i64, HistoryLog>,
    claim_history: HashMap<i64, HistoryLog>,
    notifications: Vec<Notification>,
    agents: Vec<i64>,
    users: HashMap<i64, Option<i64>>,
    assignment_log: Vec<i64>,
    assignment_writes: usize,
}

/// In-memory store implementing every collaborator trait.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store with the bonus-malus table marked present.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                kbm_table_present: true,
                next_id: 1,
                ..Inner::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn allocate_id(inner: &mut Inner) -> i64 {
        let id: i64 = inner.next_id;
        inner.next_id += 1;
        id
    }

    // ---- tariff seeding ----

    /// Adds a tariff version.
    pub fn add_tariff_version(&self, version: TariffVersion) {
        self.lock().versions.push(version);
    }

    /// Replaces the base rate rows of a version.
    pub fn set_base_rates(&self, tariff_version_id: i64, rows: Vec<BaseRateRow>) {
        self.lock().base_rates.insert(tariff_version_id, rows);
    }

    /// Replaces the region coefficient rows of a version.
    pub fn set_region_coefficients(&self, tariff_version_id: i64, rows: Vec<RegionCoefficientRow>) {
        self.lock()
            .region_coefficients
            .insert(tariff_version_id, rows);
    }

    /// Replaces the power band rows of a version.
    pub fn set_power_coefficients(&self, tariff_version_id: i64, rows: Vec<PowerCoefficientRow>) {
        self.lock()
            .power_coefficients
            .insert(tariff_version_id, rows);
    }

    /// Replaces the term coefficient rows of a version.
    pub fn set_term_coefficients(&self, tariff_version_id: i64, rows: Vec<TermCoefficientRow>) {
        self.lock().term_coefficients.insert(tariff_version_id, rows);
    }

    /// Sets the driver-mode coefficient pair of a version.
    pub fn set_driver_mode_coefficients(
        &self,
        tariff_version_id: i64,
        row: DriverModeCoefficientRow,
    ) {
        self.lock()
            .driver_mode_coefficients
            .insert(tariff_version_id, row);
    }

    /// Replaces the age/experience band rows of a version.
    pub fn set_kvs_coefficients(&self, tariff_version_id: i64, rows: Vec<KvsCoefficientRow>) {
        self.lock().kvs_coefficients.insert(tariff_version_id, rows);
    }

    /// Replaces the bonus-malus rows of a version.
    pub fn set_kbm_coefficients(&self, tariff_version_id: i64, rows: Vec<KbmCoefficientRow>) {
        self.lock().kbm_coefficients.insert(tariff_version_id, rows);
    }

    /// Marks the bonus-malus table present or absent in the dataset.
    pub fn set_kbm_table_present(&self, present: bool) {
        self.lock().kbm_table_present = present;
    }

    // ---- case seeding ----

    /// Inserts a user with an optional pre-assigned agent.
    pub fn insert_user(&self, user_id: i64, assigned_agent: Option<i64>) {
        self.lock().users.insert(user_id, assigned_agent);
    }

    /// Inserts an agent into the roster.
    pub fn insert_agent(&self, agent_id: i64) {
        let mut inner = self.lock();
        inner.agents.push(agent_id);
        inner.agents.sort_unstable();
    }

    /// Records a historical case assignment, newest last.
    pub fn record_case_assignment(&self, agent_id: i64) {
        self.lock().assignment_log.push(agent_id);
    }

    /// Inserts a policy and returns its identifier.
    pub fn insert_policy(&self, status: PolicyStatus, premium: Decimal) -> i64 {
        let mut inner = self.lock();
        let id: i64 = Self::allocate_id(&mut inner);
        inner.policies.insert(id, PolicyRow { status, premium });
        id
    }

    /// Inserts an application and returns its identifier.
    pub fn insert_application(
        &self,
        user_id: i64,
        status: ApplicationStatus,
        policy_id: Option<i64>,
    ) -> i64 {
        let mut inner = self.lock();
        let id: i64 = Self::allocate_id(&mut inner);
        inner.applications.insert(
            id,
            ApplicationRow {
                user_id,
                status,
                policy_id,
                updated_at: None,
            },
        );
        id
    }

    /// Inserts a claim and returns its identifier.
    pub fn insert_claim(&self, status: ClaimStatus) -> i64 {
        let mut inner = self.lock();
        let id: i64 = Self::allocate_id(&mut inner);
        inner.claims.insert(
            id,
            ClaimRow {
                status,
                approved_amount: None,
                decision_comment: None,
                decided_at: None,
                paid_at: None,
            },
        );
        id
    }

    // ---- inspection ----

    /// The number of persisted calculation records.
    #[must_use]
    pub fn calculation_count(&self) -> usize {
        self.lock().calculations.len()
    }

    /// A persisted calculation record by identifier.
    #[must_use]
    pub fn calculation(&self, calculation_id: i64) -> Option<NewCalculationRecord> {
        self.lock()
            .calculations
            .iter()
            .find(|(id, _)| *id == calculation_id)
            .map(|(_, record)| record.clone())
    }

    /// A claim row by identifier.
    #[must_use]
    pub fn claim(&self, claim_id: i64) -> Option<ClaimRow> {
        self.lock().claims.get(&claim_id).cloned()
    }

    /// An application row by identifier.
    #[must_use]
    pub fn application(&self, application_id: i64) -> Option<ApplicationRow> {
        self.lock().applications.get(&application_id).cloned()
    }

    /// A payment row by identifier.
    #[must_use]
    pub fn payment(&self, payment_id: i64) -> Option<PaymentRow> {
        self.lock().payments.get(&payment_id).cloned()
    }

    /// A policy row by identifier.
    #[must_use]
    pub fn policy(&self, policy_id: i64) -> Option<PolicyRow> {
        self.lock().policies.get(&policy_id).cloned()
    }

    /// The history log of an application.
    #[must_use]
    pub fn application_history(&self, application_id: i64) -> HistoryLog {
        self.lock()
            .application_history
            .get(&application_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The history log of a claim.
    #[must_use]
    pub fn claim_history(&self, claim_id: i64) -> HistoryLog {
        self.lock().claim_history.get(&claim_id).cloned().unwrap_or_default()
    }

    /// All recorded notification signals.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    /// How many agent-assignment writes actually landed.
    #[must_use]
    pub fn assignment_write_count(&self) -> usize {
        self.lock().assignment_writes
    }
}

impl TariffStore for MemoryStore {
    fn active_versions(&self, today: Date) -> Vec<TariffVersion> {
        let mut versions: Vec<TariffVersion> = self
            .lock()
            .versions
            .iter()
            .filter(|v| v.is_current(today))
            .cloned()
            .collect();
        versions.sort_by(|a, b| (b.valid_from, b.id).cmp(&(a.valid_from, a.id)));
        versions
    }

    fn base_rates(&self, tariff_version_id: i64) -> Vec<BaseRateRow> {
        self.lock()
            .base_rates
            .get(&tariff_version_id)
            .cloned()
            .unwrap_or_default()
    }

    fn region_coefficients(&self, tariff_version_id: i64) -> Vec<RegionCoefficientRow> {
        self.lock()
            .region_coefficients
            .get(&tariff_version_id)
            .cloned()
            .unwrap_or_default()
    }

    fn power_coefficients(&self, tariff_version_id: i64) -> Vec<PowerCoefficientRow> {
        self.lock()
            .power_coefficients
            .get(&tariff_version_id)
            .cloned()
            .unwrap_or_default()
    }

    fn term_coefficients(&self, tariff_version_id: i64) -> Vec<TermCoefficientRow> {
        self.lock()
            .term_coefficients
            .get(&tariff_version_id)
            .cloned()
            .unwrap_or_default()
    }

    fn driver_mode_coefficients(&self, tariff_version_id: i64) -> Option<DriverModeCoefficientRow> {
        self.lock()
            .driver_mode_coefficients
            .get(&tariff_version_id)
            .cloned()
    }

    fn kvs_coefficients(&self, tariff_version_id: i64) -> Vec<KvsCoefficientRow> {
        self.lock()
            .kvs_coefficients
            .get(&tariff_version_id)
            .cloned()
            .unwrap_or_default()
    }

    fn kbm_coefficients(&self, tariff_version_id: i64) -> Vec<KbmCoefficientRow> {
        self.lock()
            .kbm_coefficients
            .get(&tariff_version_id)
            .cloned()
            .unwrap_or_default()
    }

    fn kbm_table_present(&self) -> bool {
        self.lock().kbm_table_present
    }
}

impl CalculationStore for MemoryStore {
    fn insert_calculation(&self, record: NewCalculationRecord) -> i64 {
        let mut inner = self.lock();
        let id: i64 = Self::allocate_id(&mut inner);
        inner.calculations.push((id, record));
        id
    }
}

impl CaseStore for MemoryStore {
    fn application_status(&self, application_id: i64) -> Option<ApplicationStatus> {
        self.lock()
            .applications
            .get(&application_id)
            .map(|row| row.status)
    }

    fn application_policy_id(&self, application_id: i64) -> Option<Option<i64>> {
        self.lock()
            .applications
            .get(&application_id)
            .map(|row| row.policy_id)
    }

    fn application_user_id(&self, application_id: i64) -> Option<i64> {
        self.lock()
            .applications
            .get(&application_id)
            .map(|row| row.user_id)
    }

    fn policy_status(&self, policy_id: i64) -> Option<PolicyStatus> {
        self.lock().policies.get(&policy_id).map(|row| row.status)
    }

    fn policy_premium(&self, policy_id: i64) -> Option<Decimal> {
        self.lock().policies.get(&policy_id).map(|row| row.premium)
    }

    fn claim_status(&self, claim_id: i64) -> Option<ClaimStatus> {
        self.lock().claims.get(&claim_id).map(|row| row.status)
    }

    fn payment_status(&self, payment_id: i64) -> Option<PaymentStatus> {
        self.lock().payments.get(&payment_id).map(|row| row.status)
    }

    fn latest_payment_for_application(&self, application_id: i64) -> Option<i64> {
        let inner = self.lock();
        let policy_id: i64 = inner.applications.get(&application_id)?.policy_id?;
        inner
            .payments
            .iter()
            .filter(|(_, row)| row.policy_id == policy_id)
            .max_by_key(|&(id, row)| (row.created_at, *id))
            .map(|(id, _)| *id)
    }

    fn update_application_status(
        &self,
        application_id: i64,
        expected: &[ApplicationStatus],
        new_status: ApplicationStatus,
        updated_at: OffsetDateTime,
    ) -> usize {
        let mut inner = self.lock();
        match inner.applications.get_mut(&application_id) {
            Some(row) if expected.contains(&row.status) => {
                row.status = new_status;
                row.updated_at = Some(updated_at);
                1
            }
            _ => 0,
        }
    }

    fn update_claim_status(
        &self,
        claim_id: i64,
        expected: &[ClaimStatus],
        new_status: ClaimStatus,
        fields: ClaimFieldUpdate,
        _updated_at: OffsetDateTime,
    ) -> usize {
        let mut inner = self.lock();
        match inner.claims.get_mut(&claim_id) {
            Some(row) if expected.contains(&row.status) => {
                row.status = new_status;
                if let Some(amount) = fields.approved_amount {
                    row.approved_amount = amount;
                }
                if let Some(comment) = fields.decision_comment {
                    row.decision_comment = comment;
                }
                if let Some(decided_at) = fields.decided_at {
                    row.decided_at = decided_at;
                }
                if let Some(paid_at) = fields.paid_at {
                    row.paid_at = paid_at;
                }
                1
            }
            _ => 0,
        }
    }

    fn update_payment_status(
        &self,
        payment_id: i64,
        expected: &[PaymentStatus],
        new_status: PaymentStatus,
    ) -> usize {
        let mut inner = self.lock();
        match inner.payments.get_mut(&payment_id) {
            Some(row) if expected.contains(&row.status) => {
                row.status = new_status;
                1
            }
            _ => 0,
        }
    }

    fn update_policy_status(
        &self,
        policy_id: i64,
        expected: &[PolicyStatus],
        new_status: PolicyStatus,
    ) -> usize {
        let mut inner = self.lock();
        match inner.policies.get_mut(&policy_id) {
            Some(row) if expected.contains(&row.status) => {
                row.status = new_status;
                1
            }
            _ => 0,
        }
    }

    fn create_payment(
        &self,
        policy_id: i64,
        amount: Decimal,
        provider: &str,
        created_at: OffsetDateTime,
    ) -> i64 {
        let mut inner = self.lock();
        let id: i64 = Self::allocate_id(&mut inner);
        inner.payments.insert(
            id,
            PaymentRow {
                policy_id,
                amount,
                provider: provider.to_string(),
                status: PaymentStatus::New,
                created_at,
            },
        );
        id
    }

    fn delete_application(&self, application_id: i64) -> usize {
        let mut inner = self.lock();
        match inner.applications.remove(&application_id) {
            Some(row) => {
                if let Some(policy_id) = row.policy_id {
                    inner.policies.remove(&policy_id);
                }
                1
            }
            None => 0,
        }
    }

    fn append_application_history(&self, application_id: i64, entry: HistoryEntry) {
        self.lock()
            .application_history
            .entry(application_id)
            .or_default()
            .push(entry);
    }

    fn append_claim_history(&self, claim_id: i64, entry: HistoryEntry) {
        self.lock()
            .claim_history
            .entry(claim_id)
            .or_default()
            .push(entry);
    }

    fn push_notification(&self, user_id: i64, title: &str, message: &str) {
        self.lock().notifications.push(Notification {
            user_id,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl AgentStore for MemoryStore {
    fn agent_ids(&self) -> Vec<i64> {
        self.lock().agents.clone()
    }

    fn last_assigned_agent_id(&self) -> Option<i64> {
        self.lock().assignment_log.last().copied()
    }

    fn assigned_agent(&self, user_id: i64) -> Option<Option<i64>> {
        self.lock().users.get(&user_id).copied()
    }

    fn assign_agent_if_unassigned(&self, user_id: i64, agent_id: i64) -> usize {
        let mut inner = self.lock();
        match inner.users.get_mut(&user_id) {
            Some(slot) if slot.is_none() => {
                *slot = Some(agent_id);
                inner.assignment_writes += 1;
                // Assignment happens while a case is being created, so the
                // log advances here; a storage adapter derives this from
                // the cases themselves.
                inner.assignment_log.push(agent_id);
                1
            }
            _ => 0,
        }
    }
}
