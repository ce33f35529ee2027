//! Transaction Ledger
//!
//! Append-only history of payment attempts. Records are immutable once
//! written; the only mutation the ledger supports is pushing a new record,
//! and only the payment processor does that.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};
use crate::gateway::DeclineReason;
use crate::plan::PlanId;
use crate::session::CheckoutSession;

/// Transaction identifier (formatted: TXN + 8 hex chars, e.g. "TXN8A7B6C5D")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a new transaction id
    pub fn generate() -> Self {
        let id = uuid::Uuid::new_v4();
        let hex = id.simple().to_string().to_uppercase();
        Self(format!("TXN{}", &hex[0..8]))
    }

    /// Parse from string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into().to_uppercase())
    }

    /// Get the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment attempt status
///
/// `Success` and `Failed` are terminal - no record ever transitions out of
/// them. `Pending` exists for attempts still in flight; the shipped
/// processor resolves the outcome before recording anything, so callers
/// only ever observe terminal records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Success => "success",
            TransactionStatus::Failed => "failed",
        }
    }

    /// Parse from a query-string value
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(TransactionStatus::Pending),
            "success" => Some(TransactionStatus::Success),
            "failed" => Some(TransactionStatus::Failed),
            _ => None,
        }
    }

    /// Terminal statuses never change again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One payment attempt, immutable once terminal
///
/// Plan, price, and description are snapshots taken at charge time, so
/// history stays accurate if the catalog ever changes. `payment_method`
/// carries only the redacted descriptor - raw card numbers and CVVs never
/// reach a record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Transaction id shown to the customer
    pub id: TransactionId,

    /// Plan that was charged
    pub plan_id: PlanId,

    /// Line item, e.g. "Standard Plan - Monthly"
    pub description: String,

    /// Amount charged (zero for trial checkouts)
    pub amount_due: Decimal,

    /// Outcome
    pub status: TransactionStatus,

    /// Redacted instrument summary, e.g. "Visa •••• 4242"
    pub payment_method: String,

    /// Set exactly when the attempt was declined
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub decline: Option<DeclineReason>,

    /// When the attempt was submitted
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn succeeded(&self) -> bool {
        self.status == TransactionStatus::Success
    }

    /// Customer-facing failure explanation, when declined
    pub fn decline_message(&self) -> Option<&'static str> {
        self.decline.map(|reason| reason.message())
    }
}

/// Aggregate view of the ledger (the history page's summary cards)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of amounts over successful records
    pub total_spent: Decimal,

    /// All records
    pub transaction_count: usize,

    /// Successful records
    pub success_count: usize,

    /// Failed records
    pub failed_count: usize,
}

/// Append-only transaction history
///
/// Construct once at startup (or per test) and share via `Arc`. Appends
/// are atomic behind an `RwLock`; everything else is a read.
pub struct TransactionLedger {
    records: RwLock<Vec<TransactionRecord>>,
}

impl Default for TransactionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Append a record. Existing entries are never touched.
    pub(crate) fn append(&self, record: TransactionRecord) {
        let mut records = self.records.write().unwrap();
        tracing::debug!(
            transaction = %record.id,
            status = %record.status,
            amount = %record.amount_due,
            "Recorded transaction"
        );
        records.push(record);
    }

    /// Records matching the filter, oldest first
    ///
    /// `None` returns everything. Insertion order is stable; callers that
    /// want most-recent-first reverse at the edge.
    pub fn query(&self, status: Option<TransactionStatus>) -> Vec<TransactionRecord> {
        let records = self.records.read().unwrap();
        match status {
            Some(wanted) => records
                .iter()
                .filter(|r| r.status == wanted)
                .cloned()
                .collect(),
            None => records.clone(),
        }
    }

    /// Look up a single record
    pub fn get(&self, id: &TransactionId) -> Option<TransactionRecord> {
        let records = self.records.read().unwrap();
        records.iter().find(|r| &r.id == id).cloned()
    }

    /// Total across successful payments
    pub fn total_spent(&self) -> Decimal {
        let records = self.records.read().unwrap();
        records
            .iter()
            .filter(|r| r.succeeded())
            .map(|r| r.amount_due)
            .sum()
    }

    /// Counts and totals for the history summary
    pub fn summary(&self) -> LedgerSummary {
        let records = self.records.read().unwrap();

        let mut summary = LedgerSummary {
            total_spent: Decimal::ZERO,
            transaction_count: records.len(),
            success_count: 0,
            failed_count: 0,
        };

        for record in records.iter() {
            match record.status {
                TransactionStatus::Success => {
                    summary.success_count += 1;
                    summary.total_spent += record.amount_due;
                }
                TransactionStatus::Failed => summary.failed_count += 1,
                TransactionStatus::Pending => {}
            }
        }

        summary
    }

    /// Start a fresh checkout for a failed payment
    ///
    /// The new session targets the same plan; card details must be entered
    /// again, since the originals were never retained. The failed record is
    /// never modified - completing the retry appends a brand-new record.
    pub fn retry(&self, id: &TransactionId) -> Result<CheckoutSession> {
        let record = self
            .get(id)
            .ok_or_else(|| BillingError::TransactionNotFound(id.to_string()))?;

        if record.status != TransactionStatus::Failed {
            return Err(BillingError::NotRetryable {
                id: id.to_string(),
                status: record.status,
            });
        }

        tracing::info!(transaction = %id, plan = %record.plan_id, "Retrying failed payment");
        Ok(CheckoutSession::draft_for_retry(record.plan_id))
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
