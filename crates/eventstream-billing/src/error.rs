//! Billing Error Types

use thiserror::Error;

use crate::ledger::TransactionStatus;

/// Result type alias
pub type Result<T> = std::result::Result<T, BillingError>;

/// Billing-related errors
///
/// Every variant is a caller mistake, reported synchronously before any
/// money moves. A declined authorization is NOT an error - it surfaces as
/// a transaction record with `Failed` status.
#[derive(Error, Debug)]
pub enum BillingError {
    /// Plan id does not exist in the catalog
    #[error("Unknown plan: {0}")]
    InvalidPlan(String),

    /// Payment method failed shape validation
    #[error("Invalid payment method: {0}")]
    InvalidPaymentMethod(String),

    /// The checkout session was already handed to the processor
    #[error("Checkout session already submitted")]
    SessionAlreadySubmitted,

    /// No transaction with the given id
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// Retry requested for a transaction that did not fail
    #[error("Transaction {id} is {status}; only failed transactions can be retried")]
    NotRetryable {
        id: String,
        status: TransactionStatus,
    },
}

impl BillingError {
    /// Stable machine-readable code (for API responses)
    pub fn code(&self) -> &str {
        match self {
            BillingError::InvalidPlan(_) => "INVALID_PLAN",
            BillingError::InvalidPaymentMethod(_) => "INVALID_PAYMENT_METHOD",
            BillingError::SessionAlreadySubmitted => "ALREADY_SUBMITTED",
            BillingError::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            BillingError::NotRetryable { .. } => "NOT_RETRYABLE",
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> &str {
        match self {
            BillingError::InvalidPlan(_) => "The selected plan is not available.",
            BillingError::InvalidPaymentMethod(_) => "Please check your payment details.",
            BillingError::SessionAlreadySubmitted => "This payment has already been submitted.",
            BillingError::TransactionNotFound(_) => "We couldn't find that transaction.",
            BillingError::NotRetryable { .. } => "Only failed payments can be retried.",
        }
    }
}
