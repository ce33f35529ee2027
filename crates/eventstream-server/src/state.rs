//! Application State

use std::sync::Arc;

use eventstream_billing::{PaymentProcessor, PlanCatalog, TransactionLedger};
use eventstream_catalog::{CategoryCatalog, EventCatalog};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Subscription plans
    pub plans: Arc<PlanCatalog>,

    /// Browse catalog: events
    pub events: Arc<EventCatalog>,

    /// Browse catalog: categories
    pub categories: Arc<CategoryCatalog>,

    /// Charges checkout sessions against the configured gateway
    pub processor: Arc<PaymentProcessor>,

    /// Payment history (append-only; written only by the processor)
    pub ledger: Arc<TransactionLedger>,
}
