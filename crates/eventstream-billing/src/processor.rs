//! Payment Processor
//!
//! Drives a checkout session through authorization and records the terminal
//! outcome on the ledger. This is the only component that appends records.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::gateway::{AuthorizationRequest, GatewayDecision, PaymentGateway};
use crate::ledger::{TransactionId, TransactionLedger, TransactionRecord, TransactionStatus};
use crate::plan::PlanCatalog;
use crate::session::CheckoutSession;

/// Processes checkout sessions against the configured gateway
pub struct PaymentProcessor {
    catalog: Arc<PlanCatalog>,
    gateway: Arc<dyn PaymentGateway>,
    ledger: Arc<TransactionLedger>,
}

impl PaymentProcessor {
    pub fn new(
        catalog: Arc<PlanCatalog>,
        gateway: Arc<dyn PaymentGateway>,
        ledger: Arc<TransactionLedger>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            ledger,
        }
    }

    /// Charge a checkout session
    ///
    /// Validates the session, takes its single submission slot, runs the
    /// authorization round trip, and appends the terminal record. A declined
    /// authorization is a normal `Failed` outcome, not an error; the errors
    /// here are all caller mistakes caught before anything is charged.
    pub async fn submit(&self, session: &CheckoutSession) -> Result<TransactionRecord> {
        // Validate before taking the submission slot, so an incomplete
        // session (a retry draft without card details) can be corrected
        // and submitted again.
        session.payment_method().validate()?;
        let plan = self.catalog.get(session.plan_id().as_str())?;

        session.begin_submission()?;

        let created_at = Utc::now();
        let amount_due = plan.amount_due_today();
        let descriptor = session.payment_method().descriptor();

        tracing::info!(
            session = %session.id(),
            plan = %plan.id,
            amount = %amount_due,
            gateway = self.gateway.name(),
            "Submitting payment"
        );

        let request = AuthorizationRequest {
            plan_id: plan.id.clone(),
            amount: amount_due,
            descriptor: descriptor.clone(),
        };

        let decision = self.gateway.authorize(&request).await;

        let (status, decline) = match decision {
            GatewayDecision::Approved => (TransactionStatus::Success, None),
            GatewayDecision::Declined(reason) => (TransactionStatus::Failed, Some(reason)),
        };

        let record = TransactionRecord {
            id: TransactionId::generate(),
            plan_id: plan.id.clone(),
            description: plan.billing_description(),
            amount_due,
            status,
            payment_method: descriptor,
            decline,
            created_at,
        };

        self.ledger.append(record.clone());

        match status {
            TransactionStatus::Success => {
                tracing::info!(transaction = %record.id, "Payment approved");
            }
            _ => {
                tracing::warn!(
                    transaction = %record.id,
                    reason = ?record.decline,
                    "Payment declined"
                );
            }
        }

        Ok(record)
    }

    /// The ledger this processor appends to
    pub fn ledger(&self) -> &Arc<TransactionLedger> {
        &self.ledger
    }
}
