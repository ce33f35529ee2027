//! Payment Gateway
//!
//! Abstraction over the authorization backend. The shipped implementation
//! simulates one; a real processor integration would slot in behind the
//! same trait without touching the payment processor.

mod simulated;

pub use simulated::{
    ApprovalRate, DecisionPolicy, FixedDecision, SimulatedGateway, DEFAULT_APPROVAL_RATE,
    DEFAULT_GATEWAY_LATENCY,
};

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::plan::PlanId;

/// Why an authorization was declined
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclineReason {
    InsufficientFunds,
    IncorrectDetails,
    ExpiredCard,
    BankDeclined,
}

impl DeclineReason {
    /// Every reason the simulated gateway can produce
    pub const ALL: [DeclineReason; 4] = [
        DeclineReason::InsufficientFunds,
        DeclineReason::IncorrectDetails,
        DeclineReason::ExpiredCard,
        DeclineReason::BankDeclined,
    ];

    /// Customer-facing explanation
    pub fn message(&self) -> &'static str {
        match self {
            DeclineReason::InsufficientFunds => "Insufficient funds in the account",
            DeclineReason::IncorrectDetails => "Card details were entered incorrectly",
            DeclineReason::ExpiredCard => "Card has expired or is not activated",
            DeclineReason::BankDeclined => "Transaction was declined by your bank",
        }
    }
}

/// Outcome of one authorization attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayDecision {
    Approved,
    Declined(DeclineReason),
}

impl GatewayDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, GatewayDecision::Approved)
    }
}

/// What the gateway sees for one charge
///
/// Carries the redacted instrument summary, never raw card data - the
/// simulated backend has no use for it, and nothing sensitive can leak
/// through gateway logs.
#[derive(Clone, Debug)]
pub struct AuthorizationRequest {
    /// Plan being charged
    pub plan_id: PlanId,

    /// Amount to authorize, in USD
    pub amount: Decimal,

    /// Instrument summary, e.g. "Visa •••• 4242"
    pub descriptor: String,
}

/// Authorization backend (Strategy pattern)
///
/// Implement this for each processor: Stripe, Adyen, Braintree, etc.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Run one authorization round trip
    ///
    /// The future resolves only once the backend has decided; approval and
    /// decline take the same path, so callers cannot distinguish a fast
    /// reject from a slow success.
    async fn authorize(&self, request: &AuthorizationRequest) -> GatewayDecision;

    /// Gateway name (for logs)
    fn name(&self) -> &str;
}
