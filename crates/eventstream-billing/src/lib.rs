//! # eventstream-billing
//!
//! Subscription checkout and payment simulation for the EventStream
//! platform.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐    ┌─────────────────┐    ┌──────────────────┐
//! │ PlanCatalog │───▶│ CheckoutSession │───▶│ PaymentProcessor │
//! │   (pick)    │    │  (card entry)   │    │   (authorize)    │
//! └─────────────┘    └─────────────────┘    └────────┬─────────┘
//!                                                    │ appends
//!                                           ┌────────▼──────────┐
//!                                           │ TransactionLedger │
//!                                           │ (history / retry) │
//!                                           └───────────────────┘
//! ```
//!
//! The processor talks to a [`PaymentGateway`]; the shipped
//! [`SimulatedGateway`] waits a fixed latency and draws approve/decline
//! from a configurable policy (80% approval by default). No real money
//! moves anywhere in this crate.
//!
//! Sessions are single-use: the `Draft -> Submitted` transition happens
//! exactly once, so a double-clicked pay button cannot double-charge. A
//! declined authorization is not an error - it lands on the ledger as a
//! `Failed` record that can be retried with fresh card details.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use eventstream_billing::{
//!     CheckoutSession, PaymentMethod, PaymentProcessor, PlanCatalog,
//!     SimulatedGateway, TransactionLedger,
//! };
//!
//! let catalog = Arc::new(PlanCatalog::new());
//! let ledger = Arc::new(TransactionLedger::new());
//! let processor = PaymentProcessor::new(
//!     catalog.clone(),
//!     Arc::new(SimulatedGateway::default()),
//!     ledger.clone(),
//! );
//!
//! let session = CheckoutSession::new(
//!     &catalog,
//!     "standard",
//!     PaymentMethod::new("Jane Doe", "4242 4242 4242 4242", "12/27", "123"),
//! )?;
//!
//! let record = processor.submit(&session).await?;
//! println!("{} -> {}", record.id, record.status);
//! ```

mod error;
mod gateway;
mod ledger;
mod payment_method;
mod plan;
mod processor;
mod session;

pub use error::{BillingError, Result};
pub use gateway::{
    ApprovalRate, AuthorizationRequest, DecisionPolicy, DeclineReason, FixedDecision,
    GatewayDecision, PaymentGateway, SimulatedGateway, DEFAULT_APPROVAL_RATE,
    DEFAULT_GATEWAY_LATENCY,
};
pub use ledger::{
    LedgerSummary, TransactionId, TransactionLedger, TransactionRecord, TransactionStatus,
};
pub use payment_method::{CardBrand, PaymentMethod};
pub use plan::{Plan, PlanCatalog, PlanId};
pub use processor::PaymentProcessor;
pub use session::{CheckoutSession, SessionId, SessionState};
