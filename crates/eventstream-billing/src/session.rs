//! Checkout Session
//!
//! One attempt to purchase a plan: the chosen plan plus draft card details,
//! valid for exactly one submission. The `Draft -> Submitted` transition is
//! guarded by a lock, so two racing submit calls (a double-clicked pay
//! button) can never both reach the gateway.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::error::{BillingError, Result};
use crate::payment_method::PaymentMethod;
use crate::plan::{PlanCatalog, PlanId};

/// Session identifier (for log correlation only)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new session id
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a session is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Editable; not yet handed to the processor
    Draft,
    /// Handed to the processor; no further edits or resubmission
    Submitted,
}

/// A single-use checkout attempt
///
/// Holds the card details in memory until submission. Not `Clone` (a copy
/// would carry its own submission slot) and not `Serialize` (card data must
/// never hit the wire or disk) - share via `Arc` if needed.
pub struct CheckoutSession {
    id: SessionId,
    plan_id: PlanId,
    payment_method: PaymentMethod,
    state: Mutex<SessionState>,
    created_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Start a checkout for a plan
    ///
    /// The plan id must resolve in the catalog (strict lookup - no silent
    /// fallback on the paid path) and the payment method must be complete.
    pub fn new(
        catalog: &PlanCatalog,
        plan_id: &str,
        payment_method: PaymentMethod,
    ) -> Result<Self> {
        let plan = catalog.get(plan_id)?;
        payment_method.validate()?;

        Ok(Self {
            id: SessionId::generate(),
            plan_id: plan.id.clone(),
            payment_method,
            state: Mutex::new(SessionState::Draft),
            created_at: Utc::now(),
        })
    }

    /// Fresh draft targeting the plan of a failed payment
    ///
    /// Card details start empty and must be re-entered via
    /// [`CheckoutSession::replace_payment_method`]; the originals were never
    /// retained.
    pub(crate) fn draft_for_retry(plan_id: PlanId) -> Self {
        Self {
            id: SessionId::generate(),
            plan_id,
            payment_method: PaymentMethod::empty(),
            state: Mutex::new(SessionState::Draft),
            created_at: Utc::now(),
        }
    }

    /// Swap in new card details
    ///
    /// Allowed only while the session is a draft.
    pub fn replace_payment_method(&mut self, payment_method: PaymentMethod) -> Result<()> {
        if self.state() == SessionState::Submitted {
            return Err(BillingError::SessionAlreadySubmitted);
        }
        payment_method.validate()?;
        self.payment_method = payment_method;
        Ok(())
    }

    /// Take the session's single submission slot
    ///
    /// Succeeds exactly once; every later call observes `Submitted` and
    /// fails, including calls racing from other tasks.
    pub(crate) fn begin_submission(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        match *state {
            SessionState::Draft => {
                *state = SessionState::Submitted;
                Ok(())
            }
            SessionState::Submitted => Err(BillingError::SessionAlreadySubmitted),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn plan_id(&self) -> &PlanId {
        &self.plan_id
    }

    pub fn payment_method(&self) -> &PaymentMethod {
        &self.payment_method
    }

    /// Current lifecycle state
    pub fn state(&self) -> SessionState {
        *self.state.lock().unwrap()
    }

    /// When the session was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method() -> PaymentMethod {
        PaymentMethod::new("Jane Doe", "4242 4242 4242 4242", "12/27", "123")
    }

    #[test]
    fn test_new_session_starts_as_draft() {
        let catalog = PlanCatalog::new();
        let session = CheckoutSession::new(&catalog, "premium", method()).unwrap();

        assert_eq!(session.state(), SessionState::Draft);
        assert_eq!(session.plan_id().as_str(), "premium");
        assert!(session.payment_method().is_complete());
    }

    #[test]
    fn test_unknown_plan_rejected_at_creation() {
        let catalog = PlanCatalog::new();
        let result = CheckoutSession::new(&catalog, "quantum", method());
        assert!(matches!(result, Err(BillingError::InvalidPlan(_))));
    }

    #[test]
    fn test_incomplete_card_rejected_at_creation() {
        let catalog = PlanCatalog::new();
        let result = CheckoutSession::new(&catalog, "standard", PaymentMethod::empty());
        assert!(matches!(result, Err(BillingError::InvalidPaymentMethod(_))));
    }

    #[test]
    fn test_submission_slot_is_single_use() {
        let catalog = PlanCatalog::new();
        let session = CheckoutSession::new(&catalog, "standard", method()).unwrap();

        assert!(session.begin_submission().is_ok());
        assert_eq!(session.state(), SessionState::Submitted);

        for _ in 0..3 {
            assert!(matches!(
                session.begin_submission(),
                Err(BillingError::SessionAlreadySubmitted)
            ));
        }
    }

    #[test]
    fn test_no_card_edits_after_submission() {
        let catalog = PlanCatalog::new();
        let mut session = CheckoutSession::new(&catalog, "standard", method()).unwrap();

        session.begin_submission().unwrap();

        let result = session.replace_payment_method(method());
        assert!(matches!(result, Err(BillingError::SessionAlreadySubmitted)));
    }

    #[test]
    fn test_replace_validates_new_card() {
        let catalog = PlanCatalog::new();
        let mut session = CheckoutSession::new(&catalog, "standard", method()).unwrap();

        let result = session.replace_payment_method(PaymentMethod::empty());
        assert!(matches!(result, Err(BillingError::InvalidPaymentMethod(_))));

        // The old card survives a rejected replacement
        assert!(session.payment_method().is_complete());
    }
}
