//! Simulated Gateway
//!
//! Stands in for a real payment processor: waits a fixed latency, then
//! draws approve/decline from a configurable policy. No network, no money.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::{AuthorizationRequest, DeclineReason, GatewayDecision, PaymentGateway};

/// Default authorization round-trip latency
pub const DEFAULT_GATEWAY_LATENCY: Duration = Duration::from_millis(2000);

/// Default approval probability
pub const DEFAULT_APPROVAL_RATE: f64 = 0.8;

/// Decides authorization outcomes for the simulated gateway
pub trait DecisionPolicy: Send + Sync {
    fn decide(&self) -> GatewayDecision;
}

/// Approve with a fixed probability; decline with a random reason
pub struct ApprovalRate {
    rate: f64,
}

impl ApprovalRate {
    /// `rate` is clamped to `[0.0, 1.0]`; `NaN` falls back to the default
    ///
    /// `clamp` propagates `NaN`, and `gen_bool` panics on it, so a rate that
    /// parsed as `NaN` must never reach the draw.
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_nan() {
            DEFAULT_APPROVAL_RATE
        } else {
            rate
        };

        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }
}

impl Default for ApprovalRate {
    fn default() -> Self {
        Self::new(DEFAULT_APPROVAL_RATE)
    }
}

impl DecisionPolicy for ApprovalRate {
    fn decide(&self) -> GatewayDecision {
        let mut rng = rand::thread_rng();

        if rng.gen_bool(self.rate) {
            GatewayDecision::Approved
        } else {
            let reason = DeclineReason::ALL[rng.gen_range(0..DeclineReason::ALL.len())];
            GatewayDecision::Declined(reason)
        }
    }
}

/// Always returns the same decision (for tests and demos)
pub struct FixedDecision(pub GatewayDecision);

impl DecisionPolicy for FixedDecision {
    fn decide(&self) -> GatewayDecision {
        self.0
    }
}

/// Simulated payment gateway
pub struct SimulatedGateway {
    latency: Duration,
    policy: Box<dyn DecisionPolicy>,
}

impl Default for SimulatedGateway {
    /// 2 second round trip, 80% approval
    fn default() -> Self {
        Self::new(DEFAULT_GATEWAY_LATENCY, ApprovalRate::default())
    }
}

impl SimulatedGateway {
    pub fn new(latency: Duration, policy: impl DecisionPolicy + 'static) -> Self {
        Self {
            latency,
            policy: Box::new(policy),
        }
    }

    /// Zero latency, fixed outcome (for tests)
    pub fn instant(decision: GatewayDecision) -> Self {
        Self::new(Duration::ZERO, FixedDecision(decision))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn authorize(&self, request: &AuthorizationRequest) -> GatewayDecision {
        // The full round trip elapses before either outcome
        tokio::time::sleep(self.latency).await;

        let decision = self.policy.decide();
        tracing::debug!(
            plan = %request.plan_id,
            amount = %request.amount,
            method = %request.descriptor,
            approved = decision.is_approved(),
            "Authorization decision"
        );

        decision
    }

    fn name(&self) -> &str {
        "SimulatedGateway"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    use crate::plan::PlanId;

    fn request() -> AuthorizationRequest {
        AuthorizationRequest {
            plan_id: PlanId::new("standard"),
            amount: dec!(9.99),
            descriptor: "Visa •••• 4242".into(),
        }
    }

    #[test]
    fn test_fixed_policy_repeats_its_decision() {
        let approve = FixedDecision(GatewayDecision::Approved);
        let decline = FixedDecision(GatewayDecision::Declined(DeclineReason::ExpiredCard));

        for _ in 0..10 {
            assert!(approve.decide().is_approved());
            assert_eq!(
                decline.decide(),
                GatewayDecision::Declined(DeclineReason::ExpiredCard)
            );
        }
    }

    #[test]
    fn test_approval_rate_extremes_are_deterministic() {
        let always = ApprovalRate::new(1.0);
        let never = ApprovalRate::new(0.0);

        for _ in 0..1000 {
            assert!(always.decide().is_approved());
            assert!(matches!(never.decide(), GatewayDecision::Declined(_)));
        }
    }

    #[test]
    fn test_out_of_range_rates_are_clamped() {
        let above = ApprovalRate::new(1.7);
        let below = ApprovalRate::new(-0.3);

        for _ in 0..100 {
            assert!(above.decide().is_approved());
            assert!(!below.decide().is_approved());
        }
    }

    #[test]
    fn test_nan_rate_falls_back_to_the_default() {
        // "nan" parses as a valid f64, so env-sourced rates can carry it
        let parsed: f64 = "nan".parse().unwrap();
        assert!(parsed.is_nan());

        let policy = ApprovalRate::new(parsed);
        assert_eq!(policy.rate, DEFAULT_APPROVAL_RATE);

        // The draw must never panic
        for _ in 0..100 {
            policy.decide();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_elapses_before_the_decision() {
        let gateway = SimulatedGateway::new(
            Duration::from_millis(2000),
            FixedDecision(GatewayDecision::Approved),
        );

        let started = tokio::time::Instant::now();
        let decision = gateway.authorize(&request()).await;

        assert!(decision.is_approved());
        assert!(started.elapsed() >= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn test_instant_gateway_skips_the_wait() {
        let gateway =
            SimulatedGateway::instant(GatewayDecision::Declined(DeclineReason::BankDeclined));

        let decision = gateway.authorize(&request()).await;
        assert_eq!(
            decision,
            GatewayDecision::Declined(DeclineReason::BankDeclined)
        );
    }
}
