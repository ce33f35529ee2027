//! Plan Catalog
//!
//! The immutable set of subscription plans offered to viewers. Plans never
//! change at runtime; transaction records snapshot price and description at
//! charge time, so history survives future catalog edits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Plan identifier (string token, e.g. "standard")
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanId(String);

impl PlanId {
    /// Parse from string (normalized to lowercase)
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().to_lowercase())
    }

    /// Get the id as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subscription plan
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Plan {
    /// Stable identifier, the sole lookup key
    pub id: PlanId,

    /// Display name (e.g. "Standard")
    pub name: String,

    /// Short marketing description
    pub description: String,

    /// Monthly price in USD
    pub price_monthly: Decimal,

    /// Free-trial length in days (0 = charged immediately)
    pub trial_days: u32,

    /// Concurrent device limit
    pub device_limit: u32,

    /// Peak stream resolution (e.g. "1080p", "4K+HDR")
    pub resolution: String,

    /// Feature bullet points, in display order
    #[serde(default)]
    pub features: Vec<String>,

    /// Highlighted as the most popular choice
    #[serde(default)]
    pub popular: bool,
}

impl Plan {
    /// Whether checkout starts with a free trial
    pub fn has_trial(&self) -> bool {
        self.trial_days > 0
    }

    /// Amount charged at checkout: zero during a trial, else the monthly price
    pub fn amount_due_today(&self) -> Decimal {
        if self.has_trial() {
            Decimal::ZERO
        } else {
            self.price_monthly
        }
    }

    /// Line-item description used on transaction records
    pub fn billing_description(&self) -> String {
        format!("{} Plan - Monthly", self.name)
    }
}

/// The plan catalog
///
/// Immutable once constructed. `get` is the strict lookup used on the
/// checkout path; `get_or_default` keeps the older "fall back to the
/// default plan" behavior for display surfaces that render a plan no
/// matter what the query string says.
pub struct PlanCatalog {
    plans: Vec<Plan>,
    default_index: usize,
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanCatalog {
    /// The four plans offered at launch
    pub fn new() -> Self {
        let plans = vec![
            Plan {
                id: PlanId::new("mobile"),
                name: "Mobile".into(),
                description: "Watch on your phone or tablet".into(),
                price_monthly: dec!(4.99),
                trial_days: 7,
                device_limit: 1,
                resolution: "720p".into(),
                features: vec![
                    "Unlimited event streaming".into(),
                    "Watch on 1 device".into(),
                    "720p video quality".into(),
                    "Download on 1 device".into(),
                ],
                popular: false,
            },
            Plan {
                id: PlanId::new("standard"),
                name: "Standard".into(),
                description: "Great for personal viewing".into(),
                price_monthly: dec!(9.99),
                trial_days: 7,
                device_limit: 2,
                resolution: "1080p".into(),
                features: vec![
                    "Unlimited event streaming".into(),
                    "Watch on 2 devices".into(),
                    "1080p Full HD quality".into(),
                    "Download on 2 devices".into(),
                    "Ad-free experience".into(),
                ],
                popular: true,
            },
            Plan {
                id: PlanId::new("premium"),
                name: "Premium".into(),
                description: "Best for families".into(),
                price_monthly: dec!(14.99),
                trial_days: 7,
                device_limit: 4,
                resolution: "4K+HDR".into(),
                features: vec![
                    "Unlimited event streaming".into(),
                    "Watch on 4 devices".into(),
                    "4K Ultra HD + HDR".into(),
                    "Download on 6 devices".into(),
                    "Ad-free experience".into(),
                    "Spatial audio".into(),
                ],
                popular: false,
            },
            Plan {
                id: PlanId::new("family"),
                name: "Family".into(),
                description: "Share with up to 6 people".into(),
                price_monthly: dec!(22.99),
                trial_days: 7,
                device_limit: 6,
                resolution: "4K+HDR".into(),
                features: vec![
                    "Everything in Premium".into(),
                    "6 individual profiles".into(),
                    "Watch on 6 devices".into(),
                    "Download on 10 devices".into(),
                    "Parental controls".into(),
                    "Group watch parties".into(),
                    "Priority support".into(),
                ],
                popular: false,
            },
        ];

        // "standard" is the designated fallback
        Self {
            plans,
            default_index: 1,
        }
    }

    /// Build a catalog from custom plans
    ///
    /// Fails if `default_id` is not among `plans`.
    pub fn with_plans(plans: Vec<Plan>, default_id: &str) -> Result<Self> {
        let wanted = PlanId::new(default_id);
        let default_index = plans
            .iter()
            .position(|p| p.id == wanted)
            .ok_or_else(|| BillingError::InvalidPlan(default_id.to_string()))?;

        Ok(Self {
            plans,
            default_index,
        })
    }

    /// Strict lookup: unknown ids are an error
    ///
    /// The argument goes through the same normalization as [`PlanId::new`],
    /// so matching is case-insensitive.
    pub fn get(&self, id: &str) -> Result<&Plan> {
        let wanted = PlanId::new(id);
        self.plans
            .iter()
            .find(|p| p.id == wanted)
            .ok_or_else(|| BillingError::InvalidPlan(id.to_string()))
    }

    /// Lenient lookup: unknown ids fall back to the default plan
    ///
    /// Display-only. Checkout goes through [`PlanCatalog::get`] so a typo in
    /// a plan id can never silently charge for the wrong plan.
    pub fn get_or_default(&self, id: &str) -> &Plan {
        self.get(id).unwrap_or_else(|_| self.default_plan())
    }

    /// The designated fallback plan
    pub fn default_plan(&self) -> &Plan {
        &self.plans[self.default_index]
    }

    /// All plans, in display order
    pub fn list(&self) -> &[Plan] {
        &self.plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_plan_resolves_by_id() {
        let catalog = PlanCatalog::new();

        for plan in catalog.list() {
            let found = catalog.get(plan.id.as_str()).unwrap();
            assert_eq!(found.id, plan.id);
        }
    }

    #[test]
    fn test_catalog_order_and_prices() {
        let catalog = PlanCatalog::new();
        let ids: Vec<&str> = catalog.list().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["mobile", "standard", "premium", "family"]);

        assert_eq!(catalog.get("mobile").unwrap().price_monthly, dec!(4.99));
        assert_eq!(catalog.get("standard").unwrap().price_monthly, dec!(9.99));
        assert_eq!(catalog.get("premium").unwrap().price_monthly, dec!(14.99));
        assert_eq!(catalog.get("family").unwrap().price_monthly, dec!(22.99));
    }

    #[test]
    fn test_unknown_plan_is_an_error() {
        let catalog = PlanCatalog::new();
        let result = catalog.get("quantum");
        assert!(matches!(result, Err(BillingError::InvalidPlan(id)) if id == "quantum"));
    }

    #[test]
    fn test_lenient_lookup_falls_back_to_standard() {
        let catalog = PlanCatalog::new();
        assert_eq!(catalog.get_or_default("quantum").id.as_str(), "standard");
        assert_eq!(catalog.get_or_default("premium").id.as_str(), "premium");
    }

    #[test]
    fn test_lookup_matches_any_casing() {
        // Ids normalize to lowercase, and lookups apply the same rule
        let catalog = PlanCatalog::new();
        assert_eq!(catalog.get("Standard").unwrap().id.as_str(), "standard");
        assert_eq!(catalog.get("PREMIUM").unwrap().id.as_str(), "premium");
        assert_eq!(catalog.get_or_default("Family").id.as_str(), "family");

        let plans = catalog.list().to_vec();
        assert!(PlanCatalog::with_plans(plans, "Mobile").is_ok());
    }

    #[test]
    fn test_trial_plans_owe_nothing_today() {
        let catalog = PlanCatalog::new();

        for plan in catalog.list() {
            assert!(plan.has_trial());
            assert_eq!(plan.amount_due_today(), Decimal::ZERO);
        }
    }

    #[test]
    fn test_no_trial_charges_full_price() {
        let plan = Plan {
            id: PlanId::new("standard"),
            name: "Standard".into(),
            description: String::new(),
            price_monthly: dec!(9.99),
            trial_days: 0,
            device_limit: 2,
            resolution: "1080p".into(),
            features: Vec::new(),
            popular: false,
        };

        assert!(!plan.has_trial());
        assert_eq!(plan.amount_due_today(), dec!(9.99));
        assert_eq!(plan.billing_description(), "Standard Plan - Monthly");
    }

    #[test]
    fn test_custom_catalog_needs_valid_default() {
        let plans = PlanCatalog::new().list().to_vec();
        assert!(PlanCatalog::with_plans(plans.clone(), "premium").is_ok());
        assert!(PlanCatalog::with_plans(plans, "nonexistent").is_err());
    }
}
