//! Payment Method
//!
//! Card details captured by the checkout form. They live in memory for the
//! duration of one checkout session and are dropped after submission; the
//! only artifact that may outlive them is the redacted descriptor shown on
//! transaction records. Deliberately not `Serialize`, and `Debug` redacts
//! the card number and CVV so they cannot leak through logs.

use crate::error::{BillingError, Result};

/// Card brand, inferred from the leading digit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    /// Anything we don't recognize
    Unknown,
}

impl CardBrand {
    /// Detect from a card number (spaces and dashes ignored)
    pub fn detect(card_number: &str) -> Self {
        let first = card_number.chars().find(char::is_ascii_digit);
        match first {
            Some('4') => CardBrand::Visa,
            Some('5') => CardBrand::Mastercard,
            Some('3') => CardBrand::Amex,
            _ => CardBrand::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "Amex",
            CardBrand::Unknown => "Card",
        }
    }
}

/// Card details for one checkout attempt
#[derive(Clone)]
pub struct PaymentMethod {
    /// Name on card
    pub holder_name: String,

    /// Card number as typed (may contain spaces)
    pub card_number: String,

    /// Expiry, MM/YY
    pub expiry: String,

    /// Card verification value
    pub cvv: String,
}

impl PaymentMethod {
    pub fn new(
        holder_name: impl Into<String>,
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            holder_name: holder_name.into(),
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Placeholder for sessions still waiting on card entry (retry flow)
    pub fn empty() -> Self {
        Self::new("", "", "", "")
    }

    /// Shape check: every field must be present
    ///
    /// This mirrors the checkout form's `required` fields. No issuer-side
    /// validation happens here - a well-formed but bad card surfaces later
    /// as a declined authorization.
    pub fn validate(&self) -> Result<()> {
        if self.holder_name.trim().is_empty() {
            return Err(BillingError::InvalidPaymentMethod(
                "name on card is required".into(),
            ));
        }
        if self.card_number.trim().is_empty() {
            return Err(BillingError::InvalidPaymentMethod(
                "card number is required".into(),
            ));
        }
        if self.expiry.trim().is_empty() {
            return Err(BillingError::InvalidPaymentMethod(
                "expiry date is required".into(),
            ));
        }
        if self.cvv.trim().is_empty() {
            return Err(BillingError::InvalidPaymentMethod("CVV is required".into()));
        }
        Ok(())
    }

    /// Whether all required fields are filled in
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Display-safe summary, e.g. "Visa •••• 4242"
    ///
    /// Brand plus last four digits - the only card-derived value allowed
    /// onto transaction records.
    pub fn descriptor(&self) -> String {
        let digits: String = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let last_four = &digits[digits.len().saturating_sub(4)..];

        format!("{} •••• {}", CardBrand::detect(&self.card_number).as_str(), last_four)
    }
}

impl std::fmt::Debug for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentMethod")
            .field("holder_name", &self.holder_name)
            .field("card_number", &"<redacted>")
            .field("expiry", &self.expiry)
            .field("cvv", &"<redacted>")
            .finish()
    }
}
