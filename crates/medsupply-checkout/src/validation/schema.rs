//! Shipping and payment schemas.

use once_cell::sync::Lazy;
use regex::Regex;

use super::engine::{validate, ValidationResult};
use super::rule::{Rule, Schema};
use crate::config::{CheckoutConfig, ScreenshotPolicy};
use crate::draft::{PaymentDetails, PaymentMethod, ShippingDetails, PROVINCES};

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}][\p{L} .'-]*$").expect("name pattern compiles"));

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

// Nepali mobile numbers, optionally prefixed with the country code.
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+?977[- ]?)?9[678]\d{8}$").expect("phone pattern compiles"));

/// Schema for step 2.
pub fn shipping_schema() -> Schema<ShippingDetails> {
    Schema::new()
        .field(
            "fullName",
            vec![Rule::Required, Rule::length(2, 100), Rule::pattern(&NAME_PATTERN)],
        )
        .field(
            "email",
            vec![Rule::Required, Rule::max_length(254), Rule::pattern(&EMAIL_PATTERN)],
        )
        .field("phone", vec![Rule::Required, Rule::pattern(&PHONE_PATTERN)])
        .field("address", vec![Rule::Required, Rule::length(10, 200)])
        .field("city", vec![Rule::Required, Rule::length(2, 50)])
        .field("province", vec![Rule::Required, Rule::one_of(PROVINCES)])
        .field("clinicName", vec![Rule::max_length(100)])
}

/// Schema for step 3; screenshot limits come from `policy`.
pub fn payment_schema(policy: &ScreenshotPolicy) -> Schema<PaymentDetails> {
    Schema::new()
        .field(
            "paymentMethod",
            vec![
                Rule::Required,
                Rule::one_of(PaymentMethod::ACCEPTED.iter().map(|m| m.as_str())),
            ],
        )
        .field(
            "screenshotFile",
            vec![
                Rule::RequiredWhen(PaymentDetails::requires_screenshot),
                Rule::File {
                    mime_types: policy.mime_types.clone(),
                    max_bytes: policy.max_bytes,
                },
            ],
        )
}

/// Both checkout schemas, built once per store.
pub struct SchemaSet {
    pub shipping: Schema<ShippingDetails>,
    pub payment: Schema<PaymentDetails>,
}

impl SchemaSet {
    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self {
            shipping: shipping_schema(),
            payment: payment_schema(&config.screenshot),
        }
    }

    pub fn validate_shipping(&self, shipping: &ShippingDetails) -> ValidationResult {
        validate(&self.shipping, shipping)
    }

    pub fn validate_payment(&self, payment: &PaymentDetails) -> ValidationResult {
        validate(&self.payment, payment)
    }
}

impl Default for SchemaSet {
    fn default() -> Self {
        Self::from_config(&CheckoutConfig::default())
    }
}
