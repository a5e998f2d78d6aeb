//! Payment method selection and proof-of-payment upload.

use crate::validation::{FieldValue, Validatable};
use serde::{Deserialize, Serialize};

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    /// Pay on delivery or against invoice.
    PayLater,
    /// Pay upfront and attach a transfer screenshot.
    PayNow,
    /// Any value the storefront does not recognise.
    #[serde(other)]
    Unknown,
}

impl PaymentMethod {
    /// Methods a customer can choose.
    pub const ACCEPTED: [PaymentMethod; 2] = [PaymentMethod::PayLater, PaymentMethod::PayNow];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::PayLater => "pay-later",
            PaymentMethod::PayNow => "pay-now",
            PaymentMethod::Unknown => "unknown",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::PayLater => "Pay Later",
            PaymentMethod::PayNow => "Pay Now",
            PaymentMethod::Unknown => "Unknown",
        }
    }

    pub fn requires_screenshot(&self) -> bool {
        matches!(self, PaymentMethod::PayNow)
    }
}

/// Metadata of the uploaded payment screenshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenshotFile {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl ScreenshotFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// Payment details captured on step 3.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentDetails {
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot_file: Option<ScreenshotFile>,
}

impl PaymentDetails {
    pub fn pay_later() -> Self {
        Self {
            payment_method: Some(PaymentMethod::PayLater),
            screenshot_file: None,
        }
    }

    pub fn pay_now(screenshot: Option<ScreenshotFile>) -> Self {
        Self {
            payment_method: Some(PaymentMethod::PayNow),
            screenshot_file: screenshot,
        }
    }

    pub fn requires_screenshot(&self) -> bool {
        self.payment_method
            .map(|m| m.requires_screenshot())
            .unwrap_or(false)
    }
}

impl Validatable for PaymentDetails {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "paymentMethod" => FieldValue::from_optional(self.payment_method.map(|m| m.as_str())),
            "screenshotFile" => self
                .screenshot_file
                .as_ref()
                .map_or(FieldValue::Absent, FieldValue::File),
            _ => FieldValue::Absent,
        }
    }
}
