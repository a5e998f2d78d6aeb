//! Checkout state shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::draft::OrderDraft;
use crate::error::CheckoutError;
use crate::ids::SessionId;
use crate::validation::FieldErrors;

/// Steps in the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    /// Cart review.
    #[default]
    Cart,
    /// Shipping address and contact.
    Shipping,
    /// Payment method and proof.
    Payment,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Cart => "cart",
            WizardStep::Shipping => "shipping",
            WizardStep::Payment => "payment",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::Cart => "Review Cart",
            WizardStep::Shipping => "Shipping",
            WizardStep::Payment => "Payment",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Cart => 1,
            WizardStep::Shipping => 2,
            WizardStep::Payment => 3,
        }
    }

    pub fn from_number(number: u8) -> Result<Self, CheckoutError> {
        match number {
            1 => Ok(WizardStep::Cart),
            2 => Ok(WizardStep::Shipping),
            3 => Ok(WizardStep::Payment),
            other => Err(CheckoutError::InvalidStep(other)),
        }
    }

    /// `None` on the last step.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Cart => Some(WizardStep::Shipping),
            WizardStep::Shipping => Some(WizardStep::Payment),
            WizardStep::Payment => None,
        }
    }

    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Cart => None,
            WizardStep::Shipping => Some(WizardStep::Cart),
            WizardStep::Payment => Some(WizardStep::Shipping),
        }
    }

    pub fn is_last(&self) -> bool {
        self.next().is_none()
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = CheckoutError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        WizardStep::from_number(number)
    }
}

/// An entry in the displayed error map.
///
/// Sub-object validation stores its field map under `"shipping"` / `"payment"`;
/// `set_error` stores a single message under an arbitrary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    Fields(FieldErrors),
    Message(String),
}

impl ErrorEntry {
    pub fn is_empty(&self) -> bool {
        match self {
            ErrorEntry::Fields(fields) => fields.is_empty(),
            ErrorEntry::Message(message) => message.is_empty(),
        }
    }
}

pub type ValidationErrors = BTreeMap<String, ErrorEntry>;

/// Errors for display. Validity itself is always derived from the live draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentValidation {
    pub errors: ValidationErrors,
}

impl PaymentValidation {
    /// Field errors recorded for a sub-object (`"shipping"` or `"payment"`).
    pub fn section(&self, name: &str) -> Option<&FieldErrors> {
        match self.errors.get(name) {
            Some(ErrorEntry::Fields(fields)) => Some(fields),
            _ => None,
        }
    }

    /// Message recorded by `set_error` under `field`.
    pub fn message(&self, field: &str) -> Option<&str> {
        match self.errors.get(field) {
            Some(ErrorEntry::Message(message)) => Some(message),
            _ => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.errors.values().any(|entry| !entry.is_empty())
    }
}

/// Advisory progress of an external async call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingState {
    pub is_processing: bool,
    /// 0..=100.
    pub progress: u8,
    pub current_action: Option<String>,
}

/// Client-side speed bump; carries no authority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityState {
    pub session_id: Option<SessionId>,
    pub csrf_token: Option<String>,
    pub attempt_count: u32,
    /// Unix timestamp of the last attempt.
    pub last_attempt: Option<i64>,
}

/// The whole checkout state snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutState {
    pub current_step: WizardStep,
    pub order_data: OrderDraft,
    pub payment_validation: PaymentValidation,
    pub processing: ProcessingState,
    pub security: SecurityState,
}
