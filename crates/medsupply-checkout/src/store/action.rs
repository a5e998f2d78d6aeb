//! Actions accepted by the checkout reducer.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::{ErrorEntry, ValidationErrors, WizardStep};
use crate::draft::OrderDraftPatch;
use crate::ids::SessionId;
use crate::validation::FieldErrors;

/// Entries to merge into `payment_validation.errors`, replacing per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationPatch {
    pub errors: ValidationErrors,
}

impl ValidationPatch {
    /// Field errors for one sub-object.
    pub fn section(name: impl Into<String>, errors: FieldErrors) -> Self {
        let mut patch = Self::default();
        patch.errors.insert(name.into(), ErrorEntry::Fields(errors));
        patch
    }
}

/// Partial update for the security slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SecurityPatch {
    pub session_id: Option<SessionId>,
    pub csrf_token: Option<String>,
}

/// A state transition request.
///
/// Serialized as `{ "type": "SET_STEP", "payload": ... }`. Unrecognised types
/// deserialize to [`CheckoutAction::Unknown`] whatever their payload, and a
/// missing payload means the variant's defaults where every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutAction {
    SetStep(WizardStep),
    UpdateOrderData(OrderDraftPatch),
    SetPaymentValidation(ValidationPatch),
    #[serde(rename_all = "camelCase")]
    StartProcessing { action: Option<String> },
    #[serde(rename_all = "camelCase")]
    UpdateProgress {
        progress: Option<u8>,
        action: Option<String>,
    },
    FinishProcessing,
    #[serde(rename_all = "camelCase")]
    SetError { field: String, message: String },
    /// `at` is the Unix timestamp recorded as `last_attempt`.
    #[serde(rename_all = "camelCase")]
    IncrementAttempt { at: i64 },
    SetSecurityData(SecurityPatch),
    #[serde(rename_all = "camelCase")]
    ResetState { keep_cart: bool },
    Unknown,
}

impl CheckoutAction {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutAction::SetStep(_) => "SET_STEP",
            CheckoutAction::UpdateOrderData(_) => "UPDATE_ORDER_DATA",
            CheckoutAction::SetPaymentValidation(_) => "SET_PAYMENT_VALIDATION",
            CheckoutAction::StartProcessing { .. } => "START_PROCESSING",
            CheckoutAction::UpdateProgress { .. } => "UPDATE_PROGRESS",
            CheckoutAction::FinishProcessing => "FINISH_PROCESSING",
            CheckoutAction::SetError { .. } => "SET_ERROR",
            CheckoutAction::IncrementAttempt { .. } => "INCREMENT_ATTEMPT",
            CheckoutAction::SetSecurityData(_) => "SET_SECURITY_DATA",
            CheckoutAction::ResetState { .. } => "RESET_STATE",
            CheckoutAction::Unknown => "UNKNOWN",
        }
    }
}

/// Wire shape before the `type` is resolved.
#[derive(Deserialize)]
struct RawAction {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ProcessingPayload {
    action: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ProgressPayload {
    progress: Option<u8>,
    action: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorPayload {
    field: String,
    message: String,
}

#[derive(Deserialize)]
struct AttemptPayload {
    at: i64,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct ResetPayload {
    keep_cart: bool,
}

fn required<T: DeserializeOwned>(payload: Option<Value>) -> Result<T, serde_json::Error> {
    match payload {
        Some(value) => serde_json::from_value(value),
        None => Err(de::Error::missing_field("payload")),
    }
}

fn or_default<T: DeserializeOwned + Default>(
    payload: Option<Value>,
) -> Result<T, serde_json::Error> {
    Ok(payload
        .map(serde_json::from_value)
        .transpose()?
        .unwrap_or_default())
}

impl TryFrom<RawAction> for CheckoutAction {
    type Error = serde_json::Error;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        let payload = raw.payload;
        let action = match raw.kind.as_str() {
            "SET_STEP" => CheckoutAction::SetStep(required(payload)?),
            "UPDATE_ORDER_DATA" => CheckoutAction::UpdateOrderData(or_default(payload)?),
            "SET_PAYMENT_VALIDATION" => CheckoutAction::SetPaymentValidation(or_default(payload)?),
            "START_PROCESSING" => {
                let ProcessingPayload { action } = or_default(payload)?;
                CheckoutAction::StartProcessing { action }
            }
            "UPDATE_PROGRESS" => {
                let ProgressPayload { progress, action } = or_default(payload)?;
                CheckoutAction::UpdateProgress { progress, action }
            }
            "FINISH_PROCESSING" => CheckoutAction::FinishProcessing,
            "SET_ERROR" => {
                let ErrorPayload { field, message } = required(payload)?;
                CheckoutAction::SetError { field, message }
            }
            "INCREMENT_ATTEMPT" => {
                let AttemptPayload { at } = required(payload)?;
                CheckoutAction::IncrementAttempt { at }
            }
            "SET_SECURITY_DATA" => CheckoutAction::SetSecurityData(or_default(payload)?),
            "RESET_STATE" => {
                let ResetPayload { keep_cart } = or_default(payload)?;
                CheckoutAction::ResetState { keep_cart }
            }
            _ => CheckoutAction::Unknown,
        };
        Ok(action)
    }
}

impl<'de> Deserialize<'de> for CheckoutAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawAction::deserialize(deserializer)?;
        CheckoutAction::try_from(raw).map_err(de::Error::custom)
    }
}
