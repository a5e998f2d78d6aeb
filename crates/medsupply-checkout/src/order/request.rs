//! Order payloads exchanged with the orders endpoint.

use serde::{Deserialize, Serialize};

use super::status::{OrderStatus, PaymentStatus};
use crate::draft::{OrderDraft, PaymentMethod, ScreenshotFile, ShippingDetails};
use crate::error::CheckoutError;
use crate::ids::{OrderId, ProductId, SessionId};
use crate::money::{Currency, Money};

/// One line of an order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Money,
}

/// Body posted to create an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_screenshot: Option<ScreenshotFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<SessionId>,
    pub subtotal: Money,
}

impl OrderRequest {
    /// Build the submission body from a draft.
    ///
    /// Only checks presence; field validity is the store's job.
    pub fn from_draft(
        draft: &OrderDraft,
        session_id: Option<SessionId>,
        currency: Currency,
    ) -> Result<Self, CheckoutError> {
        if draft.is_cart_empty() {
            return Err(CheckoutError::CartEmpty);
        }
        let shipping = draft
            .shipping
            .clone()
            .ok_or_else(|| CheckoutError::Incomplete("shipping details".to_string()))?;
        let payment = draft
            .payment
            .as_ref()
            .ok_or_else(|| CheckoutError::Incomplete("payment details".to_string()))?;
        let payment_method = payment
            .payment_method
            .ok_or_else(|| CheckoutError::Incomplete("payment method".to_string()))?;

        let items = draft
            .cart
            .iter()
            .map(|line| OrderItemRequest {
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Ok(Self {
            items,
            shipping,
            payment_method,
            payment_screenshot: payment.screenshot_file.clone(),
            session_id,
            subtotal: draft.subtotal(currency)?,
        })
    }
}

/// Order as acknowledged by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    #[serde(alias = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
}

impl OrderReceipt {
    /// Human-facing order reference.
    pub fn reference(&self) -> &str {
        self.order_number.as_deref().unwrap_or(self.id.as_str())
    }
}
