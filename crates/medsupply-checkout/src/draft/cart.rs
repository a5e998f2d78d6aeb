//! Cart lines as seen by checkout.

use crate::error::CheckoutError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line in the cart. Owned by the cart collaborator; checkout only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    #[serde(default)]
    pub name: String,
    #[serde(alias = "qty")]
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Money,
}

impl CartLine {
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// `unit_price * quantity`.
    pub fn total(&self) -> Result<Money, CheckoutError> {
        self.unit_price
            .try_multiply(i64::from(self.quantity))
            .ok_or(CheckoutError::Overflow)
    }
}
