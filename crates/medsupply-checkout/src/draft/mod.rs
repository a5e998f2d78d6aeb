//! The order draft assembled across the checkout wizard.

mod cart;
mod payment;
mod shipping;

pub use cart::CartLine;
pub use payment::{PaymentDetails, PaymentMethod, ScreenshotFile};
pub use shipping::{ShippingDetails, PROVINCES};

use crate::error::CheckoutError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Work-in-progress order.
///
/// `shipping` and `payment` stay `None` until their step has been submitted once;
/// later edits replace the whole sub-object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraft {
    pub cart: Vec<CartLine>,
    pub shipping: Option<ShippingDetails>,
    pub payment: Option<PaymentDetails>,
}

impl OrderDraft {
    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Cart subtotal in `currency`.
    pub fn subtotal(&self, currency: Currency) -> Result<Money, CheckoutError> {
        let mut total = Money::zero(currency);
        for line in &self.cart {
            let line_total = line.total()?;
            total = total.try_add(&line_total).ok_or_else(|| {
                if line_total.currency != currency {
                    CheckoutError::CurrencyMismatch {
                        expected: currency.code().to_string(),
                        got: line_total.currency.code().to_string(),
                    }
                } else {
                    CheckoutError::Overflow
                }
            })?;
        }
        Ok(total)
    }

    /// Shallow merge: every field present in the patch replaces the current one.
    pub fn apply(&mut self, patch: OrderDraftPatch) {
        if let Some(cart) = patch.cart {
            self.cart = cart;
        }
        if let Some(shipping) = patch.shipping {
            self.shipping = Some(shipping);
        }
        if let Some(payment) = patch.payment {
            self.payment = Some(payment);
        }
    }
}

/// Partial update for [`OrderDraft`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderDraftPatch {
    pub cart: Option<Vec<CartLine>>,
    pub shipping: Option<ShippingDetails>,
    pub payment: Option<PaymentDetails>,
}

impl OrderDraftPatch {
    pub fn cart(cart: Vec<CartLine>) -> Self {
        Self {
            cart: Some(cart),
            ..Self::default()
        }
    }

    pub fn shipping(shipping: ShippingDetails) -> Self {
        Self {
            shipping: Some(shipping),
            ..Self::default()
        }
    }

    pub fn payment(payment: PaymentDetails) -> Self {
        Self {
            payment: Some(payment),
            ..Self::default()
        }
    }
}
