//! Step gating derived from the live draft.
//!
//! These re-run validation on every call instead of reading the stored error
//! map, so gating always reflects the latest draft.

use super::checkout::CheckoutStore;
use super::notify::Notifier;
use super::state::WizardStep;

pub const CART_EMPTY_MESSAGE: &str = "Your cart is empty";
pub const SHIPPING_INCOMPLETE_MESSAGE: &str = "Please complete your shipping information";
pub const PAYMENT_INCOMPLETE_MESSAGE: &str = "Please complete your payment information";

impl<N: Notifier> CheckoutStore<N> {
    fn cart_ready(&self) -> bool {
        !self.state.order_data.is_cart_empty()
    }

    fn shipping_ready(&self) -> bool {
        self.state
            .order_data
            .shipping
            .as_ref()
            .map(|shipping| self.schemas.validate_shipping(shipping).is_valid)
            .unwrap_or(false)
    }

    fn payment_ready(&self) -> bool {
        self.state
            .order_data
            .payment
            .as_ref()
            .map(|payment| self.schemas.validate_payment(payment).is_valid)
            .unwrap_or(false)
    }

    /// Whether the data owned by `step` is currently complete and valid.
    pub fn is_step_valid(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::Cart => self.cart_ready(),
            WizardStep::Shipping => self.shipping_ready(),
            WizardStep::Payment => self.payment_ready(),
        }
    }

    /// Whether "Next" is enabled on `step`. Always `false` on the last step:
    /// the order is submitted, not advanced.
    pub fn can_proceed_to_next_step(&self, step: WizardStep) -> bool {
        if step.is_last() {
            return false;
        }
        self.is_step_valid(step)
    }

    /// Check cart, shipping and payment in order, notifying only the first problem.
    pub fn validate_complete_order(&self) -> bool {
        let failure = if !self.cart_ready() {
            Some(CART_EMPTY_MESSAGE)
        } else if !self.shipping_ready() {
            Some(SHIPPING_INCOMPLETE_MESSAGE)
        } else if !self.payment_ready() {
            Some(PAYMENT_INCOMPLETE_MESSAGE)
        } else {
            None
        };

        match failure {
            Some(message) => {
                tracing::warn!(message, "order incomplete");
                self.notifier.error(message);
                false
            }
            None => true,
        }
    }
}
