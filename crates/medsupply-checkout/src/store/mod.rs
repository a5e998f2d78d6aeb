//! Checkout state store.
//!
//! A [`CheckoutStore`] owns one [`CheckoutState`] and advances it through the pure
//! [`reduce`] function. Action creators on the store validate input before
//! dispatching; selectors derive step gating from the live draft.

mod action;
mod checkout;
mod notify;
mod reducer;
mod selectors;
mod state;

pub use action::{CheckoutAction, SecurityPatch, ValidationPatch};
pub use checkout::{CheckoutStore, TOO_MANY_ATTEMPTS};
pub use notify::{Notification, NotificationKind, NotificationQueue, Notifier, TracingNotifier};
pub use reducer::reduce;
pub use selectors::{CART_EMPTY_MESSAGE, PAYMENT_INCOMPLETE_MESSAGE, SHIPPING_INCOMPLETE_MESSAGE};
pub use state::{
    CheckoutState, ErrorEntry, PaymentValidation, ProcessingState, SecurityState,
    ValidationErrors, WizardStep,
};
