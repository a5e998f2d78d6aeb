//! The checkout store and its action creators.

use tracing::{debug, info, warn};

use super::action::{CheckoutAction, SecurityPatch, ValidationPatch};
use super::notify::{Notifier, TracingNotifier};
use super::reducer::reduce;
use super::state::{CheckoutState, WizardStep};
use crate::config::CheckoutConfig;
use crate::draft::{OrderDraftPatch, PaymentDetails, ShippingDetails};
use crate::ids::{random_token, SessionId};
use crate::validation::{SchemaSet, ValidationResult};

/// Shown when `increment_attempt` trips the threshold.
pub const TOO_MANY_ATTEMPTS: &str = "Too many attempts. Please wait a moment before trying again.";

/// Owns the checkout state for one checkout view.
///
/// All mutation goes through [`dispatch`](Self::dispatch); the action creators
/// run validation first and fold the result into the dispatched actions.
pub struct CheckoutStore<N = TracingNotifier> {
    pub(super) state: CheckoutState,
    pub(super) schemas: SchemaSet,
    pub(super) config: CheckoutConfig,
    pub(super) notifier: N,
}

impl CheckoutStore<TracingNotifier> {
    /// Create a store that reports notifications through `tracing`.
    pub fn new(config: CheckoutConfig) -> Self {
        Self::with_notifier(config, TracingNotifier)
    }
}

impl Default for CheckoutStore<TracingNotifier> {
    fn default() -> Self {
        Self::new(CheckoutConfig::default())
    }
}

impl<N: Notifier> CheckoutStore<N> {
    /// Create a store with a fresh session.
    pub fn with_notifier(config: CheckoutConfig, notifier: N) -> Self {
        let mut store = Self {
            state: CheckoutState::default(),
            schemas: SchemaSet::from_config(&config),
            config,
            notifier,
        };
        store.generate_session_id();
        store
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    /// Apply an action through the reducer.
    pub fn dispatch(&mut self, action: CheckoutAction) {
        debug!(action = action.kind(), "checkout dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    pub fn set_step(&mut self, step: WizardStep) {
        self.dispatch(CheckoutAction::SetStep(step));
    }

    pub fn update_order_data(&mut self, patch: OrderDraftPatch) {
        self.dispatch(CheckoutAction::UpdateOrderData(patch));
    }

    pub fn validate_shipping_data(&self, shipping: &ShippingDetails) -> ValidationResult {
        self.schemas.validate_shipping(shipping)
    }

    pub fn validate_payment_data(&self, payment: &PaymentDetails) -> ValidationResult {
        self.schemas.validate_payment(payment)
    }

    /// Store the shipping details and their field errors; returns validity.
    pub fn set_shipping_data(&mut self, shipping: ShippingDetails) -> bool {
        let result = self.validate_shipping_data(&shipping);
        if !result.is_valid {
            warn!(fields = ?result.errors.keys().collect::<Vec<_>>(), "shipping details invalid");
        }
        self.update_order_data(OrderDraftPatch::shipping(shipping));
        self.dispatch(CheckoutAction::SetPaymentValidation(ValidationPatch::section(
            "shipping",
            result.errors,
        )));
        result.is_valid
    }

    /// Store the payment details and their field errors; returns validity.
    pub fn set_payment_data(&mut self, payment: PaymentDetails) -> bool {
        let result = self.validate_payment_data(&payment);
        if !result.is_valid {
            warn!(fields = ?result.errors.keys().collect::<Vec<_>>(), "payment details invalid");
        }
        self.update_order_data(OrderDraftPatch::payment(payment));
        self.dispatch(CheckoutAction::SetPaymentValidation(ValidationPatch::section(
            "payment",
            result.errors,
        )));
        result.is_valid
    }

    pub fn start_processing(&mut self, label: Option<&str>) {
        info!(action = label.unwrap_or(""), "checkout processing started");
        self.dispatch(CheckoutAction::StartProcessing {
            action: label.map(str::to_string),
        });
    }

    /// `label` of `None` keeps the current label.
    pub fn update_progress(&mut self, percent: u8, label: Option<&str>) {
        self.dispatch(CheckoutAction::UpdateProgress {
            progress: Some(percent),
            action: label.map(str::to_string),
        });
    }

    pub fn finish_processing(&mut self) {
        info!("checkout processing finished");
        self.dispatch(CheckoutAction::FinishProcessing);
    }

    /// Record an error under `field`, stop processing, and notify the shopper.
    pub fn set_error(&mut self, field: &str, message: &str) {
        warn!(field, message, "checkout error");
        self.dispatch(CheckoutAction::SetError {
            field: field.to_string(),
            message: message.to_string(),
        });
        self.notifier.error(message);
    }

    /// Back to the initial state under a new session.
    pub fn reset_state(&mut self, keep_cart: bool) {
        self.dispatch(CheckoutAction::ResetState { keep_cart });
        self.generate_session_id();
    }

    /// Count an attempt. Returns `false` once the configured threshold had
    /// already been reached; the count still increases and nothing is blocked.
    pub fn increment_attempt(&mut self) -> bool {
        let over_limit = self.state.security.attempt_count >= self.config.max_attempts;
        self.dispatch(CheckoutAction::IncrementAttempt {
            at: current_timestamp(),
        });
        if over_limit {
            warn!(
                attempts = self.state.security.attempt_count,
                limit = self.config.max_attempts,
                "checkout attempt limit exceeded"
            );
            self.notifier.error(TOO_MANY_ATTEMPTS);
            return false;
        }
        true
    }

    /// Start a new session id and CSRF token; returns the session id.
    pub fn generate_session_id(&mut self) -> String {
        let session_id = SessionId::generate();
        self.dispatch(CheckoutAction::SetSecurityData(SecurityPatch {
            session_id: Some(session_id.clone()),
            csrf_token: Some(random_token(32)),
        }));
        session_id.into_inner()
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{CartLine, ScreenshotFile};
    use crate::ids::ProductId;
    use crate::money::{Currency, Money};
    use crate::store::notify::NotificationQueue;

    fn store() -> CheckoutStore<NotificationQueue> {
        CheckoutStore::with_notifier(CheckoutConfig::default(), NotificationQueue::new())
    }

    fn valid_shipping() -> ShippingDetails {
        ShippingDetails {
            full_name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "9800000000".to_string(),
            address: "1234 Long Enough Address".to_string(),
            city: "Kathmandu".to_string(),
            province: "Bagmati".to_string(),
            clinic_name: None,
        }
    }

    #[test]
    fn test_new_store_has_session() {
        let store = store();
        let security = &store.state().security;
        assert!(security.session_id.is_some());
        assert!(security.csrf_token.is_some());
        assert_eq!(security.attempt_count, 0);
    }

    #[test]
    fn test_set_shipping_data_records_errors() {
        let mut store = store();
        let mut shipping = valid_shipping();
        shipping.city.clear();

        assert!(!store.set_shipping_data(shipping.clone()));
        assert_eq!(store.state().order_data.shipping, Some(shipping));
        let errors = store.state().payment_validation.section("shipping").unwrap();
        assert_eq!(errors["city"], "city is required");

        assert!(store.set_shipping_data(valid_shipping()));
        assert!(store
            .state()
            .payment_validation
            .section("shipping")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_set_shipping_data_idempotent() {
        let mut once = store();
        once.set_shipping_data(valid_shipping());

        let mut twice = store();
        twice.set_shipping_data(valid_shipping());
        let after_first = twice.state().clone();
        twice.set_shipping_data(valid_shipping());

        assert_eq!(twice.state(), &after_first);
        assert_eq!(once.state().order_data, twice.state().order_data);
        assert_eq!(once.state().payment_validation, twice.state().payment_validation);
    }

    #[test]
    fn test_set_payment_data() {
        let mut store = store();
        assert!(!store.set_payment_data(PaymentDetails::pay_now(None)));
        assert!(store.set_payment_data(PaymentDetails::pay_now(Some(ScreenshotFile::new(
            "proof.png",
            "image/png",
            1024,
        )))));
    }

    #[test]
    fn test_set_error_notifies() {
        let mut store = store();
        store.start_processing(Some("Placing order"));
        store.set_error("submit", "Payment gateway timeout");

        assert!(!store.state().processing.is_processing);
        assert_eq!(
            store.state().payment_validation.message("submit"),
            Some("Payment gateway timeout")
        );
        assert_eq!(
            store.notifier().errors(),
            vec!["Payment gateway timeout".to_string()]
        );
    }

    #[test]
    fn test_increment_attempt_threshold() {
        let mut store = store();
        assert!(store.increment_attempt());
        assert!(store.increment_attempt());
        assert!(store.increment_attempt());
        assert!(!store.increment_attempt());
        assert_eq!(store.state().security.attempt_count, 4);
        assert!(store.state().security.last_attempt.is_some());
        assert_eq!(store.notifier().errors(), vec![TOO_MANY_ATTEMPTS.to_string()]);
    }

    #[test]
    fn test_reset_state_rotates_session() {
        let mut store = store();
        let before = store.state().security.session_id.clone();
        store.update_order_data(OrderDraftPatch::cart(vec![CartLine::new(
            ProductId::new("p1"),
            "Gauze",
            3,
            Money::new(1200, Currency::NPR),
        )]));
        store.increment_attempt();
        store.reset_state(true);

        assert_eq!(store.state().order_data.cart.len(), 1);
        assert_eq!(store.state().security.attempt_count, 0);
        assert!(store.state().security.session_id.is_some());
        assert_ne!(store.state().security.session_id, before);
    }

    #[test]
    fn test_generate_session_id_returns_stored_id() {
        let mut store = store();
        let id = store.generate_session_id();
        assert_eq!(
            store.state().security.session_id.as_ref().map(|s| s.as_str()),
            Some(id.as_str())
        );
    }

    #[test]
    fn test_update_progress_keeps_label() {
        let mut store = store();
        store.start_processing(Some("Uploading proof"));
        store.update_progress(45, None);
        assert_eq!(store.state().processing.progress, 45);
        assert_eq!(
            store.state().processing.current_action.as_deref(),
            Some("Uploading proof")
        );
        store.finish_processing();
        assert_eq!(store.state().processing.progress, 100);
    }
}
