//! End-to-end checkout scenarios against the public API.

use std::cell::RefCell;
use std::rc::Rc;

use medsupply_api::{ApiEnvelope, FetchClient, FetchError, RequestBuilder, Response, Transport};
use medsupply_checkout::order::{OrderReceipt, OrderService, OrderStatus, PaymentStatus};
use medsupply_checkout::prelude::*;
use medsupply_checkout::store::{NotificationKind, TOO_MANY_ATTEMPTS};
use once_cell::sync::Lazy;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_env_filter("medsupply_checkout=debug,medsupply_api=debug")
        .with_test_writer()
        .try_init()
        .ok();
});

fn setup_tracing() {
    Lazy::force(&TRACING_INIT);
}

fn store() -> CheckoutStore<Rc<NotificationQueue>> {
    setup_tracing();
    CheckoutStore::with_notifier(CheckoutConfig::default(), Rc::new(NotificationQueue::new()))
}

fn gloves() -> CartLine {
    CartLine::new(
        ProductId::new("p-gloves"),
        "Nitrile Gloves (100)",
        2,
        Money::new(90000, Currency::NPR),
    )
}

fn valid_shipping() -> ShippingDetails {
    ShippingDetails {
        full_name: "Sita Sharma".to_string(),
        email: "sita@clinic.np".to_string(),
        phone: "+977-9812345678".to_string(),
        address: "Ward 4, Baneshwor Height".to_string(),
        city: "Kathmandu".to_string(),
        province: "Bagmati".to_string(),
        clinic_name: Some("Baneshwor Health Post".to_string()),
    }
}

#[test]
fn test_unknown_action_leaves_state_untouched() {
    let mut store = store();
    store.update_order_data(OrderDraftPatch::cart(vec![gloves()]));
    let before = store.state().clone();

    let action: CheckoutAction =
        serde_json::from_str(r#"{"type":"APPLY_COUPON","payload":{"code":"X"}}"#).unwrap();
    store.dispatch(action);

    assert_eq!(store.state(), &before);
}

#[test]
fn test_reset_state_cart_handling() {
    let mut store = store();
    store.update_order_data(OrderDraftPatch::cart(vec![gloves()]));
    store.set_shipping_data(valid_shipping());

    store.reset_state(true);
    assert_eq!(store.state().order_data.cart, vec![gloves()]);
    assert!(store.state().order_data.shipping.is_none());

    store.reset_state(false);
    assert!(store.state().order_data.cart.is_empty());
}

#[test]
fn test_missing_full_name() {
    let store = store();
    let mut shipping = valid_shipping();
    shipping.full_name.clear();

    let result = store.validate_shipping_data(&shipping);
    assert!(!result.is_valid);
    assert_eq!(result.error("fullName"), Some("fullName is required"));
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_screenshot_required_only_for_pay_now() {
    let store = store();

    let result = store.validate_payment_data(&PaymentDetails::pay_now(None));
    assert!(!result.is_valid);
    assert_eq!(
        result.error("screenshotFile"),
        Some("screenshotFile is required for this payment method")
    );

    assert!(store.validate_payment_data(&PaymentDetails::pay_later()).is_valid);
}

#[test]
fn test_set_shipping_data_twice_equals_once() {
    let mut once = store();
    once.set_shipping_data(valid_shipping());

    let mut twice = store();
    twice.set_shipping_data(valid_shipping());
    twice.set_shipping_data(valid_shipping());

    assert_eq!(once.state().order_data, twice.state().order_data);
    assert_eq!(once.state().payment_validation, twice.state().payment_validation);
}

#[test]
fn test_happy_path_through_shipping() {
    let mut store = store();
    store.update_order_data(OrderDraftPatch::cart(vec![gloves()]));
    assert!(store.can_proceed_to_next_step(WizardStep::Cart));

    store.set_step(WizardStep::Shipping);
    assert_eq!(store.current_step(), WizardStep::Shipping);

    assert!(store.set_shipping_data(valid_shipping()));
    assert!(store.is_step_valid(WizardStep::Shipping));
    assert!(store.can_proceed_to_next_step(WizardStep::Shipping));
}

#[test]
fn test_oversized_screenshot() {
    let store = store();
    let proof = ScreenshotFile::new("proof.png", "image/png", 6 * 1024 * 1024);

    let result = store.validate_payment_data(&PaymentDetails::pay_now(Some(proof)));
    assert!(!result.is_valid);
    assert!(result.error("screenshotFile").unwrap().contains("5MB"));
}

#[test]
fn test_fourth_attempt_is_flagged() {
    let mut store = store();
    let results: Vec<bool> = (0..4).map(|_| store.increment_attempt()).collect();

    assert_eq!(results, vec![true, true, true, false]);
    assert_eq!(store.state().security.attempt_count, 4);
    assert_eq!(store.notifier().errors(), vec![TOO_MANY_ATTEMPTS.to_string()]);

    store.set_step(WizardStep::Payment);
    assert_eq!(store.current_step(), WizardStep::Payment);
}

#[test]
fn test_payment_step_never_advances() {
    let mut store = store();
    assert!(!store.can_proceed_to_next_step(WizardStep::Payment));

    store.update_order_data(OrderDraftPatch::cart(vec![gloves()]));
    store.set_shipping_data(valid_shipping());
    store.set_payment_data(PaymentDetails::pay_later());
    assert!(store.is_step_valid(WizardStep::Payment));
    assert!(!store.can_proceed_to_next_step(WizardStep::Payment));
}

struct ScriptedApi {
    replies: RefCell<Vec<Response>>,
    requests: RefCell<Vec<RequestBuilder>>,
}

impl ScriptedApi {
    fn new(replies: Vec<Response>) -> Self {
        Self {
            replies: RefCell::new(replies),
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for ScriptedApi {
    fn send(&self, request: &RequestBuilder) -> Result<Response, FetchError> {
        self.requests.borrow_mut().push(request.clone());
        let mut replies = self.replies.borrow_mut();
        if replies.is_empty() {
            return Err(FetchError::RequestError("connection refused".to_string()));
        }
        Ok(replies.remove(0))
    }
}

fn placed_receipt() -> Response {
    Response::json_body(
        201,
        &ApiEnvelope::ok(OrderReceipt {
            id: OrderId::new("665f1c"),
            order_number: Some("MS-2024-0042".to_string()),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::PendingVerification,
        }),
    )
    .unwrap()
}

fn ready_store() -> CheckoutStore<Rc<NotificationQueue>> {
    let mut store = store();
    store.update_order_data(OrderDraftPatch::cart(vec![gloves()]));
    store.set_shipping_data(valid_shipping());
    store.set_payment_data(PaymentDetails::pay_now(Some(ScreenshotFile::new(
        "esewa.jpg",
        "image/jpeg",
        240_000,
    ))));
    store
}

#[test]
fn test_submit_order_posts_draft() {
    let mut config = CheckoutConfig::default();
    config.api.base_url = "https://api.medsupply.test".to_string();
    let service = OrderService::from_config(ScriptedApi::new(vec![placed_receipt()]), &config);
    let mut store = ready_store();

    let receipt = service.submit(&mut store).unwrap();
    assert_eq!(receipt.reference(), "MS-2024-0042");
    assert!(!store.state().processing.is_processing);

    let requests = service.client().transport().requests.borrow();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url(), "https://api.medsupply.test/orders");

    let body: serde_json::Value = serde_json::from_slice(requests[0].body().unwrap()).unwrap();
    assert_eq!(body["paymentMethod"], "pay-now");
    assert_eq!(body["paymentScreenshot"]["type"], "image/jpeg");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["subtotal"]["amount_minor"], 180000);

    let notes = store.notifier().drain();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert!(notes[0].message.contains("MS-2024-0042"));
    assert!(notes[0].message.contains("Rs. 1800.00"));
}

#[test]
fn test_submit_order_transport_failure() {
    let service = OrderService::new(FetchClient::new(ScriptedApi::new(Vec::new())), "/orders");
    let mut store = ready_store();
    store.start_processing(Some("Uploading proof"));

    let err = service.submit(&mut store).unwrap_err();
    assert!(matches!(err, CheckoutError::Api(FetchError::RequestError(_))));
    assert!(!store.state().processing.is_processing);
    assert!(store.state().payment_validation.message("submit").is_some());
    assert_eq!(store.notifier().errors().len(), 1);
}

#[test]
fn test_submit_refused_after_attempt_limit() {
    let service = OrderService::new(
        FetchClient::new(ScriptedApi::new(vec![placed_receipt()])),
        "/orders",
    );
    let mut store = ready_store();
    for _ in 0..3 {
        store.increment_attempt();
    }

    let err = service.submit(&mut store).unwrap_err();
    assert!(matches!(err, CheckoutError::TooManyAttempts(4)));
    assert!(service.client().transport().requests.borrow().is_empty());
}
