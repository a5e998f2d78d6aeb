//! Placing and managing orders through the storefront API.

use medsupply_api::{FetchClient, Transport};
use serde::Serialize;
use tracing::{info, warn};

use super::request::{OrderReceipt, OrderRequest};
use super::status::{OrderRole, OrderStatus};
use crate::error::CheckoutError;
use crate::ids::OrderId;
use crate::store::{CheckoutStore, Notifier};

/// Label shown while the order request is in flight.
pub const PLACING_ORDER: &str = "Placing order";

#[derive(Serialize)]
struct StatusUpdate {
    status: OrderStatus,
}

/// Order endpoints bound to one API client.
pub struct OrderService<T> {
    client: FetchClient<T>,
    orders_path: String,
}

impl<T: Transport> OrderService<T> {
    pub fn new(client: FetchClient<T>, orders_path: impl Into<String>) -> Self {
        Self {
            client,
            orders_path: orders_path.into(),
        }
    }

    /// Build a service from the store's API settings.
    pub fn from_config(transport: T, config: &crate::config::CheckoutConfig) -> Self {
        let client = FetchClient::new(transport).with_base_url(config.api.base_url.clone());
        Self::new(client, config.api.orders_path.clone())
    }

    pub fn client(&self) -> &FetchClient<T> {
        &self.client
    }

    /// Submit the store's draft as an order.
    ///
    /// The store's processing flags and error map track the request. Failures
    /// are recorded under the `submit` key and notified before being returned.
    pub fn submit<N: Notifier>(
        &self,
        store: &mut CheckoutStore<N>,
    ) -> Result<OrderReceipt, CheckoutError> {
        if !store.validate_complete_order() {
            return Err(CheckoutError::Incomplete(
                "order is not ready to submit".to_string(),
            ));
        }
        if !store.increment_attempt() {
            return Err(CheckoutError::TooManyAttempts(
                store.state().security.attempt_count,
            ));
        }

        let request = match OrderRequest::from_draft(
            &store.state().order_data,
            store.state().security.session_id.clone(),
            store.config().currency,
        ) {
            Ok(request) => request,
            Err(e) => {
                store.set_error("submit", &e.to_string());
                return Err(e);
            }
        };
        let csrf_token = store.state().security.csrf_token.clone().unwrap_or_default();

        store.start_processing(Some(PLACING_ORDER));
        store.update_progress(50, None);

        let sent = self
            .client
            .post(self.orders_path.as_str())
            .header("X-CSRF-Token", csrf_token)
            .json(&request)
            .and_then(|builder| builder.send_envelope::<OrderReceipt>());

        match sent {
            Ok(receipt) => {
                store.finish_processing();
                info!(
                    order = receipt.reference(),
                    subtotal = %request.subtotal,
                    "order placed"
                );
                store.notifier().success(&format!(
                    "Order {} placed successfully ({})",
                    receipt.reference(),
                    request.subtotal.display()
                ));
                Ok(receipt)
            }
            Err(e) => {
                store.set_error("submit", &e.user_message());
                Err(e.into())
            }
        }
    }

    /// Fetch a single order.
    pub fn fetch_order(&self, id: &OrderId) -> Result<OrderReceipt, CheckoutError> {
        let receipt = self
            .client
            .get(format!("{}/{}", self.orders_path, id))
            .send_envelope()?;
        Ok(receipt)
    }

    /// Move an order to `to`, refusing locally when `role` may not make that change.
    pub fn update_status(
        &self,
        order: &OrderReceipt,
        to: OrderStatus,
        role: OrderRole,
    ) -> Result<OrderReceipt, CheckoutError> {
        if !order.status.can_transition(to, role) {
            warn!(
                order = order.reference(),
                from = order.status.as_str(),
                to = to.as_str(),
                ?role,
                "status change refused"
            );
            return Err(CheckoutError::InvalidStatusTransition {
                from: order.status.as_str().to_string(),
                to: to.as_str().to_string(),
            });
        }

        let updated = self
            .client
            .put(format!("{}/{}/status", self.orders_path, order.id))
            .json(&StatusUpdate { status: to })?
            .send_envelope()?;
        Ok(updated)
    }
}
