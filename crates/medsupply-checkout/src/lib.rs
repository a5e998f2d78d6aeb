//! Checkout state and validation core for the MedSupply storefront.
//!
//! This crate owns the order draft a shopper builds across the three-step
//! checkout wizard:
//!
//! - **Store**: `CheckoutStore` holds the wizard state, advances it through the
//!   pure `reduce` function, and derives step gating from the live draft
//! - **Validation**: declarative field schemas for shipping and payment details
//! - **Order**: turning a complete draft into an order request and tracking status
//! - **Catalog**: category tree helpers for the admin screens
//!
//! # Example
//!
//! ```rust,ignore
//! use medsupply_checkout::prelude::*;
//!
//! let mut store = CheckoutStore::new(CheckoutConfig::default());
//! store.update_order_data(OrderDraftPatch::cart(vec![CartLine::new(
//!     ProductId::new("p1"),
//!     "Nitrile Gloves",
//!     2,
//!     Money::new(90000, Currency::NPR),
//! )]));
//!
//! if store.can_proceed_to_next_step(WizardStep::Cart) {
//!     store.set_step(WizardStep::Shipping);
//! }
//! ```

pub mod config;
pub mod error;
pub mod ids;
pub mod money;

pub mod catalog;
pub mod draft;
pub mod order;
pub mod store;
pub mod validation;

pub use config::CheckoutConfig;
pub use error::CheckoutError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ApiConfig, CheckoutConfig, ScreenshotPolicy};
    pub use crate::error::CheckoutError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Draft
    pub use crate::draft::{
        CartLine, OrderDraft, OrderDraftPatch, PaymentDetails, PaymentMethod, ScreenshotFile,
        ShippingDetails,
    };

    // Store
    pub use crate::store::{
        reduce, CheckoutAction, CheckoutState, CheckoutStore, Notifier, NotificationQueue,
        TracingNotifier, WizardStep,
    };

    // Validation
    pub use crate::validation::{validate, Rule, Schema, SchemaSet, ValidationResult};

    // Order
    pub use crate::order::{OrderReceipt, OrderRequest, OrderRole, OrderService, OrderStatus};

    // Catalog
    pub use crate::catalog::{build_tree, Category, CategoryNode};
}
