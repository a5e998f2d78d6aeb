//! Order submission and lifecycle.

mod request;
mod status;
mod submit;

pub use request::{OrderItemRequest, OrderReceipt, OrderRequest};
pub use status::{OrderRole, OrderStatus, PaymentStatus};
pub use submit::{OrderService, PLACING_ORDER};
