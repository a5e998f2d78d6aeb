//! Order status and who may change it.

use serde::{Deserialize, Serialize};

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,
    /// Confirmed by an admin.
    Confirmed,
    /// Being packed by the vendor.
    Processing,
    /// Handed to the courier.
    Shipped,
    /// Received by the customer.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check if order can still be cancelled by someone.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Confirmed | OrderStatus::Processing
        )
    }

    /// Statuses `role` may move an order to from this one.
    pub fn transitions_for(&self, role: OrderRole) -> Vec<OrderStatus> {
        use OrderStatus::*;
        match (role, self) {
            (OrderRole::Customer, Pending) => vec![Cancelled],
            (OrderRole::Vendor, Confirmed) => vec![Processing],
            (OrderRole::Vendor, Processing) => vec![Shipped],
            (OrderRole::Admin, Pending) => vec![Confirmed, Cancelled],
            (OrderRole::Admin, Confirmed) => vec![Processing, Cancelled],
            (OrderRole::Admin, Processing) => vec![Shipped, Cancelled],
            (OrderRole::Admin, Shipped) => vec![Delivered],
            _ => Vec::new(),
        }
    }

    pub fn can_transition(&self, to: OrderStatus, role: OrderRole) -> bool {
        self.transitions_for(role).contains(&to)
    }
}

/// Payment status as tracked by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    /// Pay-later orders before settlement.
    #[default]
    Unpaid,
    /// Pay-now screenshot uploaded, awaiting admin check.
    PendingVerification,
    Paid,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Unpaid => "unpaid",
            PaymentStatus::PendingVerification => "pending-verification",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

/// Who is acting on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderRole {
    Customer,
    Vendor,
    Admin,
}
