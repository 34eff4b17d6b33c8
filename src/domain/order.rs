use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Address;

wire_enum! {
    /// Fulfilment state of an order.
    OrderStatus {
        Confirmed => "CONFIRMED" | "confirmed",
        Processing => "PROCESSING" | "processing",
        Shipped => "SHIPPED" | "shipped",
        Delivered => "DELIVERED" | "delivered",
        Cancelled => "CANCELLED" | "cancelled",
        Expired => "EXPIRED" | "expired",
    }
}

wire_enum! {
    PaymentStatus {
        Paid => "PAID" | "paid",
        Pending => "PENDING" | "pending",
        Failed => "FAILED" | "failed",
    }
}

impl OrderStatus {
    /// Terminal orders cannot be cancelled or moved to another status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Expired)
    }
}

/// A customer order as seen by the admin back-office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub customer_info: Option<CustomerInfo>,
    #[serde(default)]
    pub shipping_address: Option<Address>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub vendor_id: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: f64,
}

fn default_quantity() -> u32 {
    1
}

impl Order {
    /// Order number when the backend assigned one, otherwise the raw id.
    pub fn reference(&self) -> &str {
        self.order_number.as_deref().unwrap_or(&self.id)
    }

    pub fn customer_name(&self) -> &str {
        self.customer_info
            .as_ref()
            .and_then(|info| info.name.as_deref().or(info.email.as_deref()))
            .unwrap_or("-")
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// Body of `POST /api/admin-orders/:id/cancel`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelOrder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Body of `PUT /api/admin-orders/:id/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Aggregates from `GET /api/admin-orders/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
}
