//! Order payload and receipt types.

use crate::cart::{CartLineItem, CartStore, ShippingInfo};
use crate::checkout::CustomerInfo;
use crate::ids::{OrderId, ProviderId, SetId};
use serde::{Deserialize, Serialize};

/// Order status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed and processing.
    Confirmed,
    /// Kits being picked and packed.
    Processing,
    /// Order shipped.
    Shipped,
    /// Order delivered.
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

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// One kit in an order payload. Prices are decimal amounts on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItemPayload {
    pub set_id: SetId,
    pub quantity: i64,
    pub unit_price: f64,
    pub provider_id: Option<ProviderId>,
    pub set_name: String,
}

impl From<&CartLineItem> for OrderItemPayload {
    fn from(line: &CartLineItem) -> Self {
        Self {
            set_id: line.set_id,
            quantity: line.quantity,
            unit_price: line.unit_price.to_decimal(),
            provider_id: line.metadata.provider_id,
            set_name: line.metadata.display_name.clone(),
        }
    }
}

/// Body sent to `POST /api/orders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPayload {
    #[serde(flatten)]
    pub customer: CustomerInfo,
    pub items: Vec<OrderItemPayload>,
    /// Sum of the kit lines.
    pub subtotal: f64,
    pub shipping_cost: f64,
    pub shipping_description: String,
    /// Subtotal plus shipping.
    pub total_amount: f64,
    pub currency: String,
}

impl OrderPayload {
    /// Build the payload from a customer form, the cart and its shipping quote.
    pub fn build(customer: &CustomerInfo, cart: &CartStore, shipping: &ShippingInfo) -> Self {
        let subtotal = cart.total_price();
        let total = subtotal.saturating_add(&shipping.cost);
        Self {
            customer: customer.clone(),
            items: cart.lines().iter().map(OrderItemPayload::from).collect(),
            subtotal: subtotal.to_decimal(),
            shipping_cost: shipping.cost.to_decimal(),
            shipping_description: shipping.description.clone(),
            total_amount: total.to_decimal(),
            currency: cart.currency().code().to_string(),
        }
    }

    /// Total number of kits ordered.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// What the backend returns for a created order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderReceipt {
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
}

impl OrderReceipt {
    /// Reference to show the customer.
    pub fn reference(&self) -> String {
        self.order_number
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}
