//! Checkout module.
//!
//! Contains the checkout state machine, customer form, stock validation
//! types, order payloads, and the [`Checkout`] session that ties them to a
//! backend.

mod customer;
mod flow;
mod order;
mod service;
mod stock;

pub use customer::{
    clear_customer_info, load_customer_info, save_customer_info, CustomerInfo, CUSTOMER_INFO_KEY,
};
pub use flow::{CheckoutFlow, CheckoutState};
pub use order::{OrderItemPayload, OrderPayload, OrderReceipt, OrderStatus};
pub use service::{BackendError, Checkout, CheckoutBackend};
pub use stock::{
    InsufficientPart, StockCheckItem, StockCheckRequest, StockValidationReport,
    StockValidationResult,
};
