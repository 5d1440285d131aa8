//! Shopping cart module.
//!
//! Contains the cart store, its line items, and shipping cost rules.

mod line_item;
mod shipping;
mod store;

pub use line_item::{CartLineItem, KitMetadata};
pub use shipping::{ShippingInfo, ShippingPolicy, ShippingTier};
pub use store::CartStore;
