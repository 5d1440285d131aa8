//! Domain types and logic for the MakerSet kit shop.
//!
//! - **Cart**: kit line items, totals and shipping quotes
//! - **Checkout**: stock validation, order submission, saved customer info
//! - **Manual**: build-step parsing, rendering and authoring
//! - **Catalog**: ratings, inventory and visibility payloads
//! - **Content**: templated learning outcomes and progress messages
//!
//! # Example
//!
//! ```
//! use makerset_commerce::prelude::*;
//!
//! let mut cart = CartStore::new();
//! cart.add_or_increment(SetId::new(1), Some(19.9), KitMetadata::named("Night Light"));
//! cart.add_or_increment(SetId::new(1), Some(19.9), KitMetadata::named("Night Light"));
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().amount_cents, 3980);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod content;
pub mod manual;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{CartLineItem, CartStore, KitMetadata, ShippingInfo, ShippingPolicy};

    pub use crate::checkout::{
        Checkout, CheckoutBackend, CheckoutFlow, CheckoutState, CustomerInfo, OrderPayload,
        OrderReceipt, StockCheckRequest, StockValidationReport,
    };

    pub use crate::catalog::{
        AdjustmentType, InventoryAdjustment, InventoryIncome, SetRatingSummary, VisibilityUpdate,
    };

    pub use crate::content::{learning_outcomes, motivation_message, Difficulty};
    pub use crate::manual::{parse_steps, render_manual, BuildStep, StepList};
}
