//! Cart line items.

use crate::ids::{ProviderId, SetId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Descriptive kit data carried alongside a line item.
///
/// None of it is authoritative; the backend re-reads the kit on order
/// creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KitMetadata {
    /// Vendor that lists the kit. `None` for platform-owned kits.
    #[serde(default)]
    pub provider_id: Option<ProviderId>,
    /// Kit name for display.
    #[serde(default)]
    pub display_name: String,
    /// Catalog category (e.g., "electronics").
    #[serde(default)]
    pub category: Option<String>,
    /// Difficulty label (e.g., "beginner").
    #[serde(default)]
    pub difficulty_level: Option<String>,
    /// Shipping weight of one kit in grams.
    #[serde(default)]
    pub weight_grams: Option<u32>,
}

impl KitMetadata {
    /// Metadata with just a display name.
    pub fn named(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Set the owning provider.
    pub fn with_provider(mut self, provider_id: ProviderId) -> Self {
        self.provider_id = Some(provider_id);
        self
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the difficulty label.
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty_level = Some(difficulty.into());
        self
    }

    /// Set the per-kit shipping weight.
    pub fn with_weight_grams(mut self, grams: u32) -> Self {
        self.weight_grams = Some(grams);
        self
    }
}

/// One kit entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLineItem {
    /// Kit being purchased; unique within a cart.
    pub set_id: SetId,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Price of one kit.
    pub unit_price: Money,
    /// Descriptive kit data.
    #[serde(flatten)]
    pub metadata: KitMetadata,
}

impl CartLineItem {
    pub(crate) fn new(set_id: SetId, unit_price: Money, metadata: KitMetadata) -> Self {
        Self {
            set_id,
            quantity: 1,
            unit_price,
            metadata,
        }
    }

    /// Price of the whole line (unit price times quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }

    /// Whether the kit belongs to the platform rather than a provider.
    pub fn is_platform_owned(&self) -> bool {
        self.metadata.provider_id.is_none()
    }

    /// Total shipping weight of the line in grams.
    pub fn weight_grams(&self) -> u64 {
        u64::from(self.metadata.weight_grams.unwrap_or(0))
            .saturating_mul(self.quantity.max(0) as u64)
    }

    /// Name to show in messages, falling back to the set ID.
    pub fn label(&self) -> String {
        if self.metadata.display_name.trim().is_empty() {
            format!("Set #{}", self.set_id)
        } else {
            self.metadata.display_name.clone()
        }
    }
}
