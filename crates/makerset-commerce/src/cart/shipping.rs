//! Shipping cost rules.
//!
//! The actual tiers are a business decision, so everything here is driven
//! by a [`ShippingPolicy`] loaded from configuration.

use crate::cart::CartStore;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Shipping description and cost for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingInfo {
    /// Human-readable description (e.g., "Standard parcel").
    pub description: String,
    /// Shipping cost.
    pub cost: Money,
}

/// A price step keyed on the number of kits in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingTier {
    /// Tier applies once the cart holds at least this many kits.
    pub min_items: i64,
    /// Flat cost as a decimal amount.
    pub cost: f64,
    /// Description shown to the customer.
    pub description: String,
}

/// Configurable shipping rules.
///
/// Keys left out of a config table fall back to the plain base rate: no
/// tiers, no free-shipping threshold and no weight surcharge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingPolicy {
    /// Cost when no tier applies.
    #[serde(default = "default_base_cost")]
    pub base_cost: f64,
    /// Description for the base rate.
    #[serde(default = "default_base_description")]
    pub base_description: String,
    /// Item-count tiers; the highest matching `min_items` wins.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tiers: Vec<ShippingTier>,
    /// Subtotal at or above which shipping is free.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_over: Option<f64>,
    /// Surcharge per started kilogram of total weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_kg: Option<f64>,
}

fn default_base_cost() -> f64 {
    5.90
}

fn default_base_description() -> String {
    "Standard parcel".to_string()
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        Self::flat(default_base_cost(), default_base_description())
    }
}

impl ShippingPolicy {
    /// A policy that always charges the same amount.
    pub fn flat(cost: f64, description: impl Into<String>) -> Self {
        Self {
            base_cost: cost,
            base_description: description.into(),
            tiers: Vec::new(),
            free_over: None,
            per_kg: None,
        }
    }

    /// Compute shipping for a cart. Pure function of the cart contents.
    pub fn quote(&self, cart: &CartStore) -> ShippingInfo {
        let currency = cart.currency();
        if cart.is_empty() {
            return ShippingInfo {
                description: "No items".to_string(),
                cost: Money::zero(currency),
            };
        }

        if let Some(threshold) = self.free_over {
            let threshold = Money::coerce(Some(threshold), currency);
            if cart.total_price().amount_cents >= threshold.amount_cents {
                return ShippingInfo {
                    description: "Free shipping".to_string(),
                    cost: Money::zero(currency),
                };
            }
        }

        let items = cart.total_items();
        let (cost, description) = self
            .tiers
            .iter()
            .filter(|t| items >= t.min_items)
            .max_by_key(|t| t.min_items)
            .map(|t| (t.cost, t.description.as_str()))
            .unwrap_or((self.base_cost, self.base_description.as_str()));

        let mut total = Money::coerce(Some(cost), currency);
        if let Some(per_kg) = self.per_kg {
            let started_kg = cart.total_weight_grams().div_ceil(1000);
            let surcharge = Money::coerce(Some(per_kg), currency)
                .saturating_mul(i64::try_from(started_kg).unwrap_or(i64::MAX));
            total = total.saturating_add(&surcharge);
        }

        ShippingInfo {
            description: description.to_string(),
            cost: total,
        }
    }
}
