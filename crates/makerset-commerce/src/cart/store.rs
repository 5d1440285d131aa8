//! The cart store.

use crate::cart::{CartLineItem, KitMetadata, ShippingInfo, ShippingPolicy};
use crate::ids::SetId;
use crate::money::{Currency, Money};
use serde::Serialize;
use tracing::debug;

/// An owned shopping cart.
///
/// Holds at most one line per set, in insertion order. Every mutation goes
/// through `&mut self`, so whoever owns the store is its only writer.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CartStore {
    /// Items in the cart.
    items: Vec<CartLineItem>,
    /// Cart currency; all prices are converted into it.
    currency: Currency,
}

impl CartStore {
    /// Create an empty cart in the default currency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cart in a specific currency.
    pub fn with_currency(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// The cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add one unit of a kit.
    ///
    /// Increments the existing line if the set is already in the cart,
    /// otherwise appends a new line with quantity 1. An existing line keeps
    /// its original price and metadata. A missing or invalid price counts
    /// as zero.
    pub fn add_or_increment(
        &mut self,
        set_id: SetId,
        unit_price: Option<f64>,
        metadata: KitMetadata,
    ) -> &CartLineItem {
        let index = match self.position(set_id) {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line.quantity.saturating_add(1);
                debug!(%set_id, quantity = line.quantity, "incremented cart line");
                index
            }
            None => {
                let price = Money::coerce(unit_price, self.currency);
                self.items.push(CartLineItem::new(set_id, price, metadata));
                debug!(%set_id, "added cart line");
                self.items.len() - 1
            }
        };
        &self.items[index]
    }

    /// Set the quantity of a line exactly.
    ///
    /// A quantity of zero or less removes the line. Returns whether a line
    /// was changed or removed.
    pub fn set_quantity(&mut self, set_id: SetId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(set_id);
        }

        match self.items.iter_mut().find(|i| i.set_id == set_id) {
            Some(line) => {
                line.quantity = quantity;
                debug!(%set_id, quantity, "set cart quantity");
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns false if the set was not in the cart.
    pub fn remove(&mut self, set_id: SetId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| i.set_id != set_id);
        let removed = self.items.len() < len_before;
        if removed {
            debug!(%set_id, "removed cart line");
        }
        removed
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("cleared cart");
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of quantity times unit price across all lines.
    pub fn total_price(&self) -> Money {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Money::zero(self.currency), |acc, m| acc.saturating_add(&m))
    }

    /// Total shipping weight in grams.
    pub fn total_weight_grams(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(i.weight_grams()))
    }

    /// Shipping description and cost for the current contents.
    pub fn shipping_info(&self, policy: &ShippingPolicy) -> ShippingInfo {
        policy.quote(self)
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Get the line for a set.
    pub fn get(&self, set_id: SetId) -> Option<&CartLineItem> {
        self.items.iter().find(|i| i.set_id == set_id)
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copy of the current lines, e.g. for building an order payload.
    pub fn snapshot(&self) -> Vec<CartLineItem> {
        self.items.clone()
    }

    fn position(&self, set_id: SetId) -> Option<usize> {
        self.items.iter().position(|i| i.set_id == set_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProviderId;

    fn kit(name: &str) -> KitMetadata {
        KitMetadata::named(name)
    }

    #[test]
    fn test_cart_creation() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = CartStore::new();
        let line = cart.add_or_increment(SetId::new(1), Some(19.99), kit("Robot Arm"));
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price.amount_cents, 1999);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_add_same_set_increments() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn test_increment_keeps_original_price() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        cart.add_or_increment(SetId::new(1), Some(99.0), kit("A"));
        assert_eq!(cart.get(SetId::new(1)).unwrap().unit_price.amount_cents, 1000);
    }

    #[test]
    fn test_set_quantity_is_exact() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        assert!(cart.set_quantity(SetId::new(1), 5));
        assert!(cart.set_quantity(SetId::new(1), 2));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_set_quantity_zero_or_negative_removes() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        cart.add_or_increment(SetId::new(2), Some(10.0), kit("B"));

        assert!(cart.set_quantity(SetId::new(1), 0));
        assert!(cart.set_quantity(SetId::new(2), -4));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_set() {
        let mut cart = CartStore::new();
        assert!(!cart.set_quantity(SetId::new(9), 3));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        assert!(cart.remove(SetId::new(1)));
        assert!(!cart.remove(SetId::new(1)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear_resets_totals() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        cart.add_or_increment(SetId::new(2), Some(5.0), kit("B"));
        cart.clear();
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_total_price() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), Some(10.0), kit("A"));
        cart.add_or_increment(SetId::new(2), Some(20.5), kit("B"));
        cart.set_quantity(SetId::new(1), 3);

        // 3 * 10.00 + 1 * 20.50
        assert_eq!(cart.total_price().amount_cents, 5050);
    }

    #[test]
    fn test_total_price_treats_missing_prices_as_zero() {
        let mut cart = CartStore::new();
        cart.add_or_increment(SetId::new(1), None, kit("A"));
        cart.add_or_increment(SetId::new(2), Some(f64::NAN), kit("B"));
        cart.add_or_increment(SetId::new(3), Some(4.0), kit("C"));
        cart.set_quantity(SetId::new(1), 7);

        assert_eq!(cart.total_price().amount_cents, 400);
        assert_eq!(cart.total_items(), 9);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = CartStore::new();
        for id in [3, 1, 2] {
            cart.add_or_increment(SetId::new(id), Some(1.0), kit("k"));
        }
        cart.add_or_increment(SetId::new(1), Some(1.0), kit("k"));
        let ids: Vec<i64> = cart.lines().iter().map(|l| l.set_id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_provider_association() {
        let mut cart = CartStore::new();
        cart.add_or_increment(
            SetId::new(1),
            Some(1.0),
            kit("Vendor kit").with_provider(ProviderId::new(4)),
        );
        cart.add_or_increment(SetId::new(2), Some(1.0), kit("House kit"));

        assert!(!cart.get(SetId::new(1)).unwrap().is_platform_owned());
        assert!(cart.get(SetId::new(2)).unwrap().is_platform_owned());
    }

    #[test]
    fn test_invariants_hold_over_mixed_operations() {
        let mut cart = CartStore::new();
        // Deterministic pseudo-random operation sequence.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let set_id = SetId::new((seed % 6) as i64);
            match (seed >> 8) % 3 {
                0 => {
                    cart.add_or_increment(set_id, Some(2.5), kit("k"));
                }
                1 => {
                    cart.set_quantity(set_id, ((seed >> 16) % 5) as i64 - 1);
                }
                _ => {
                    cart.remove(set_id);
                }
            }

            let mut seen = std::collections::HashSet::new();
            for line in cart.lines() {
                assert!(seen.insert(line.set_id), "duplicate line for {}", line.set_id);
                assert!(line.quantity > 0);
            }
            assert_eq!(
                cart.total_price().amount_cents,
                cart.lines().iter().map(|l| l.quantity * 250).sum::<i64>()
            );
        }
    }
}
