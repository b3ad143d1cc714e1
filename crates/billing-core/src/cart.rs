//! # Cart
//!
//! The shopping cart and the not-yet-committed quantities typed next to
//! each catalog row.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operator Action          Storefront call         Cart Change           │
//! │  ───────────────          ───────────────         ───────────           │
//! │                                                                         │
//! │  Type quantity ─────────► set_pending_quantity ─► pending[id] = n      │
//! │                                                                         │
//! │  Click Add ─────────────► add_to_cart ──────────► line.qty += n        │
//! │                                                   or lines.push(..)    │
//! │                                                   pending[id] = 1      │
//! │                                                                         │
//! │  Click Remove ──────────► remove_from_cart ─────► lines.retain(..)     │
//! │                                                                         │
//! │  Payment succeeds ──────► (checkout) ───────────► clear()              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, Product, ProductId};
use crate::validation::clamp_quantity;
use crate::MIN_ITEM_QUANTITY;

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product increases quantity)
/// - Quantity is always >= 1
/// - Existing lines keep their position; new lines append at the end
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product, merging into the existing line if present.
    ///
    /// Quantities below 1 are clamped to 1. Returns the updated line.
    pub fn add(&mut self, product: &Product, quantity: i64) -> &CartLine {
        let quantity = clamp_quantity(quantity);

        let index = match self.lines.iter().position(|l| l.product_id == product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                line.quantity = line.quantity.saturating_add(quantity);
                index
            }
            None => {
                self.lines.push(CartLine::from_product(product, quantity));
                self.lines.len() - 1
            }
        };

        &self.lines[index]
    }

    /// Removes the line for a product.
    ///
    /// Returns the removed line, or `None` if the product was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        let index = self.lines.iter().position(|l| l.product_id == product_id)?;
        Some(self.lines.remove(index))
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Finds the line for a product.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines
            .iter()
            .fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Pending Quantities
// =============================================================================

/// Quantities typed next to catalog rows but not yet added.
///
/// Unset products read as 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuantities {
    quantities: BTreeMap<ProductId, i64>,
}

impl PendingQuantities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending quantity for a product (1 when unset).
    pub fn get(&self, product_id: ProductId) -> i64 {
        self.quantities
            .get(&product_id)
            .copied()
            .unwrap_or(MIN_ITEM_QUANTITY)
    }

    /// Stores a pending quantity, clamped to at least 1. Returns the stored value.
    pub fn set(&mut self, product_id: ProductId, quantity: i64) -> i64 {
        let quantity = clamp_quantity(quantity);
        self.quantities.insert(product_id, quantity);
        quantity
    }

    /// Resets a product back to 1 after it has been added.
    pub fn reset(&mut self, product_id: ProductId) {
        self.quantities.insert(product_id, MIN_ITEM_QUANTITY);
    }

    pub fn clear(&mut self) {
        self.quantities.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn milk() -> Product {
        Product::new(1, "Milk (1 litre)", 50)
    }

    fn bread() -> Product {
        Product::new(2, "Bread", 30)
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        cart.add(&milk(), 2);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.total(), Money::from_rupees(100));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add(&milk(), 2);
        cart.add(&milk(), 3);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.line(ProductId(1)).unwrap().quantity, 5);
    }

    #[test]
    fn test_cart_preserves_order_and_appends() {
        let mut cart = Cart::new();
        cart.add(&milk(), 1);
        cart.add(&bread(), 1);
        cart.add(&milk(), 1);

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(2)]);
    }

    #[test]
    fn test_cart_total_scenario() {
        let mut cart = Cart::new();
        cart.add(&milk(), 2);
        cart.add(&bread(), 1);

        assert_eq!(cart.total(), Money::from_rupees(130));
        assert_eq!(CartTotals::from(&cart).total_quantity, 3);
    }

    #[test]
    fn test_cart_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(&milk(), 1);

        assert!(cart.remove(ProductId(42)).is_none());
        assert_eq!(cart.item_count(), 1);

        let removed = cart.remove(ProductId(1)).unwrap();
        assert_eq!(removed.name, "Milk (1 litre)");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_clamps_quantity() {
        let mut cart = Cart::new();
        cart.add(&bread(), 0);
        assert_eq!(cart.line(ProductId(2)).unwrap().quantity, 1);
    }

    #[test]
    fn test_pending_quantities() {
        let mut pending = PendingQuantities::new();
        assert_eq!(pending.get(ProductId(3)), 1);

        assert_eq!(pending.set(ProductId(3), 4), 4);
        assert_eq!(pending.get(ProductId(3)), 4);
        assert_eq!(pending.get(ProductId(4)), 1);

        assert_eq!(pending.set(ProductId(3), -2), 1);

        pending.set(ProductId(3), 6);
        pending.reset(ProductId(3));
        assert_eq!(pending.get(ProductId(3)), 1);

        pending.set(ProductId(5), 9);
        pending.clear();
        assert_eq!(pending.get(ProductId(5)), 1);
    }
}
