//! The cart aggregate and its pure operations.
//!
//! A [`Cart`] is an ordered sequence of [`CartLine`]s keyed by product ID:
//! insertion order is preserved, updates never reorder, and at most one
//! line exists per product. All mutation logic lives here, free of I/O;
//! persistence and notifications are layered on top by the cart store.
//!
//! # Invariants
//!
//! - At most one line per distinct product ID.
//! - Every stored line has `quantity >= 1`. A quantity update that lands at
//!   or below zero removes the line instead of storing it.
//! - `name`, `unit_price`, and `image_url` are snapshotted at first add and
//!   never overwritten by later adds of the same product.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// One row in the cart: a single product and the quantity requested.
///
/// Display fields (`name`, `unit_price`, `image_url`) are snapshots taken
/// when the product was first added, not live catalog reads - the price a
/// shopper saw when adding is the price the cart keeps for the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product this line represents. Unique within the cart.
    pub product_id: ProductId,
    /// Display name snapshotted at add-time.
    pub name: String,
    /// Unit price snapshotted at add-time.
    pub unit_price: Price,
    /// Product image URL snapshotted at add-time, if the product has one.
    pub image_url: Option<String>,
    /// Number of units requested. Always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// The shopping cart: an insertion-ordered collection of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Create a cart from existing lines, e.g. a decoded snapshot.
    ///
    /// Callers are responsible for the lines already satisfying the cart
    /// invariants (unique product IDs, quantities >= 1); the snapshot codec
    /// validates before constructing.
    #[must_use]
    pub const fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up a line by product ID.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines (the badge count).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Exact total: `sum(unit_price * quantity)` over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::ZERO, |acc, l| acc.plus(l.line_total()))
    }

    /// Add a line to the cart.
    ///
    /// If a line for the same product already exists, its quantity is
    /// incremented by `line.quantity` and the existing display fields are
    /// kept (first add wins, so a price change mid-session never surprises
    /// the shopper). Otherwise the line is appended at the end.
    ///
    /// Adding with `quantity == 0` is a no-op: the invariant forbids
    /// zero-quantity lines and callers always request at least one unit.
    pub fn add(&mut self, line: CartLine) {
        if line.quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.lines.push(line),
        }
    }

    /// Adjust a line's quantity by `delta` (positive or negative).
    ///
    /// If the resulting quantity is zero or below, the line is removed
    /// entirely. Unknown product IDs are a no-op: the caller's view of the
    /// cart may be stale by one render frame, so this is not an error.
    pub fn update_quantity(&mut self, product_id: &ProductId, delta: i64) {
        let Some(index) = self.lines.iter().position(|l| &l.product_id == product_id) else {
            return;
        };
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        let new_quantity = i64::from(line.quantity).saturating_add(delta);
        if new_quantity <= 0 {
            self.lines.remove(index);
        } else {
            line.quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove the line for a product. No-op if the product is not in the
    /// cart.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.lines.retain(|l| &l.product_id != product_id);
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse::<Decimal>().unwrap()).unwrap()
    }

    fn line(id: &str, name: &str, unit_price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::from(id),
            name: name.to_owned(),
            unit_price: price(unit_price),
            image_url: None,
            quantity,
        }
    }

    #[test]
    fn test_add_merges_lines_for_same_product() {
        let mut cart = Cart::new();
        cart.add(line("p1", "Lamp", "19.99", 1));
        cart.add(line("p1", "Lamp", "19.99", 2));

        assert_eq!(cart.lines().len(), 1);
        let merged = cart.line(&ProductId::from("p1")).unwrap();
        assert_eq!(merged.quantity, 3);
        assert_eq!(cart.total(), price("59.97"));
    }

    #[test]
    fn test_add_keeps_first_add_display_fields() {
        let mut cart = Cart::new();
        cart.add(CartLine {
            image_url: Some("https://img.example/lamp.jpg".to_owned()),
            ..line("p1", "Lamp", "10.00", 1)
        });
        // Same product comes back with a different name, price, and image.
        cart.add(CartLine {
            image_url: Some("https://img.example/new.jpg".to_owned()),
            ..line("p1", "Lamp (new)", "12.00", 2)
        });

        let merged = cart.line(&ProductId::from("p1")).unwrap();
        assert_eq!(merged.name, "Lamp");
        assert_eq!(merged.unit_price, price("10.00"));
        assert_eq!(
            merged.image_url.as_deref(),
            Some("https://img.example/lamp.jpg")
        );
        assert_eq!(merged.quantity, 3);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 1));
        cart.add(line("p2", "B", "7", 2));
        cart.add(line("p1", "A", "5", 1));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
    }

    #[test]
    fn test_add_zero_quantity_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unique_line_per_product_over_many_adds() {
        let mut cart = Cart::new();
        for i in 0..20 {
            cart.add(line("p1", "A", "1", 1));
            cart.add(line("p2", "B", "2", 1));
            cart.add(if i % 2 == 0 {
                line("p3", "C", "3", 1)
            } else {
                line("p1", "A", "1", 2)
            });
        }

        let mut seen: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), cart.lines().len());
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(line("p1", "Lamp", "10", 1));
        cart.update_quantity(&ProductId::from("p1"), -1);

        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_update_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(line("p1", "Lamp", "10", 2));
        cart.update_quantity(&ProductId::from("p1"), -5);

        assert!(cart.line(&ProductId::from("p1")).is_none());
    }

    #[test]
    fn test_update_quantity_positive_delta() {
        let mut cart = Cart::new();
        cart.add(line("p1", "Lamp", "10", 2));
        cart.update_quantity(&ProductId::from("p1"), 3);

        assert_eq!(cart.line(&ProductId::from("p1")).unwrap().quantity, 5);
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.update_quantity(&ProductId::from("nonexistent"), 5);
        assert!(cart.is_empty());

        cart.add(line("p1", "A", "5", 1));
        cart.update_quantity(&ProductId::from("p2"), 1);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_no_line_ever_has_zero_quantity() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 3));
        cart.add(line("p2", "B", "7", 1));
        cart.update_quantity(&ProductId::from("p1"), -3);
        cart.update_quantity(&ProductId::from("p2"), -10);
        cart.add(line("p3", "C", "2", 2));
        cart.update_quantity(&ProductId::from("p3"), -1);

        assert!(cart.lines().iter().all(|l| l.quantity >= 1));
    }

    #[test]
    fn test_remove_deletes_line() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 1));
        cart.add(line("p2", "B", "7", 2));
        cart.remove(&ProductId::from("p1"));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].product_id, ProductId::from("p2"));
    }

    #[test]
    fn test_remove_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 1));
        cart.remove(&ProductId::from("p9"));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_total_sums_all_lines_exactly() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 1));
        cart.add(line("p2", "B", "7", 2));

        assert_eq!(cart.total(), price("19"));
    }

    #[test]
    fn test_total_is_monotonic_under_adds() {
        let mut cart = Cart::new();
        let mut previous = Price::ZERO;
        for i in 0..10 {
            cart.add(line(&format!("p{i}"), "X", "0.10", 1));
            let current = cart.total();
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_count_sums_quantities() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 2));
        cart.add(line("p2", "B", "7", 3));
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_clear_empties_cart() {
        let mut cart = Cart::new();
        cart.add(line("p1", "A", "5", 1));
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Price::ZERO);
    }
}
