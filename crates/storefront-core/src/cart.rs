//! # Cart Module
//!
//! The quantity-merging shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  User Action            Operation             Resulting Cart            │
//! │  ───────────            ─────────             ──────────────            │
//! │                                                                         │
//! │  Click "Add" ─────────► add(product) ───────► line.amount + 1           │
//! │                                               or new line (amount 1)    │
//! │                                               appended at the end       │
//! │                                                                         │
//! │  Click "−" ───────────► remove(id) ─────────► line.amount − 1           │
//! │                                               or line deleted at 1      │
//! │                                               or same cart if absent    │
//! │                                                                         │
//! │  Click "Empty Cart" ──► clear() ────────────► no lines                  │
//! │                                                                         │
//! │  NOTE: Every operation returns a NEW cart and leaves the receiver       │
//! │        untouched. `Cart::ptr_eq` tells whether anything changed.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// A product held in the cart, with its quantity.
///
/// Serialized flat, the way the storefront shows it: every product field
/// plus `amount`.
///
/// Output only: a line can only come into being through [`Cart::add`].
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,

    /// Units in the cart, always at least 1.
    pub amount: u64,
}

impl CartLine {
    fn new(product: Product) -> Self {
        CartLine { product, amount: 1 }
    }

    /// Unit price × amount.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.amount)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product increments)
/// - Every line has `amount >= 1` (removing the last unit deletes the line)
/// - Lines keep first-add order
///
/// Serialize only. A cart is never read back from outside, so the invariants
/// above hold for every value of this type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    lines: Arc<Vec<CartLine>>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Product already in cart: that line's amount increases by 1
    /// - Product not in cart: a new line with amount 1 is appended
    ///
    /// The amount saturates at `u64::MAX`, which one-unit adds cannot reach.
    pub fn add(&self, product: &Product) -> Cart {
        let mut lines = Vec::clone(&self.lines);
        match lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.amount = line.amount.saturating_add(1),
            None => lines.push(CartLine::new(product.clone())),
        }
        Cart {
            lines: Arc::new(lines),
        }
    }

    /// Removes one unit of the product with `product_id`.
    ///
    /// ## Behavior
    /// - Not in cart: returns this cart unchanged (same storage)
    /// - Amount > 1: decrements
    /// - Amount == 1: deletes the line, later lines move up
    pub fn remove(&self, product_id: u64) -> Cart {
        let Some(index) = self.position(product_id) else {
            return self.clone();
        };

        let mut lines = Vec::clone(&self.lines);
        if lines[index].amount > 1 {
            lines[index].amount -= 1;
        } else {
            lines.remove(index);
        }
        Cart {
            lines: Arc::new(lines),
        }
    }

    /// Returns an empty cart.
    pub fn clear(&self) -> Cart {
        Cart::new()
    }

    /// Sum of all amounts.
    pub fn total_item_count(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |total, l| total.saturating_add(l.amount))
    }

    /// Sum of `amount × price` over all lines, unrounded.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in first-add order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: u64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns true if both carts share the same line storage.
    ///
    /// Clones and no-op removals are identical; every effective add, remove
    /// or clear produces a distinct cart.
    pub fn ptr_eq(a: &Cart, b: &Cart) -> bool {
        Arc::ptr_eq(&a.lines, &b.lines)
    }

    fn position(&self, product_id: u64) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }
}

/// Structural equality: same lines in the same order.
impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        Cart::ptr_eq(self, other) || self.lines == other.lines
    }
}

/// Cart totals summary for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,
    /// Units across all lines (the header badge).
    pub total_item_count: u64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.len(),
            total_item_count: cart.total_item_count(),
            total_price: cart.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p1() -> Product {
        Product::new(1, "a", "Red Shoe", Money::from_cents(2000))
    }

    fn p2() -> Product {
        Product::new(2, "b", "Blue Hat", Money::from_cents(500))
    }

    #[test]
    fn test_double_add_merges_into_one_line() {
        let cart = Cart::new().add(&p1()).add(&p1());

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(1).map(|l| l.amount), Some(2));
        assert_eq!(cart.total_item_count(), 2);
    }

    #[test]
    fn test_add_appends_in_first_add_order() {
        let cart = Cart::new().add(&p2()).add(&p1()).add(&p2());
        let order: Vec<u64> = cart.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(order, vec![2, 1]);
    }

    #[test]
    fn test_add_leaves_original_untouched() {
        let before = Cart::new().add(&p1());
        let after = before.add(&p1());

        assert_eq!(before.get(1).map(|l| l.amount), Some(1));
        assert_eq!(after.get(1).map(|l| l.amount), Some(2));
        assert!(!Cart::ptr_eq(&before, &after));
    }

    #[test]
    fn test_remove_last_unit_deletes_line() {
        let cart = Cart::new().add(&p1());
        let emptied = cart.remove(1);

        assert!(emptied.is_empty());
        assert_eq!(emptied.total_price(), Money::zero());
        assert_eq!(emptied.total_item_count(), 0);
    }

    #[test]
    fn test_remove_decrements() {
        let cart = Cart::new().add(&p1()).add(&p1()).add(&p2());
        let cart = cart.remove(1);

        assert_eq!(cart.get(1).map(|l| l.amount), Some(1));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_remove_closes_gap() {
        let p3 = Product::new(3, "c", "Green Scarf", Money::from_cents(1250));
        let cart = Cart::new().add(&p1()).add(&p2()).add(&p3).remove(2);
        let order: Vec<u64> = cart.lines().iter().map(|l| l.product.id).collect();
        assert_eq!(order, vec![1, 3]);
    }

    #[test]
    fn test_remove_absent_is_identity() {
        let cart = Cart::new().add(&p1());
        let same = cart.remove(99);

        assert!(Cart::ptr_eq(&cart, &same));
        assert_eq!(cart, same);

        let empty = Cart::new();
        assert!(Cart::ptr_eq(&empty, &empty.remove(1)));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::new().add(&p1()).add(&p2()).add(&p2()).add(&p2());

        assert_eq!(cart.total_item_count(), 4);
        assert_eq!(cart.total_price(), Money::from_cents(2000 + 3 * 500));
        assert_eq!(cart.get(2).map(CartLine::line_total), Some(Money::from_cents(1500)));

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_item_count, 4);
        assert_eq!(totals.total_price.to_string(), "$35.00");
    }

    #[test]
    fn test_totals_are_exact() {
        let dime = Product::new(7, "x", "Dime", Money::from_cents(10));
        let two_dimes = Product::new(8, "x", "Two Dimes", Money::from_cents(20));
        let cart = Cart::new().add(&dime).add(&two_dimes);
        assert_eq!(cart.total_price().cents(), 30);
    }

    #[test]
    fn test_sub_cent_prices_total_unrounded() {
        let pin = Product::new(9, "x", "Pin", Money::new(0.335));
        let cart = Cart::new().add(&pin).add(&pin).add(&pin);

        assert!((cart.total_price().amount() - 1.005).abs() < 1e-9);

        let washer = Product::new(10, "x", "Washer", Money::new(0.004));
        let cart = Cart::new().add(&washer).add(&washer).add(&washer);
        assert_eq!(cart.total_price().to_string(), "$0.01");
    }

    #[test]
    fn test_huge_prices_add_without_panicking() {
        let yacht = Product::new(11, "x", "Yacht", Money::new(1e17));
        let cart = Cart::new().add(&yacht).add(&yacht);

        assert_eq!(cart.get(11).map(|l| l.amount), Some(2));
        assert_eq!(cart.total_price(), Money::new(2e17));
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let cart = Cart::new().add(&p1()).add(&p2());
        let json = serde_json::to_value(CartTotals::from(&cart)).unwrap();

        assert_eq!(json["lineCount"], 2);
        assert_eq!(json["totalItemCount"], 2);
        assert_eq!(json["totalPrice"], 25.0);
    }

    #[test]
    fn test_clear() {
        let cart = Cart::new().add(&p1()).add(&p2());
        let cleared = cart.clear();

        assert!(cleared.is_empty());
        assert_eq!(cart.len(), 2);
        assert_eq!(cleared.total_price(), Money::zero());
    }

    #[test]
    fn test_line_serializes_flat() {
        let cart = Cart::new().add(&p1()).add(&p1());
        let json = serde_json::to_value(&cart.lines()[0]).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Red Shoe");
        assert_eq!(json["amount"], 2);
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(0i64..10_000, 1..6).prop_map(|prices| {
            prices
                .into_iter()
                .enumerate()
                .map(|(i, cents)| {
                    Product::new(i as u64, "x", format!("P{i}"), Money::from_cents(cents))
                })
                .collect()
        })
    }

    /// Builds a cart by adding products by index, wrapping around.
    fn build(products: &[Product], picks: &[usize]) -> Cart {
        picks
            .iter()
            .fold(Cart::new(), |cart, i| cart.add(&products[i % products.len()]))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: add increases the item count by exactly one.
        #[test]
        fn add_increments_item_count(
            products in arb_products(),
            picks in prop::collection::vec(0usize..10, 0..20),
            extra in 0usize..10,
        ) {
            let cart = build(&products, &picks);
            let added = cart.add(&products[extra % products.len()]);
            prop_assert_eq!(added.total_item_count(), cart.total_item_count() + 1);
        }

        /// Property: removing an absent id returns the same cart.
        #[test]
        fn remove_absent_is_noop(
            products in arb_products(),
            picks in prop::collection::vec(0usize..10, 0..20),
        ) {
            let cart = build(&products, &picks);
            let absent = 1_000;
            let after = cart.remove(absent);
            prop_assert!(Cart::ptr_eq(&cart, &after));
            prop_assert_eq!(cart, after);
        }

        /// Property: removing a line `amount` times deletes it, and further
        /// removals change nothing.
        #[test]
        fn repeated_remove_drains_line(
            products in arb_products(),
            picks in prop::collection::vec(0usize..10, 1..20),
        ) {
            let cart = build(&products, &picks);
            let target = cart.lines()[0].product.id;
            let amount = cart.lines()[0].amount;

            let mut drained = cart.clone();
            for _ in 0..amount {
                drained = drained.remove(target);
            }
            prop_assert!(drained.get(target).is_none());
            prop_assert_eq!(drained.len(), cart.len() - 1);

            let again = drained.remove(target);
            prop_assert!(Cart::ptr_eq(&drained, &again));
        }

        /// Property: no duplicate ids and no zero amounts, ever.
        #[test]
        fn lines_stay_unique_and_positive(
            products in arb_products(),
            ops in prop::collection::vec((any::<bool>(), 0usize..10), 0..40),
        ) {
            let cart = ops.iter().fold(Cart::new(), |cart, (is_add, i)| {
                let product = &products[i % products.len()];
                if *is_add { cart.add(product) } else { cart.remove(product.id) }
            });

            let mut ids: Vec<u64> = cart.lines().iter().map(|l| l.product.id).collect();
            let len = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), len);
            prop_assert!(cart.lines().iter().all(|l| l.amount >= 1));

            let expected: Money = cart
                .lines()
                .iter()
                .map(|l| l.product.price.multiply_quantity(l.amount))
                .sum();
            prop_assert_eq!(cart.total_price(), expected);
        }
    }
}
