//! The in-session shopping cart.
//!
//! A [`Cart`] is owned by the session context for the session's lifetime:
//! created empty, mutated only through the operations below, and cleared
//! (not destroyed) after a confirmed order placement.
//!
//! Invariants:
//! - at most one [`CartLine`] per product identifier;
//! - every line has quantity >= 1 (a decrement that would reach zero removes
//!   the line entirely).

use serde::{Deserialize, Serialize};

use crate::models::{OrderItem, Product};
use crate::types::ProductId;

/// One product + quantity pairing within a [`Cart`].
///
/// Serializes as the product's fields plus `qty`, which is exactly the
/// item shape the backend expects in `POST /api/orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Snapshot of the product as it was when added.
    #[serde(flatten)]
    pub product: Product,
    /// Selected quantity; always >= 1 while the line exists.
    pub qty: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self { product, qty: 1 }
    }

    /// Convert this line into an order item snapshot.
    #[must_use]
    pub fn to_order_item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            price: self.product.price,
            qty: self.qty,
            img_url: Some(self.product.img_url.clone()),
        }
    }
}

/// The customer's in-progress, unsubmitted selection of products.
///
/// Line order is insertion order; nothing in the pricing or checkout
/// contract depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add a product to the cart.
    ///
    /// Idempotent with respect to presence: if a line for this product
    /// already exists the call is a no-op (the quantity is NOT incremented);
    /// otherwise a new line with quantity 1 is inserted. Quantity changes
    /// are explicit via [`Cart::increment`] / [`Cart::decrement`].
    pub fn add(&mut self, product: Product) {
        if self.get(&product.id).is_none() {
            self.lines.push(CartLine::new(product));
        }
    }

    /// Increase the quantity of the line for `id` by one.
    ///
    /// Silent no-op when no such line exists.
    pub fn increment(&mut self, id: &ProductId) {
        if let Some(line) = self.lines.iter_mut().find(|line| &line.product.id == id) {
            line.qty += 1;
        }
    }

    /// Decrease the quantity of the line for `id` by one.
    ///
    /// When the quantity would reach zero the line is removed entirely;
    /// a line never persists at quantity <= 0. Silent no-op when no such
    /// line exists.
    pub fn decrement(&mut self, id: &ProductId) {
        let Some(index) = self.lines.iter().position(|line| &line.product.id == id) else {
            return;
        };
        let at_minimum = self.lines.get(index).is_none_or(|line| line.qty <= 1);
        if at_minimum {
            self.lines.remove(index);
        } else if let Some(line) = self.lines.get_mut(index) {
            line.qty -= 1;
        }
    }

    /// Empty the cart. Called once, after a confirmed order placement.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct products in the cart (the header badge count).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|line| line.qty).sum()
    }

    /// Look up the line for a product, if present.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }

    /// Iterate over the lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter()
    }

    /// Snapshot every line as an order item, ready for order placement.
    #[must_use]
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.lines.iter().map(CartLine::to_order_item).collect()
    }
}
