//! # Cart State
//!
//! `CartItem` and `Cart`: the in-memory list of products with quantities.
//! Every operation here is total; lookups that miss are no-ops.

use crate::product::{Price, Product, ProductId};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// A product paired with the quantity the user chose
#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    /// Shared handle to the catalog entry
    pub product: Arc<Product>,

    /// Never negative; may be zero
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: Arc<Product>, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Line total: unit price × quantity
    pub fn total_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Decrease by one, floored at zero
    pub fn decrement(&mut self) {
        if self.quantity > 0 {
            self.quantity -= 1;
        }
    }
}

/// Ordered collection of cart items, at most one per product id
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id() == id)
    }

    pub fn find_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.product_id() == id)
    }

    /// Add one unit of `product`. Appends a new item with quantity 1 the
    /// first time the product is seen, otherwise increments it.
    pub fn add_item(&mut self, product: &Arc<Product>) {
        match self.find_mut(product.id) {
            Some(item) => {
                item.increment();
                debug!(product_id = %product.id, quantity = item.quantity, "cart item incremented");
            }
            None => {
                self.items.push(CartItem::new(Arc::clone(product), 1));
                debug!(product_id = %product.id, "cart item added");
            }
        }
    }

    /// Delete the item for `id`. Returns whether anything was removed.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id() != id);
        let removed = self.items.len() != before;
        if removed {
            debug!(product_id = %id, "cart item removed");
        }
        removed
    }

    /// Increment the item for `id`, if present
    pub fn increment(&mut self, id: ProductId) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.increment();
                true
            }
            None => false,
        }
    }

    /// Decrement the item for `id`, if present. Items at zero stay in the cart.
    pub fn decrement(&mut self, id: ProductId) -> bool {
        match self.find_mut(id) {
            Some(item) => {
                item.decrement();
                true
            }
            None => false,
        }
    }

    /// Sum of quantities
    pub fn total_item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.quantity))
    }

    /// Sum of line totals
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::total_price).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self
                .items
                .iter()
                .map(|item| SnapshotItem {
                    product_id: item.product_id(),
                    name: item.product.name.clone(),
                    unit_price: item.product.price,
                    quantity: item.quantity,
                    line_total: item.total_price(),
                })
                .collect(),
            total_items: self.total_item_count(),
            total_price: self.total_price().display(),
        }
    }
}

/// One row of a `CartSnapshot`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
    pub line_total: Price,
}

/// Serializable summary of the cart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<SnapshotItem>,
    pub total_items: u32,
    /// Formatted, e.g. "$ 220.00"
    pub total_price: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baskets() -> Arc<Product> {
        Arc::new(Product::new(1, "Baskets", Price::from_cents(10000)))
    }

    fn socks() -> Arc<Product> {
        Arc::new(Product::new(2, "Socks", Price::from_cents(2000)))
    }

    #[test]
    fn test_item_total_price() {
        let item = CartItem::new(socks(), 3);
        assert_eq!(item.total_price(), Price::from_cents(6000));
    }

    #[test]
    fn test_item_decrement_floors_at_zero() {
        let mut item = CartItem::new(baskets(), 1);
        item.decrement();
        assert_eq!(item.quantity, 0);
        item.decrement();
        assert_eq!(item.quantity, 0);
        item.increment();
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_repeated_add_keeps_one_item() {
        let mut cart = Cart::new();
        let product = baskets();
        for _ in 0..5 {
            cart.add_item(&product);
        }
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.find(ProductId(1)).unwrap().quantity, 5);
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn test_add_single_product() {
        let mut cart = Cart::new();
        cart.add_item(&baskets());
        assert_eq!(cart.total_item_count(), 1);
        assert_eq!(cart.total_price().display(), "$ 100.00");
    }

    #[test]
    fn test_mixed_products() {
        let mut cart = Cart::new();
        let b = baskets();
        cart.add_item(&b);
        cart.add_item(&b);
        cart.add_item(&socks());

        assert_eq!(cart.total_item_count(), 3);
        assert_eq!(cart.total_price().display(), "$ 220.00");
        let ids: Vec<_> = cart.items().iter().map(CartItem::product_id).collect();
        assert_eq!(ids, [ProductId(1), ProductId(2)]);
    }

    #[test]
    fn test_remove_then_add_starts_at_one() {
        let mut cart = Cart::new();
        let b = baskets();
        cart.add_item(&b);
        cart.add_item(&b);
        assert!(cart.remove_item(ProductId(1)));
        assert!(cart.is_empty());
        assert_eq!(cart.total_price().display(), "$ 0.00");

        cart.add_item(&b);
        assert_eq!(cart.find(ProductId(1)).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&socks());
        assert!(!cart.remove_item(ProductId(42)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_zero_quantity_item_stays() {
        let mut cart = Cart::new();
        cart.add_item(&baskets());
        assert!(cart.decrement(ProductId(1)));
        assert!(cart.decrement(ProductId(1)));

        let item = cart.find(ProductId(1)).unwrap();
        assert_eq!(item.quantity, 0);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_increment_decrement_missing() {
        let mut cart = Cart::new();
        assert!(!cart.increment(ProductId(3)));
        assert!(!cart.decrement(ProductId(3)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_price_matches_line_sum() {
        let mut cart = Cart::new();
        let b = baskets();
        let s = socks();
        let bag = Arc::new(Product::new(3, "Bag", Price::from_cents(4999)));
        for product in [&b, &s, &s, &bag, &s, &b] {
            cart.add_item(product);
        }
        cart.decrement(ProductId(2));

        let expected: u64 = cart
            .items()
            .iter()
            .map(|i| i.product.price.amount * i.quantity as u64)
            .sum();
        assert_eq!(cart.total_price().amount, expected);
        assert_eq!(expected, 2 * 10000 + 2 * 2000 + 4999);
    }

    #[test]
    fn test_cent_prices_total_exactly() {
        let pin = Arc::new(Product::new(4, "Pin", Price::new(0.01).unwrap()));
        let mut cart = Cart::new();
        for _ in 0..3 {
            cart.add_item(&pin);
        }
        assert_eq!(cart.total_price().display(), "$ 0.03");
    }

    #[test]
    fn test_items_share_catalog_product() {
        let product = baskets();
        let mut cart = Cart::new();
        cart.add_item(&product);
        assert!(Arc::ptr_eq(&cart.items()[0].product, &product));
    }

    #[test]
    fn test_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(&socks());
        cart.add_item(&socks());

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.total_price, "$ 40.00");
        assert_eq!(snapshot.items[0].line_total, Price::from_cents(4000));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["items"][0]["product_id"], 2);
        assert_eq!(json["items"][0]["unit_price"], 20.0);
        assert_eq!(json["total_price"], "$ 40.00");
    }
}
