//! # Cart
//!
//! In-memory shopping cart with stock-aware quantity rules.
//!
//! ## Behavior
//! - Lines merge by product id and keep insertion order.
//! - Unit prices are frozen into the line when a product is first added;
//!   later catalog edits do not touch existing lines.
//! - Stock gates run before any mutation, so a failed add leaves the cart
//!   exactly as it was.
//! - Totals follow the display rounding policy in [`crate::money`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money;
use crate::types::Product;

/// One line in the cart.
///
/// Serializes with the exact field names the order endpoint expects:
/// `id`, `name`, `price`, `qty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product id this line refers to.
    pub id: i64,

    /// Name copied from the product when the line was created.
    pub name: String,

    /// Unit price frozen at the moment the product was first added.
    pub price: f64,

    /// Units of this product in the cart.
    #[serde(rename = "qty")]
    pub quantity: i64,
}

impl CartItem {
    /// Creates a line holding one unit, freezing the current price.
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
        }
    }

    /// Raw line total, before display rounding.
    #[inline]
    pub fn line_total(&self) -> f64 {
        money::line_total(self.price, self.quantity)
    }

    /// Line total as rendered on the cart row.
    #[inline]
    pub fn rounded_line_total(&self) -> i64 {
        money::rounded_line_total(self.price, self.quantity)
    }
}

/// The in-memory shopping cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Cart lines in the order products were first added.
    pub items: Vec<CartItem>,

    /// When this cart was started.
    pub created_at: DateTime<Utc>,
}

impl Cart {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `product` to the cart.
    ///
    /// ## Rules
    /// 1. A product with no stock at all cannot be added.
    /// 2. A line that already holds every available unit cannot grow.
    /// 3. Otherwise the existing line is incremented, or a new line with
    ///    quantity 1 is appended.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if product.stock <= 0 {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            if item.quantity >= product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested: item.quantity + 1,
                });
            }
            item.quantity += 1;
        } else {
            self.items.push(CartItem::from_product(product));
        }

        Ok(())
    }

    /// Removes one unit of the product with `id`.
    ///
    /// A line reaching zero disappears from the cart entirely. Returns
    /// `false` (and changes nothing) when no line matches, so callers can
    /// skip re-rendering.
    pub fn remove_one(&mut self, id: i64) -> bool {
        let Some(index) = self.items.iter().position(|i| i.id == id) else {
            return false;
        };

        let item = &mut self.items[index];
        item.quantity -= 1;
        if item.quantity <= 0 {
            self.items.remove(index);
        }
        true
    }

    /// Number of distinct lines.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Grand total as rendered: raw line totals are summed first, then
    /// rounded exactly once. This is NOT the sum of the rounded rows.
    pub fn total(&self) -> i64 {
        money::round_amount(self.items.iter().map(CartItem::line_total).sum())
    }

    /// Quantity currently in the cart for a product, 0 when absent.
    pub fn quantity_of(&self, id: i64) -> i64 {
        self.items
            .iter()
            .find(|i| i.id == id)
            .map_or(0, |i| i.quantity)
    }

    /// Owned copy of the lines, in order, for order submission.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_product(id: i64, name: &str, price: f64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            stock,
            barcode: format!("{id:08}"),
        }
    }

    #[test]
    fn test_add_new_product_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        cart.add_product(&test_product(1, "Rice", 20000.0, 3)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of(1), 1);
        assert_eq!(cart.items[0].name, "Rice");
        assert_eq!(cart.items[0].price, 20000.0);
    }

    #[test]
    fn test_add_same_product_increments_quantity() {
        let mut cart = Cart::new();
        let rice = test_product(1, "Rice", 20000.0, 3);
        cart.add_product(&rice).unwrap();
        cart.add_product(&rice).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn test_add_stops_at_available_stock() {
        let mut cart = Cart::new();
        let rice = test_product(1, "Rice", 20000.0, 3);

        for _ in 0..3 {
            cart.add_product(&rice).unwrap();
        }
        assert_eq!(cart.quantity_of(1), 3);

        let err = cart.add_product(&rice).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                name: "Rice".to_string(),
                available: 3,
                requested: 4,
            }
        );
        // failed add must not touch the cart
        assert_eq!(cart.quantity_of(1), 3);
    }

    #[test]
    fn test_add_rejects_product_without_stock() {
        let mut cart = Cart::new();
        let err = cart
            .add_product(&test_product(2, "Fish Sauce", 35000.0, 0))
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::OutOfStock {
                name: "Fish Sauce".to_string(),
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_price_frozen_at_first_add() {
        let mut cart = Cart::new();
        let mut rice = test_product(1, "Rice", 20000.0, 5);
        cart.add_product(&rice).unwrap();

        rice.price = 25000.0;
        cart.add_product(&rice).unwrap();

        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.items[0].price, 20000.0);
    }

    #[test]
    fn test_remove_one_decrements() {
        let mut cart = Cart::new();
        let rice = test_product(1, "Rice", 20000.0, 3);
        cart.add_product(&rice).unwrap();
        cart.add_product(&rice).unwrap();

        assert!(cart.remove_one(1));
        assert_eq!(cart.quantity_of(1), 1);
    }

    #[test]
    fn test_remove_one_drops_line_at_zero() {
        let mut cart = Cart::new();
        cart.add_product(&test_product(1, "Rice", 20000.0, 3)).unwrap();

        assert!(cart.remove_one(1));
        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(1), 0);
    }

    #[test]
    fn test_remove_one_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_product(&test_product(1, "Rice", 20000.0, 3)).unwrap();

        assert!(!cart.remove_one(99));
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.quantity_of(1), 1);
    }

    #[test]
    fn test_total_sums_then_rounds_once() {
        let mut cart = Cart::new();
        cart.add_product(&test_product(1, "Candy", 10.3, 5)).unwrap();
        cart.add_product(&test_product(2, "Gum", 10.3, 5)).unwrap();

        // raw sum 20.6 rounds to 21; the rounded rows would give 20
        assert_eq!(cart.total(), 21);
        assert_eq!(cart.items[0].rounded_line_total(), 10);
    }

    #[test]
    fn test_total_for_whole_prices() {
        let mut cart = Cart::new();
        let rice = test_product(1, "Rice", 20000.0, 3);
        for _ in 0..3 {
            cart.add_product(&rice).unwrap();
        }

        assert_eq!(cart.total(), 60000);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_product(&test_product(3, "Soap", 12000.0, 2)).unwrap();
        cart.add_product(&test_product(1, "Rice", 20000.0, 3)).unwrap();
        cart.add_product(&test_product(3, "Soap", 12000.0, 2)).unwrap();

        let ids: Vec<i64> = cart.items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_wire_serialization_uses_qty_key() {
        let mut cart = Cart::new();
        let rice = test_product(1, "Rice", 20000.0, 3);
        cart.add_product(&rice).unwrap();
        cart.add_product(&rice).unwrap();

        let wire = serde_json::to_value(cart.snapshot()).unwrap();
        assert_eq!(
            wire,
            json!([{ "id": 1, "name": "Rice", "price": 20000.0, "qty": 2 }])
        );
    }
}
