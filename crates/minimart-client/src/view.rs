//! # View Projections
//!
//! Deterministic, full-rebuild projections of domain state for the
//! frontend. Two carts with equal state always project to identical
//! views, so the page re-renders from scratch after every mutation
//! instead of diffing.

use serde::Serialize;
use ts_rs::TS;

use minimart_core::cart::{Cart, CartItem};
use minimart_core::types::Product;

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    /// Product id, used to key the row's decrement control.
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    /// Rounded line total as rendered on this row.
    pub line_total: i64,
}

impl From<&CartItem> for CartRow {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            quantity: item.quantity,
            line_total: item.rounded_line_total(),
        }
    }
}

/// Aggregates rendered under the cart table.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Rounded grand total. Rounds the raw sum once; can differ from the
    /// sum of the rounded rows with fractional prices.
    pub total: i64,
    /// Distinct lines in the cart.
    pub item_count: usize,
    /// Units across all lines.
    pub total_quantity: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        Self {
            total: cart.total(),
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
        }
    }
}

/// Complete cart projection, rebuildable from cart state alone.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// Rows in cart insertion order.
    pub rows: Vec<CartRow>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            rows: cart.items.iter().map(CartRow::from).collect(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Product projection for listings and search results.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub barcode: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            stock: product.stock,
            barcode: product.barcode.clone(),
        }
    }
}
