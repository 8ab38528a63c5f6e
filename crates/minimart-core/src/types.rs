//! # Domain Types
//!
//! Core data structures shared by the catalog, the cart, and the embedding
//! layer. Everything here is plain data plus a few predicates; state
//! transitions live in [`crate::catalog`] and [`crate::cart`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Catalog-assigned numeric id.
    pub id: i64,

    /// Display name shown on product buttons and cart rows.
    pub name: String,

    /// Unit price in the store currency. Fractional prices are legal;
    /// rounding happens only at the display boundary.
    pub price: f64,

    /// Available quantity as the client knows it. The cart trusts this
    /// number; there is no reconciliation against a backend.
    pub stock: i64,

    /// Digit string used for scanner lookups. Generated codes are the
    /// decimal id left-padded with zeros to 8 characters.
    pub barcode: String,
}

impl Product {
    /// Whether at least one unit can be sold.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Search predicate for catalog filtering.
    ///
    /// `query` must already be normalized (trimmed and lowercased). The
    /// name is lowercased here before the substring check; the barcode is
    /// matched as-is because barcodes contain no letters.
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query) || self.barcode.contains(query)
    }
}

/// Input shape for registering one product, either from a manual entry
/// form or a bulk import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: f64, stock: i64) -> Self {
        Self {
            name: name.into(),
            price,
            stock,
        }
    }
}
