//! # Catalog
//!
//! Ordered in-memory product catalog: text search, scanner lookups, and
//! the registration flow that assigns ids and barcodes.
//!
//! ## Search vs. scan
//! Text search ([`Catalog::filter`]) is forgiving: trimmed,
//! case-insensitive, substring match on name or barcode. Scanner lookups
//! ([`Catalog::find_by_barcode`]) are exact string equality, because a
//! scanner never delivers a partial code.

use crate::error::CoreResult;
use crate::types::{NewProduct, Product};
use crate::validation;

/// Builds the canonical barcode for a catalog id: the decimal id
/// left-padded with zeros to 8 digits. Ids wider than 8 digits keep their
/// full length.
pub fn generate_barcode(id: i64) -> String {
    format!("{id:08}")
}

/// Ordered, in-memory product catalog.
///
/// Iteration order is insertion order everywhere; "first match" always
/// means first in that order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Builds a catalog from existing products, keeping their order.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// All products in insertion order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Case-insensitive substring search over names and barcodes.
    ///
    /// The query is normalized exactly once (trimmed, then lowercased).
    /// An empty normalized query matches everything, so a fresh search box
    /// shows the whole catalog. Same query in, same products out.
    pub fn filter(&self, query: &str) -> Vec<&Product> {
        let normalized = query.trim().to_lowercase();
        if normalized.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| p.matches_search(&normalized))
            .collect()
    }

    /// Exact-match scanner lookup.
    ///
    /// Empty input means the scan buffer fired without a code; that is a
    /// non-event, not an error, so it returns `None` without signalling.
    /// When several products carry the same barcode, the FIRST one in
    /// catalog order wins and the lookup stops there.
    pub fn find_by_barcode(&self, code: &str) -> Option<&Product> {
        if code.is_empty() {
            return None;
        }
        self.products.iter().find(|p| p.barcode == code)
    }

    /// Registers a new product: validates the input, assigns the next id
    /// and a generated barcode, appends to the catalog, and returns the
    /// stored product.
    ///
    /// Duplicate names are allowed here; only bulk [`import`](Self::import)
    /// dedups by name.
    pub fn register(&mut self, input: &NewProduct) -> CoreResult<Product> {
        let cleaned = validation::validate_new_product(input)?;
        let id = self.next_id();
        let product = Product {
            id,
            name: cleaned.name,
            price: cleaned.price,
            stock: cleaned.stock,
            barcode: generate_barcode(id),
        };
        self.products.push(product.clone());
        Ok(product)
    }

    /// Bulk-registers entries in order. Rows that fail validation and rows
    /// whose trimmed name exactly matches an existing product (including
    /// one imported earlier in the same batch) are skipped. Returns the
    /// number actually imported.
    pub fn import(&mut self, entries: &[NewProduct]) -> usize {
        let mut imported = 0;
        for entry in entries {
            let name = entry.name.trim();
            if self.products.iter().any(|p| p.name == name) {
                continue;
            }
            if self.register(entry).is_ok() {
                imported += 1;
            }
        }
        imported
    }

    fn next_id(&self) -> i64 {
        self.products.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}
