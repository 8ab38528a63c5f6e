//! # minimart-core
//!
//! Pure business logic for MiniMart POS. No I/O of any kind lives here.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                minimart-core                 │
//! │                                              │
//! │  catalog ─── products, search, registration  │
//! │  cart ────── lines, stock gates, totals      │
//! │  money ───── display rounding policy         │
//! │  types ───── Product, NewProduct             │
//! │  validation ─ registration input checks      │
//! │  error ───── CoreError, ValidationError      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The embedding layer (`minimart-client`) wraps this crate with shared
//! state, the HTTP checkout client, and frontend projections.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// Re-export the types used on every call path so embedders rarely need
// deep module paths.
pub use cart::{Cart, CartItem};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::{NewProduct, Product};

/// Maximum length of a product name, in characters.
///
/// ## Why 200?
/// Long enough for verbose import rows ("Jasmine Rice Premium 5kg Export
/// Quality"), short enough that a cart row still renders on one line.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
