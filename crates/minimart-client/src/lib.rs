//! # MiniMart Client
//!
//! Page logic for the MiniMart point-of-sale screen, packaged as a
//! library a host shell can embed. The shell owns the widgets and the
//! navigation; this crate owns everything that decides what those
//! widgets show.
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │ minimart-client                                 │
//! │                                                 │
//! │  session   – shared state + the operation facade│
//! │  checkout  – order submission over HTTP         │
//! │  view      – render-ready cart/product DTOs     │
//! │  config    – store settings and price formatting│
//! │  error     – the ApiError envelope              │
//! └─────────────────────────────────────────────────┘
//!            │ depends on
//!            ▼
//!      minimart-core (pure domain rules, no I/O)
//! ```

pub mod checkout;
pub mod config;
pub mod error;
pub mod session;
pub mod view;

pub use checkout::{order_path, CheckoutClient, CheckoutError, CheckoutOutcome, CheckoutRequest};
pub use config::StoreConfig;
pub use error::{ApiError, ErrorCode};
pub use session::{CartState, CatalogState, PosSession};
pub use view::{CartRow, CartTotals, CartView, ProductView};

// Domain types that appear in this crate's public signatures.
pub use minimart_core::{Cart, CartItem, Catalog, NewProduct, Product};

/// Initializes structured logging for a host binary.
///
/// Honors `RUST_LOG` when set; otherwise defaults to `info` globally
/// with debug-level detail for the MiniMart crates. Call once at
/// startup, before constructing a [`PosSession`].
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,minimart_core=debug,minimart_client=debug")
    });
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
