//! # Session
//!
//! One embedded sales session: the shared catalog and cart state plus the
//! operations a host page drives. Every mutating operation hands back the
//! fresh [`CartView`] so the page can rebuild its cart panel immediately.
//!
//! ## State
//! State lives behind `Arc<Mutex<...>>` wrappers with closure accessors, so
//! a lock is scoped to its closure and can never be held across an await
//! point. Checkout snapshots the cart lines under the lock and releases
//! it before any network traffic starts.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use minimart_core::{Cart, Catalog, NewProduct};

use crate::checkout::{CheckoutClient, CheckoutOutcome, CheckoutRequest};
use crate::config::StoreConfig;
use crate::error::ApiError;
use crate::view::{CartView, ProductView};

/// Shared handle to the cart.
#[derive(Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new() -> Self {
        Self {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Runs a closure with read access to the cart.
    pub fn with_cart<R>(&self, f: impl FnOnce(&Cart) -> R) -> R {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Runs a closure with write access to the cart.
    pub fn with_cart_mut<R>(&self, f: impl FnOnce(&mut Cart) -> R) -> R {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the catalog.
#[derive(Clone)]
pub struct CatalogState {
    catalog: Arc<Mutex<Catalog>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Runs a closure with read access to the catalog.
    pub fn with_catalog<R>(&self, f: impl FnOnce(&Catalog) -> R) -> R {
        let catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&catalog)
    }

    /// Runs a closure with write access to the catalog.
    pub fn with_catalog_mut<R>(&self, f: impl FnOnce(&mut Catalog) -> R) -> R {
        let mut catalog = self.catalog.lock().expect("Catalog mutex poisoned");
        f(&mut catalog)
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new(Catalog::new())
    }
}

/// One embedded point-of-sale session.
pub struct PosSession {
    catalog: CatalogState,
    cart: CartState,
    checkout: CheckoutClient,
    config: StoreConfig,
}

impl PosSession {
    /// Builds a session over a seeded catalog, talking to the order
    /// service at `config.server_url`.
    pub fn new(catalog: Catalog, config: StoreConfig) -> Self {
        Self {
            catalog: CatalogState::new(catalog),
            cart: CartState::new(),
            checkout: CheckoutClient::new(config.server_url.clone()),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Current cart projection. Deterministic full rebuild; calling this
    /// twice without a mutation in between yields identical views.
    pub fn view_cart(&self) -> CartView {
        self.cart.with_cart(|cart| CartView::from(cart))
    }

    /// Case-insensitive product search for the listing panel. An empty
    /// query lists the whole catalog.
    pub fn filter_products(&self, query: &str) -> Vec<ProductView> {
        let results: Vec<ProductView> = self.catalog.with_catalog(|catalog| {
            catalog
                .filter(query)
                .into_iter()
                .map(ProductView::from)
                .collect()
        });
        debug!(query = %query, matches = results.len(), "Filtered products");
        results
    }

    /// Adds one unit of a listed product to the cart and returns the
    /// fresh view for re-rendering.
    pub fn add_to_cart(&self, product_id: i64) -> Result<CartView, ApiError> {
        let product = self
            .catalog
            .with_catalog(|catalog| catalog.get(product_id).cloned())
            .ok_or_else(|| ApiError::not_found("Product", &product_id.to_string()))?;

        self.cart.with_cart_mut(|cart| cart.add_product(&product))?;
        info!(product_id, name = %product.name, "Added to cart");
        Ok(self.view_cart())
    }

    /// Handles one scanner input.
    ///
    /// Empty input is a non-event and returns the unchanged view. An
    /// unknown code is a NOT_FOUND error. A known code behaves exactly
    /// like pressing the product's listing button, stock rules included;
    /// with duplicate barcodes only the first catalog match is added.
    pub fn scan_barcode(&self, code: &str) -> Result<CartView, ApiError> {
        if code.is_empty() {
            return Ok(self.view_cart());
        }

        let product = self
            .catalog
            .with_catalog(|catalog| catalog.find_by_barcode(code).cloned())
            .ok_or_else(|| ApiError::not_found("Product", code))?;

        self.cart.with_cart_mut(|cart| cart.add_product(&product))?;
        info!(code = %code, product_id = product.id, "Scanned into cart");
        Ok(self.view_cart())
    }

    /// Removes one unit of a product. Unknown ids are a silent no-op;
    /// either way the current view comes back.
    pub fn remove_one(&self, product_id: i64) -> CartView {
        let removed = self.cart.with_cart_mut(|cart| cart.remove_one(product_id));
        if removed {
            info!(product_id, "Removed one unit");
        }
        self.view_cart()
    }

    /// Submits the cart as an order.
    ///
    /// An empty cart fails locally; no request is issued. On
    /// [`CheckoutOutcome::Accepted`] the caller navigates to the order
    /// page; the cart is NOT cleared here. On
    /// [`CheckoutOutcome::Rejected`] and on transport failures the cart
    /// is untouched, so the cashier can fix the problem and retry.
    pub async fn checkout(
        &self,
        customer_name: &str,
        customer_phone: &str,
    ) -> Result<CheckoutOutcome, ApiError> {
        let items = self.cart.with_cart(|cart| cart.snapshot());
        if items.is_empty() {
            return Err(ApiError::validation("Cart is empty"));
        }

        let request = CheckoutRequest {
            cart: items,
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
        };

        let outcome = self.checkout.submit(&request).await?;
        if let CheckoutOutcome::Accepted { order_id } = &outcome {
            info!(
                order_id = *order_id,
                items = request.cart.len(),
                "Order completed"
            );
        }
        Ok(outcome)
    }

    /// Registers one product and returns its listing projection.
    pub fn register_product(&self, input: &NewProduct) -> Result<ProductView, ApiError> {
        let product = self.catalog.with_catalog_mut(|catalog| catalog.register(input))?;
        info!(product_id = product.id, barcode = %product.barcode, "Registered product");
        Ok(ProductView::from(&product))
    }

    /// Bulk-imports entries, skipping invalid rows and duplicate names.
    /// Returns how many products were added.
    pub fn import_products(&self, entries: &[NewProduct]) -> usize {
        let imported = self.catalog.with_catalog_mut(|catalog| catalog.import(entries));
        info!(imported, offered = entries.len(), "Imported products");
        imported
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::order_path;
    use crate::error::ErrorCode;
    use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
    use minimart_core::Product;
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    type CapturedRequest = Arc<Mutex<Option<CheckoutRequest>>>;
    type OrderServerState = (CapturedRequest, Value, StatusCode);

    async fn handle_order(
        State((captured, reply, status)): State<OrderServerState>,
        Json(payload): Json<CheckoutRequest>,
    ) -> (StatusCode, Json<Value>) {
        *captured.lock().unwrap() = Some(payload);
        (status, Json(reply))
    }

    async fn spawn_order_server(reply: Value, status: StatusCode) -> (String, CapturedRequest) {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        let captured: CapturedRequest = Arc::new(Mutex::new(None));
        let app = Router::new()
            .route("/create_order", post(handle_order))
            .with_state((captured.clone(), reply, status));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (format!("http://{addr}"), captured)
    }

    fn product(id: i64, name: &str, price: f64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price,
            stock,
            barcode: format!("{id:08}"),
        }
    }

    fn seeded_catalog() -> Catalog {
        Catalog::with_products(vec![
            product(1, "Jasmine Rice", 20000.0, 3),
            product(2, "Fish Sauce", 35000.0, 10),
            product(3, "Rice Paper", 15000.0, 0),
        ])
    }

    fn session_with_server(server_url: String) -> PosSession {
        let config = StoreConfig {
            server_url,
            ..StoreConfig::default()
        };
        PosSession::new(seeded_catalog(), config)
    }

    /// Session pointed at a port nothing listens on: any request issued
    /// by mistake turns into a CHECKOUT_ERROR instead of passing.
    fn offline_session() -> PosSession {
        session_with_server("http://127.0.0.1:9".to_string())
    }

    #[test]
    fn test_filter_products_projects_matches() {
        let session = offline_session();

        let all = session.filter_products("");
        assert_eq!(all.len(), 3);

        let rice: Vec<String> = session
            .filter_products("  RICE ")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(rice, vec!["Jasmine Rice", "Rice Paper"]);
    }

    #[test]
    fn test_add_to_cart_returns_fresh_view() {
        let session = offline_session();
        let view = session.add_to_cart(1).unwrap();

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].name, "Jasmine Rice");
        assert_eq!(view.rows[0].quantity, 1);
        assert_eq!(view.totals.total, 20000);
    }

    #[test]
    fn test_add_to_cart_unknown_id_is_not_found() {
        let session = offline_session();
        let err = session.add_to_cart(99).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_add_to_cart_propagates_stock_errors() {
        let session = offline_session();
        let err = session.add_to_cart(3).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.message, "Out of stock: Rice Paper");
        assert!(session.view_cart().rows.is_empty());
    }

    #[test]
    fn test_add_to_cart_stops_at_stock_limit() {
        let session = offline_session();
        for _ in 0..3 {
            session.add_to_cart(1).unwrap();
        }
        let err = session.add_to_cart(1).unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(session.view_cart().rows[0].quantity, 3);
    }

    #[test]
    fn test_scan_empty_code_is_noop() {
        let session = offline_session();
        session.add_to_cart(1).unwrap();

        let view = session.scan_barcode("").unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].quantity, 1);
    }

    #[test]
    fn test_scan_unknown_code_is_not_found() {
        let session = offline_session();
        let err = session.scan_barcode("99999999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 99999999");
    }

    #[test]
    fn test_scan_requires_exact_code() {
        let session = offline_session();
        // a 7-digit prefix would match via filter, but never via scan
        let err = session.scan_barcode("0000001").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        // codes are not trimmed on the way in
        let err = session.scan_barcode(" 00000001 ").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_scan_adds_exact_match() {
        let session = offline_session();
        let view = session.scan_barcode("00000001").unwrap();
        assert_eq!(view.rows[0].name, "Jasmine Rice");

        let view = session.scan_barcode("00000001").unwrap();
        assert_eq!(view.rows[0].quantity, 2);
    }

    #[test]
    fn test_remove_one_is_silent_for_unknown_id() {
        let session = offline_session();
        session.add_to_cart(1).unwrap();

        let view = session.remove_one(99);
        assert_eq!(view.rows.len(), 1);

        let view = session.remove_one(1);
        assert!(view.rows.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart_fails_locally() {
        // the offline session cannot complete any request, so a local
        // validation failure proves nothing was sent
        let session = offline_session();
        let err = session.checkout("Anh", "0901234567").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Cart is empty");
    }

    #[tokio::test]
    async fn test_checkout_accepted_flow() {
        let (base_url, captured) =
            spawn_order_server(json!({ "success": true, "order_id": 42 }), StatusCode::OK).await;
        let session = session_with_server(base_url);

        session.add_to_cart(1).unwrap();
        session.add_to_cart(1).unwrap();

        let outcome = session.checkout("Anh", "0901234567").await.unwrap();
        assert_eq!(outcome, CheckoutOutcome::Accepted { order_id: 42 });
        if let CheckoutOutcome::Accepted { order_id } = outcome {
            assert_eq!(order_path(order_id), "/order/42");
        }

        let seen = captured.lock().unwrap().take().unwrap();
        assert_eq!(seen.cart.len(), 1);
        assert_eq!(seen.cart[0].quantity, 2);
        assert_eq!(seen.customer_name, "Anh");

        // navigation is the caller's job; the cart is left as it was
        assert_eq!(session.view_cart().rows[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_checkout_rejected_keeps_cart() {
        let (base_url, _captured) = spawn_order_server(
            json!({ "error": "Out of stock: Jasmine Rice" }),
            StatusCode::BAD_REQUEST,
        )
        .await;
        let session = session_with_server(base_url);
        session.add_to_cart(1).unwrap();

        let outcome = session.checkout("Anh", "0901234567").await.unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::Rejected {
                message: "Out of stock: Jasmine Rice".to_string(),
            }
        );
        assert_eq!(session.view_cart().rows[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_checkout_transport_failure_maps_to_checkout_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let session = session_with_server(format!("http://{addr}"));
        session.add_to_cart(1).unwrap();

        let err = session.checkout("Anh", "0901234567").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CheckoutError);
        assert_eq!(err.message, "Could not reach the order service");
        assert_eq!(session.view_cart().rows[0].quantity, 1);
    }

    #[test]
    fn test_register_then_scan_roundtrip() {
        let session = offline_session();
        let view = session
            .register_product(&NewProduct::new("Noodles", 12000.0, 20))
            .unwrap();
        assert_eq!(view.id, 4);
        assert_eq!(view.barcode, "00000004");

        let cart = session.scan_barcode("00000004").unwrap();
        assert_eq!(cart.rows[0].name, "Noodles");
    }

    #[test]
    fn test_register_rejects_invalid_input() {
        let session = offline_session();
        let err = session
            .register_product(&NewProduct::new("", 12000.0, 20))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_import_through_session() {
        let session = offline_session();
        let imported = session.import_products(&[
            NewProduct::new("Jasmine Rice", 19000.0, 5), // already in the catalog
            NewProduct::new("Noodles", 12000.0, 20),
        ]);
        assert_eq!(imported, 1);
        assert_eq!(session.filter_products("noodles").len(), 1);
    }
}
