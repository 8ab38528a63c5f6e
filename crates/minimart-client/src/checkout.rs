//! # Checkout
//!
//! Order submission to the backend. The wire contract is small and
//! body-driven:
//!
//! - `POST {base_url}/create_order` with `{ cart, customer_name,
//!   customer_phone }`
//! - an accepted order replies `{ "success": true, "order_id": N }`
//! - a rejected order replies `{ "error": "message" }` with HTTP 400
//!
//! The BODY decides the branch, not the status code. Rejections are data
//! ([`CheckoutOutcome::Rejected`]), not errors; [`CheckoutError`] covers
//! transport failures and replies matching neither known shape.
//!
//! ## Deliberate gaps
//! No retry, no timeout beyond the client defaults, no idempotency key.
//! Nothing stops a double submission from creating two orders; a host
//! that cares must debounce before calling [`CheckoutClient::submit`].

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use ts_rs::TS;

use minimart_core::cart::CartItem;

/// Path of the order page for an accepted order.
pub fn order_path(order_id: i64) -> String {
    format!("/order/{order_id}")
}

/// Wire body for order submission.
///
/// Customer fields are passed through verbatim; the backend owns any
/// cleanup of what the cashier typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    pub cart: Vec<CartItem>,
    pub customer_name: String,
    pub customer_phone: String,
}

/// Superset of the reply shapes the order endpoint produces.
#[derive(Debug, Deserialize)]
struct OrderReply {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    order_id: Option<i64>,
}

/// What the order endpoint decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CheckoutOutcome {
    /// The order exists; navigate to [`order_path`] of `order_id`.
    #[serde(rename_all = "camelCase")]
    Accepted { order_id: i64 },
    /// The backend refused the order. Show `message` to the cashier; the
    /// cart must stay as it was.
    Rejected { message: String },
}

/// Failures where no usable reply existed at all.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The request could not be sent, or the connection broke mid-reply.
    #[error("order request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered, but the body matched neither the accepted
    /// nor the rejected shape (undecodable bodies included).
    #[error("order endpoint returned an unrecognized reply")]
    MalformedReply,
}

/// HTTP client for the order endpoint.
#[derive(Debug, Clone)]
pub struct CheckoutClient {
    http: Client,
    base_url: String,
}

impl CheckoutClient {
    /// `base_url` without a trailing slash, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Submits an order and classifies the reply.
    ///
    /// ## Returns
    /// - `Ok(Accepted)` when the reply carries an order id
    /// - `Ok(Rejected)` when the reply carries an error message
    /// - `Err(Transport)` when sending or reading the reply failed
    /// - `Err(MalformedReply)` for bodies matching neither shape
    pub async fn submit(
        &self,
        request: &CheckoutRequest,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        debug!(items = request.cart.len(), "Submitting order");

        let response = self
            .http
            .post(format!("{}/create_order", self.base_url))
            .json(request)
            .send()
            .await?;

        // Rejections arrive as HTTP 400 with a meaningful JSON body, so
        // the body is read before any status-based handling. A connection
        // that breaks mid-body is a transport failure, not a bad reply.
        let bytes = response.bytes().await?;
        let reply: OrderReply =
            serde_json::from_slice(&bytes).map_err(|_| CheckoutError::MalformedReply)?;

        if let Some(message) = reply.error {
            info!(message = %message, "Order rejected by backend");
            return Ok(CheckoutOutcome::Rejected { message });
        }

        match reply.order_id {
            Some(order_id) => {
                info!(order_id, "Order accepted");
                Ok(CheckoutOutcome::Accepted { order_id })
            }
            None => Err(CheckoutError::MalformedReply),
        }
    }
}
