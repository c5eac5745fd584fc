//! Payment gateway port for checkout order creation.
//!
//! Signature verification deliberately does not live behind this port: it is
//! a pure domain computation (`SignatureVerifier`), not a gateway call.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::payment::PaymentError;

/// Port for the gateway's REST API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a gateway order against which the customer pays.
    async fn create_order(
        &self,
        request: CreateGatewayOrderRequest,
    ) -> Result<GatewayOrder, PaymentError>;

    /// Public key ID the browser checkout widget needs.
    fn key_id(&self) -> &str;
}

/// Request to create a gateway order.
#[derive(Debug, Clone, Serialize)]
pub struct CreateGatewayOrderRequest {
    /// Amount in minor currency units.
    pub amount: i64,

    /// ISO currency code.
    pub currency: String,

    /// Merchant receipt reference (our order number).
    pub receipt: String,

    /// Opaque metadata echoed back in webhooks.
    pub notes: HashMap<String, String>,
}

/// Order as created at the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    /// Gateway order ID (order_...).
    pub id: String,

    pub amount: i64,

    pub currency: String,

    /// Gateway-side status, `created` for a fresh order.
    pub status: String,
}
