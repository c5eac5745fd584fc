//! Razorpay REST API client.
//!
//! Implements the `PaymentGateway` trait for Razorpay's Orders API.
//! Signature verification does not live here; it is a pure domain
//! computation (`SignatureVerifier`) with no HTTP involved.
//!
//! # Security
//!
//! - Key secret handled via `secrecy::SecretString`, sent only as HTTP
//!   basic auth to the gateway
//! - The secret never appears in logs or error messages

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::collections::HashMap;

use crate::domain::payment::PaymentError;
use crate::ports::{CreateGatewayOrderRequest, GatewayOrder, PaymentGateway};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayConfig {
    /// Public key ID (rzp_test_... or rzp_live_...).
    key_id: String,

    /// Key secret, used as the basic auth password.
    key_secret: SecretString,

    /// Base URL for the Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,
}

impl RazorpayConfig {
    /// Create a new Razorpay configuration.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Razorpay gateway adapter.
///
/// Implements `PaymentGateway` against the Razorpay Orders API.
pub struct RazorpayClient {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

/// JSON body for POST /v1/orders.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a HashMap<String, String>,
}

impl RazorpayClient {
    /// Create a new Razorpay client with the given configuration.
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(
        &self,
        request: CreateGatewayOrderRequest,
    ) -> Result<GatewayOrder, PaymentError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);
        let body = CreateOrderBody {
            amount: request.amount,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::gateway(format!("Order creation request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(
                status = %status,
                detail = %detail,
                "Gateway rejected order creation"
            );
            return Err(PaymentError::gateway(format!(
                "Gateway returned {}",
                status
            )));
        }

        response
            .json::<GatewayOrder>()
            .await
            .map_err(|e| PaymentError::gateway(format!("Invalid order response: {}", e)))
    }

    fn key_id(&self) -> &str {
        &self.config.key_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_exposes_key_id_but_not_secret() {
        let config = RazorpayConfig::new("rzp_test_abc", "secret_value");
        let client = RazorpayClient::new(config);
        assert_eq!(client.key_id(), "rzp_test_abc");
    }

    #[test]
    fn base_url_override_is_applied() {
        let config =
            RazorpayConfig::new("rzp_test_abc", "secret_value").with_base_url("http://localhost:9");
        assert_eq!(config.api_base_url, "http://localhost:9");
    }
}
