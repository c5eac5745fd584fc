//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! These types define the JSON request/response structure for the payment API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::application::handlers::payment::{CreatePaymentOrderResult, VerifyPaymentResult};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a gateway checkout order for an existing order.
///
/// Amount, currency and receipt are derived from the stored order, never
/// taken from the request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentOrderRequest {
    /// Internal order ID to pay for.
    pub order_id: Uuid,

    /// Optional metadata echoed back in webhooks.
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

/// Request to verify a redirect-path payment.
///
/// Field names match what the gateway's browser checkout hands back.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    /// Internal order ID.
    pub order_id: Uuid,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Everything the browser checkout widget needs to open.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutOrderResponse {
    /// Internal order ID.
    pub order_id: Uuid,
    /// Gateway order ID (order_...).
    pub gateway_order_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
    /// Public gateway key ID.
    pub key_id: String,
}

impl From<CreatePaymentOrderResult> for CheckoutOrderResponse {
    fn from(result: CreatePaymentOrderResult) -> Self {
        Self {
            order_id: result.order_id,
            gateway_order_id: result.gateway_order_id,
            amount: result.amount,
            currency: result.currency,
            key_id: result.key_id,
        }
    }
}

/// Response for a verified payment.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
    pub order_id: Uuid,
    pub gateway_payment_id: String,
}

impl From<VerifyPaymentResult> for VerifyPaymentResponse {
    fn from(result: VerifyPaymentResult) -> Self {
        Self {
            verified: true,
            order_id: result.order_id,
            gateway_payment_id: result.gateway_payment_id,
        }
    }
}

/// Webhook acknowledgement body.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub status: &'static str,
}

impl WebhookAckResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
