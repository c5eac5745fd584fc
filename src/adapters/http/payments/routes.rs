//! Axum router configuration for payment endpoints.
//!
//! This module defines the route structure for payment-related API endpoints
//! and wires them to their corresponding handlers.

use axum::{routing::post, Router};

use super::handlers::{
    create_payment_order, handle_gateway_webhook, verify_payment, PaymentsAppState,
};

/// Create the payment API router.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `POST /create-order` - Create a gateway checkout order
/// - `POST /verify` - Verify a redirect-path payment signature
pub fn payments_routes() -> Router<PaymentsAppState> {
    Router::new()
        .route("/create-order", post(create_payment_order))
        .route("/verify", post(verify_payment))
}

/// Create the gateway webhook router.
///
/// This is separate from the main payment routes because webhooks don't
/// require user authentication (they're verified via signature).
///
/// # Routes
/// - `POST /razorpay` - Handle gateway webhooks
pub fn webhook_routes() -> Router<PaymentsAppState> {
    Router::new().route("/razorpay", post(handle_gateway_webhook))
}

/// Create the complete payment module router.
///
/// Combines user routes and webhook routes into a single router suitable
/// for mounting at `/api`.
pub fn payments_router() -> Router<PaymentsAppState> {
    Router::new()
        .nest("/payments", payments_routes())
        .nest("/webhooks", webhook_routes())
}
