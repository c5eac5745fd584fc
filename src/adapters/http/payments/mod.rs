//! HTTP adapter for payment endpoints.
//!
//! Exposes the payment flow via REST API:
//! - `POST /api/payments/create-order` - Create a gateway checkout order
//! - `POST /api/payments/verify` - Verify a redirect-path payment signature
//! - `POST /api/webhooks/razorpay` - Handle gateway webhooks

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{AuthenticatedUser, PaymentApiError, PaymentsAppState};
pub use routes::{payments_router, payments_routes, webhook_routes};
