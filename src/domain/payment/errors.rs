//! Payment error taxonomy.
//!
//! One error type covers both call sites of the signature verifier plus the
//! persistence and gateway effects behind them, with HTTP status code mapping
//! and retryability semantics for the webhook path.

use axum::http::StatusCode;
use thiserror::Error;

use super::signature::SignatureError;

/// Errors that occur while processing payment requests.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// A gateway secret is missing from configuration. Operational
    /// misconfiguration, distinct from a forged request; fail closed.
    #[error("Payment gateway not configured")]
    GatewayNotConfigured,

    /// Webhook request arrived without a signature header.
    #[error("Missing webhook signature")]
    MissingSignature,

    /// Signature verification failed (malformed or mismatched).
    #[error("Invalid payment signature")]
    InvalidSignature,

    /// Failed to parse a request or webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Referenced order does not exist or belongs to another user.
    #[error("Order not found")]
    OrderNotFound,

    /// Order payment was already captured.
    #[error("Order already paid")]
    OrderAlreadyPaid,

    /// Request field failed validation.
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Gateway REST API call failed.
    #[error("Gateway request failed: {0}")]
    GatewayRequestFailed(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl PaymentError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn database(err: impl std::fmt::Display) -> Self {
        Self::Database(err.to_string())
    }

    pub fn gateway(err: impl std::fmt::Display) -> Self {
        Self::GatewayRequestFailed(err.to_string())
    }

    /// Returns true if the gateway should retry delivering a webhook that
    /// failed with this error. Signature failures must never be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::Database(_) | PaymentError::GatewayRequestFailed(_)
        )
    }

    /// Maps the error to an HTTP status code.
    ///
    /// Verification failures are authentication-style rejections (401);
    /// configuration absence is a 500 so operators notice, never a silent
    /// pass.
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaymentError::GatewayNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            PaymentError::MissingSignature | PaymentError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            PaymentError::ParseError(_)
            | PaymentError::OrderAlreadyPaid
            | PaymentError::Validation { .. } => StatusCode::BAD_REQUEST,
            PaymentError::OrderNotFound => StatusCode::NOT_FOUND,
            PaymentError::GatewayRequestFailed(_) => StatusCode::BAD_GATEWAY,
            PaymentError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code for response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::GatewayNotConfigured => "PAYMENT_CONFIG_ERROR",
            PaymentError::MissingSignature => "MISSING_SIGNATURE",
            PaymentError::InvalidSignature => "INVALID_SIGNATURE",
            PaymentError::ParseError(_) => "PARSE_ERROR",
            PaymentError::OrderNotFound => "ORDER_NOT_FOUND",
            PaymentError::OrderAlreadyPaid => "ORDER_ALREADY_PAID",
            PaymentError::Validation { .. } => "VALIDATION_ERROR",
            PaymentError::GatewayRequestFailed(_) => "PAYMENT_ORDER_FAILED",
            PaymentError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<SignatureError> for PaymentError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::MissingSecret => PaymentError::GatewayNotConfigured,
            SignatureError::Malformed | SignatureError::Mismatch => PaymentError::InvalidSignature,
        }
    }
}
