//! Gateway webhook payload types.
//!
//! These mirror the JSON the gateway posts to the webhook endpoint. They are
//! only ever constructed by parsing a payload whose signature has already
//! been verified over the raw bytes.

use serde::Deserialize;

use super::errors::PaymentError;

/// Webhook event kinds this service acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEventKind {
    /// Payment was captured; the order can be confirmed.
    PaymentCaptured,
    /// Payment attempt failed.
    PaymentFailed,
    /// Gateway order fully paid (treated like a capture).
    OrderPaid,
    /// Any other event; acknowledged but not processed.
    Unknown(String),
}

/// A webhook event as delivered by the gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayWebhookEvent {
    /// Dotted event name, e.g. `payment.captured`.
    pub event: String,

    #[serde(default)]
    pub payload: WebhookPayload,
}

/// Entity container: the gateway nests every object under an `entity` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity<T> {
    pub entity: T,
}

/// Event payload carrying the affected payment and/or order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    pub payment: Option<Entity<PaymentEntity>>,
    pub order: Option<Entity<OrderEntity>>,
}

/// Payment object inside a webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentEntity {
    /// Gateway payment ID (pay_...).
    pub id: String,

    /// Gateway order ID this payment belongs to (order_...).
    pub order_id: Option<String>,

    /// Gateway-side payment status, e.g. `captured` or `failed`.
    pub status: String,

    /// Amount in minor currency units.
    #[serde(default)]
    pub amount: i64,
}

/// Order object inside a webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderEntity {
    /// Gateway order ID (order_...).
    pub id: String,

    /// Amount in minor currency units.
    #[serde(default)]
    pub amount: i64,

    pub status: Option<String>,
}

impl GatewayWebhookEvent {
    /// Parses a verified raw payload.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::ParseError` on malformed JSON. The error text
    /// is logged server-side, never echoed to the gateway.
    pub fn parse(payload: &[u8]) -> Result<Self, PaymentError> {
        serde_json::from_slice(payload).map_err(|e| PaymentError::ParseError(e.to_string()))
    }

    pub fn kind(&self) -> GatewayEventKind {
        match self.event.as_str() {
            "payment.captured" => GatewayEventKind::PaymentCaptured,
            "payment.failed" => GatewayEventKind::PaymentFailed,
            "order.paid" => GatewayEventKind::OrderPaid,
            other => GatewayEventKind::Unknown(other.to_string()),
        }
    }

    /// Gateway order ID the event refers to, taken from the order entity if
    /// present, otherwise from the payment entity.
    pub fn gateway_order_id(&self) -> Option<&str> {
        self.payload
            .order
            .as_ref()
            .map(|o| o.entity.id.as_str())
            .or_else(|| {
                self.payload
                    .payment
                    .as_ref()
                    .and_then(|p| p.entity.order_id.as_deref())
            })
    }

    pub fn payment(&self) -> Option<&PaymentEntity> {
        self.payload.payment.as_ref().map(|p| &p.entity)
    }
}
