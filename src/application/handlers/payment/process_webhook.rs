//! ProcessWebhookHandler - gateway webhook processing.
//!
//! Verification runs over the exact raw bytes received, with the dedicated
//! webhook secret, before any JSON parsing. The two steps must not be
//! reordered: re-serializing the body can change key order or whitespace
//! and would invalidate the signature.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::payment::{
    GatewayEventKind, GatewayWebhookEvent, PaymentError, SignatureVerifier,
};
use crate::ports::{InventoryReserver, OrderRepository};

/// Command carrying the raw webhook request.
#[derive(Debug, Clone)]
pub struct ProcessWebhookCommand {
    /// Raw request body, untouched.
    pub payload: Vec<u8>,
    /// Value of the signature header, if present.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone)]
pub enum ProcessWebhookResult {
    /// Payment captured, order marked paid and inventory reserved.
    OrderConfirmed {
        order_id: Uuid,
        gateway_payment_id: String,
    },
    /// Payment attempt failed, order payment marked failed.
    PaymentMarkedFailed { order_id: Uuid },
    /// Known event, nothing to do (no matching order, already paid, or
    /// payment not yet captured).
    Acknowledged,
    /// Unknown event type, acknowledged so the gateway stops retrying.
    Ignored,
}

/// Handler for gateway webhook events.
pub struct ProcessWebhookHandler {
    orders: Arc<dyn OrderRepository>,
    inventory: Arc<dyn InventoryReserver>,
    verifier: Arc<SignatureVerifier>,
}

impl ProcessWebhookHandler {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        inventory: Arc<dyn InventoryReserver>,
        verifier: Arc<SignatureVerifier>,
    ) -> Self {
        Self {
            orders,
            inventory,
            verifier,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProcessWebhookCommand,
    ) -> Result<ProcessWebhookResult, PaymentError> {
        let signature = cmd.signature.ok_or(PaymentError::MissingSignature)?;

        // 1. Verify over raw bytes.
        self.verifier.verify(&cmd.payload, &signature).map_err(|e| {
            tracing::warn!(error = %e, "Webhook signature verification failed");
            PaymentError::from(e)
        })?;

        // 2. Only now parse.
        let event = GatewayWebhookEvent::parse(&cmd.payload)?;

        match event.kind() {
            GatewayEventKind::PaymentCaptured | GatewayEventKind::OrderPaid => {
                self.confirm_order(&event).await
            }
            GatewayEventKind::PaymentFailed => self.mark_payment_failed(&event).await,
            GatewayEventKind::Unknown(name) => {
                tracing::info!(event = %name, "Ignoring unhandled webhook event");
                Ok(ProcessWebhookResult::Ignored)
            }
        }
    }

    async fn confirm_order(
        &self,
        event: &GatewayWebhookEvent,
    ) -> Result<ProcessWebhookResult, PaymentError> {
        // payment.captured carries the payment entity; only a captured
        // payment confirms the order.
        if let Some(payment) = event.payment() {
            if event.kind() == GatewayEventKind::PaymentCaptured && payment.status != "captured" {
                tracing::info!(
                    gateway_payment_id = %payment.id,
                    status = %payment.status,
                    "Capture event without captured status, acknowledging"
                );
                return Ok(ProcessWebhookResult::Acknowledged);
            }
        }

        let gateway_order_id = event
            .gateway_order_id()
            .ok_or_else(|| PaymentError::ParseError("event missing order reference".into()))?;

        let Some(order) = self.orders.find_by_gateway_order(gateway_order_id).await? else {
            tracing::info!(
                gateway_order_id = %gateway_order_id,
                "Webhook for unknown gateway order, acknowledging"
            );
            return Ok(ProcessWebhookResult::Acknowledged);
        };

        // Redelivery of an already-processed event.
        if order.is_paid() {
            return Ok(ProcessWebhookResult::Acknowledged);
        }

        let gateway_payment_id = event
            .payment()
            .map(|p| p.id.clone())
            .or_else(|| order.gateway_payment_id.clone())
            .unwrap_or_default();

        self.orders.mark_paid(order.id, &gateway_payment_id).await?;
        self.inventory.reserve_for_order(order.id).await?;

        tracing::info!(
            order_id = %order.id,
            gateway_order_id = %gateway_order_id,
            gateway_payment_id = %gateway_payment_id,
            "Webhook confirmed order"
        );

        Ok(ProcessWebhookResult::OrderConfirmed {
            order_id: order.id,
            gateway_payment_id,
        })
    }

    async fn mark_payment_failed(
        &self,
        event: &GatewayWebhookEvent,
    ) -> Result<ProcessWebhookResult, PaymentError> {
        let gateway_order_id = event
            .gateway_order_id()
            .ok_or_else(|| PaymentError::ParseError("event missing order reference".into()))?;

        let Some(order) = self.orders.find_by_gateway_order(gateway_order_id).await? else {
            return Ok(ProcessWebhookResult::Acknowledged);
        };

        self.orders.mark_payment_failed(order.id).await?;

        tracing::info!(
            order_id = %order.id,
            gateway_order_id = %gateway_order_id,
            "Webhook marked payment failed"
        );

        Ok(ProcessWebhookResult::PaymentMarkedFailed { order_id: order.id })
    }
}
