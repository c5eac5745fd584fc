//! VerifyPaymentHandler - client-redirect payment verification.
//!
//! The browser returns from the gateway's hosted checkout carrying a
//! signature over `{gateway_order_id}|{gateway_payment_id}`. Verification is
//! a hard gate: nothing is mutated until the signature checks out.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::payment::{PaymentError, SignatureVerifier};
use crate::ports::{InventoryReserver, OrderRepository};

/// Command to verify a redirect-path payment.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    /// Authenticated user the order must belong to.
    pub user_id: Uuid,
    /// Internal order ID.
    pub order_id: Uuid,
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

/// Result of a successful verification.
#[derive(Debug, Clone)]
pub struct VerifyPaymentResult {
    pub order_id: Uuid,
    pub gateway_payment_id: String,
}

/// Handler for redirect-path payment verification.
pub struct VerifyPaymentHandler {
    orders: Arc<dyn OrderRepository>,
    inventory: Arc<dyn InventoryReserver>,
    verifier: Arc<SignatureVerifier>,
}

impl VerifyPaymentHandler {
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
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, PaymentError> {
        // Configuration is checked before the request is even looked at: an
        // operator error must surface as such, not as a field complaint.
        if !self.verifier.is_configured() {
            return Err(PaymentError::GatewayNotConfigured);
        }

        if cmd.gateway_order_id.is_empty() {
            return Err(PaymentError::validation("gateway_order_id", "is required"));
        }
        if cmd.gateway_payment_id.is_empty() {
            return Err(PaymentError::validation("gateway_payment_id", "is required"));
        }
        if cmd.gateway_signature.is_empty() {
            return Err(PaymentError::validation("gateway_signature", "is required"));
        }

        // Hard gate: no state mutation on any verification failure.
        self.verifier
            .verify_checkout(
                &cmd.gateway_order_id,
                &cmd.gateway_payment_id,
                &cmd.gateway_signature,
            )
            .map_err(|e| {
                tracing::warn!(
                    gateway_order_id = %cmd.gateway_order_id,
                    gateway_payment_id = %cmd.gateway_payment_id,
                    order_id = %cmd.order_id,
                    error = %e,
                    "Payment signature verification failed"
                );
                PaymentError::from(e)
            })?;

        let order = self
            .orders
            .find_for_user(cmd.order_id, cmd.user_id)
            .await?
            .ok_or(PaymentError::OrderNotFound)?;

        // Gateway redelivery or a double-submitted redirect: the payment is
        // already settled, do not reserve inventory twice.
        if order.is_paid() {
            return Ok(VerifyPaymentResult {
                order_id: order.id,
                gateway_payment_id: cmd.gateway_payment_id,
            });
        }

        self.orders
            .mark_paid(order.id, &cmd.gateway_payment_id)
            .await?;
        self.inventory.reserve_for_order(order.id).await?;

        tracing::info!(
            order_id = %order.id,
            gateway_payment_id = %cmd.gateway_payment_id,
            "Payment verified, order confirmed"
        );

        Ok(VerifyPaymentResult {
            order_id: order.id,
            gateway_payment_id: cmd.gateway_payment_id,
        })
    }
}
