//! CreatePaymentOrderHandler - gateway checkout order creation.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::payment::PaymentError;
use crate::ports::{CreateGatewayOrderRequest, OrderRepository, PaymentGateway};

/// Command to open a gateway checkout for an existing order.
///
/// Amount, currency and receipt are read from the stored order, never from
/// the caller; the stored row is the single source of truth for the price.
#[derive(Debug, Clone)]
pub struct CreatePaymentOrderCommand {
    /// Authenticated user the order must belong to.
    pub user_id: Uuid,
    /// Internal order ID.
    pub order_id: Uuid,
    /// Caller-supplied metadata, echoed back in webhooks. Cannot override
    /// the identity keys set by the handler.
    pub notes: HashMap<String, String>,
}

/// Everything the browser checkout widget needs.
#[derive(Debug, Clone)]
pub struct CreatePaymentOrderResult {
    pub order_id: Uuid,
    pub gateway_order_id: String,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: String,
    /// Public gateway key ID.
    pub key_id: String,
}

/// Handler for gateway order creation.
pub struct CreatePaymentOrderHandler {
    orders: Arc<dyn OrderRepository>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentOrderHandler {
    pub fn new(orders: Arc<dyn OrderRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { orders, gateway }
    }

    pub async fn handle(
        &self,
        cmd: CreatePaymentOrderCommand,
    ) -> Result<CreatePaymentOrderResult, PaymentError> {
        let order = self
            .orders
            .find_for_user(cmd.order_id, cmd.user_id)
            .await?
            .ok_or(PaymentError::OrderNotFound)?;

        if order.is_paid() {
            return Err(PaymentError::OrderAlreadyPaid);
        }
        if order.amount_minor <= 0 {
            return Err(PaymentError::validation("amount", "must be positive"));
        }

        // Caller notes first; identity keys are written last and win.
        let mut notes = cmd.notes;
        notes.insert("order_id".to_string(), order.id.to_string());
        notes.insert("order_number".to_string(), order.order_number.clone());
        notes.insert("user_id".to_string(), order.user_id.to_string());

        let gateway_order = self
            .gateway
            .create_order(CreateGatewayOrderRequest {
                amount: order.amount_minor,
                currency: order.currency.clone(),
                receipt: order.order_number.clone(),
                notes,
            })
            .await?;

        self.orders
            .set_gateway_order(order.id, &gateway_order.id)
            .await?;

        tracing::info!(
            order_id = %order.id,
            gateway_order_id = %gateway_order.id,
            amount = gateway_order.amount,
            "Created gateway order"
        );

        Ok(CreatePaymentOrderResult {
            order_id: order.id,
            gateway_order_id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            key_id: self.gateway.key_id().to_string(),
        })
    }
}
