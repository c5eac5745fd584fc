//! Order repository port.
//!
//! The storefront owns the orders table; this port exposes only the reads
//! and state transitions payment processing needs. All mutations are gated
//! behind successful signature verification at the call site.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::Order;
use crate::domain::payment::PaymentError;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Find an order by ID, scoped to its owner.
    ///
    /// Returns `None` when the order does not exist or belongs to a
    /// different user; callers cannot distinguish the two.
    async fn find_for_user(
        &self,
        order_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Order>, PaymentError>;

    /// Find an order by the gateway's order ID (webhook path).
    async fn find_by_gateway_order(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, PaymentError>;

    /// Attach a freshly created gateway order ID to an order.
    async fn set_gateway_order(
        &self,
        order_id: Uuid,
        gateway_order_id: &str,
    ) -> Result<(), PaymentError>;

    /// Mark an order paid and confirmed, recording the gateway payment ID.
    async fn mark_paid(&self, order_id: Uuid, gateway_payment_id: &str)
        -> Result<(), PaymentError>;

    /// Mark an order's payment attempt as failed.
    async fn mark_payment_failed(&self, order_id: Uuid) -> Result<(), PaymentError>;
}
