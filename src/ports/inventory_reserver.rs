//! Inventory reservation port.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::payment::PaymentError;

/// Reserves stock for a confirmed order.
///
/// Invoked only after an order has been verified as paid. Reservation is a
/// best-effort collaborator concern: the payment itself is already settled.
#[async_trait]
pub trait InventoryReserver: Send + Sync {
    /// Bump `reserved_quantity` for every line item of the order.
    async fn reserve_for_order(&self, order_id: Uuid) -> Result<(), PaymentError>;
}
