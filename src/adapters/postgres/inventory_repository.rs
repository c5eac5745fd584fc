//! PostgreSQL implementation of InventoryReserver.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::payment::PaymentError;
use crate::ports::InventoryReserver;

/// Bumps `reserved_quantity` for every line item of a paid order in a single
/// statement, so a crash between items cannot leave the reservation half
/// applied. Stock itself is only decremented later, at fulfilment.
const RESERVE_SQL: &str = r#"
    UPDATE inventory i
    SET reserved_quantity = i.reserved_quantity + oi.quantity,
        updated_at = NOW()
    FROM order_items oi
    WHERE oi.order_id = $1
      AND oi.product_id = i.product_id
"#;

/// PostgreSQL implementation of the InventoryReserver port.
pub struct PostgresInventoryReserver {
    pool: PgPool,
}

impl PostgresInventoryReserver {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryReserver for PostgresInventoryReserver {
    async fn reserve_for_order(&self, order_id: Uuid) -> Result<(), PaymentError> {
        let result = sqlx::query(RESERVE_SQL)
            .bind(order_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PaymentError::database(format!("Failed to reserve inventory: {}", e)))?;

        tracing::debug!(
            order_id = %order_id,
            items_reserved = result.rows_affected(),
            "Reserved inventory for paid order"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_bumps_reserved_quantity_without_touching_stock() {
        // Reservation is bookkeeping on reserved_quantity; it must not
        // decrement or clamp the stock columns.
        assert!(RESERVE_SQL.contains("reserved_quantity = i.reserved_quantity + oi.quantity"));
        assert!(!RESERVE_SQL.contains("stock_quantity"));
        assert!(!RESERVE_SQL.contains("GREATEST"));
    }
}
