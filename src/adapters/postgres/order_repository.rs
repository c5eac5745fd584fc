//! PostgreSQL implementation of OrderRepository.
//!
//! Provides persistent storage for orders using PostgreSQL.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::order::{Order, OrderStatus, PaymentStatus};
use crate::domain::payment::PaymentError;
use crate::ports::OrderRepository;

/// PostgreSQL implementation of the OrderRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    /// Creates a new PostgresOrderRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an order.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    order_number: String,
    user_id: Uuid,
    amount: i64,
    currency: String,
    status: String,
    payment_status: String,
    razorpay_order_id: Option<String>,
    razorpay_payment_id: Option<String>,
}

impl TryFrom<OrderRow> for Order {
    type Error = PaymentError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = parse_order_status(&row.status)?;
        let payment_status = parse_payment_status(&row.payment_status)?;

        Ok(Order {
            id: row.id,
            order_number: row.order_number,
            user_id: row.user_id,
            amount_minor: row.amount,
            currency: row.currency,
            status,
            payment_status,
            gateway_order_id: row.razorpay_order_id,
            gateway_payment_id: row.razorpay_payment_id,
        })
    }
}

fn parse_order_status(s: &str) -> Result<OrderStatus, PaymentError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(OrderStatus::Pending),
        "confirmed" => Ok(OrderStatus::Confirmed),
        "cancelled" => Ok(OrderStatus::Cancelled),
        _ => Err(PaymentError::database(format!(
            "Invalid order status value: {}",
            s
        ))),
    }
}

fn parse_payment_status(s: &str) -> Result<PaymentStatus, PaymentError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(PaymentStatus::Pending),
        "paid" => Ok(PaymentStatus::Paid),
        "failed" => Ok(PaymentStatus::Failed),
        _ => Err(PaymentError::database(format!(
            "Invalid payment status value: {}",
            s
        ))),
    }
}

const SELECT_ORDER: &str = r#"
    SELECT id, order_number, user_id, amount, currency, status,
           payment_status, razorpay_order_id, razorpay_payment_id
    FROM orders
"#;

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_for_user(
        &self,
        order_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Order>, PaymentError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("{} WHERE id = $1 AND user_id = $2", SELECT_ORDER))
                .bind(order_id)
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PaymentError::database(format!("Failed to load order: {}", e)))?;

        row.map(Order::try_from).transpose()
    }

    async fn find_by_gateway_order(
        &self,
        gateway_order_id: &str,
    ) -> Result<Option<Order>, PaymentError> {
        let row: Option<OrderRow> =
            sqlx::query_as(&format!("{} WHERE razorpay_order_id = $1", SELECT_ORDER))
                .bind(gateway_order_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| PaymentError::database(format!("Failed to load order: {}", e)))?;

        row.map(Order::try_from).transpose()
    }

    async fn set_gateway_order(
        &self,
        order_id: Uuid,
        gateway_order_id: &str,
    ) -> Result<(), PaymentError> {
        sqlx::query(
            r#"
            UPDATE orders
            SET razorpay_order_id = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .bind(gateway_order_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PaymentError::database(format!("Failed to store gateway order: {}", e)))?;

        Ok(())
    }

    async fn mark_paid(&self, order_id: Uuid, gateway_payment_id: &str) -> Result<(), PaymentError> {
        let result = sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = 'paid',
                status = 'confirmed',
                razorpay_payment_id = $2,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .bind(gateway_payment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PaymentError::database(format!("Failed to mark order paid: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(PaymentError::OrderNotFound);
        }
        Ok(())
    }

    async fn mark_payment_failed(&self, order_id: Uuid) -> Result<(), PaymentError> {
        sqlx::query(
            r#"
            UPDATE orders
            SET payment_status = 'failed', updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(order_id)
        .execute(&self.pool)
        .await
        .map_err(|e| PaymentError::database(format!("Failed to mark payment failed: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(parse_order_status("pending").unwrap(), OrderStatus::Pending);
        assert_eq!(
            parse_order_status("Confirmed").unwrap(),
            OrderStatus::Confirmed
        );
        assert_eq!(
            parse_payment_status("paid").unwrap(),
            PaymentStatus::Paid
        );
        assert_eq!(
            parse_payment_status("FAILED").unwrap(),
            PaymentStatus::Failed
        );
    }

    #[test]
    fn unknown_status_is_a_database_error() {
        assert!(matches!(
            parse_order_status("shipped"),
            Err(PaymentError::Database(_))
        ));
        assert!(matches!(
            parse_payment_status("refunded"),
            Err(PaymentError::Database(_))
        ));
    }

    #[test]
    fn row_converts_to_order() {
        let row = OrderRow {
            id: Uuid::new_v4(),
            order_number: "VRD-1042".to_string(),
            user_id: Uuid::new_v4(),
            amount: 24900,
            currency: "INR".to_string(),
            status: "pending".to_string(),
            payment_status: "pending".to_string(),
            razorpay_order_id: Some("order_1".to_string()),
            razorpay_payment_id: None,
        };

        let order = Order::try_from(row).unwrap();
        assert_eq!(order.amount_minor, 24900);
        assert_eq!(order.gateway_order_id.as_deref(), Some("order_1"));
        assert!(!order.is_paid());
    }
}
