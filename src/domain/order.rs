//! Order state as seen by the payments service.
//!
//! Orders are created and owned by the storefront; this service only reads
//! them and advances their payment state after signature verification.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
        }
    }
}

/// Fulfilment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

/// Snapshot of an order row relevant to payment processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,

    /// Human-facing order number, used as the gateway receipt.
    pub order_number: String,

    pub user_id: Uuid,

    /// Total in minor currency units.
    pub amount_minor: i64,

    pub currency: String,

    pub status: OrderStatus,

    pub payment_status: PaymentStatus,

    /// Gateway order ID once checkout has started (order_...).
    pub gateway_order_id: Option<String>,

    /// Gateway payment ID once payment is captured (pay_...).
    pub gateway_payment_id: Option<String>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(payment_status: PaymentStatus) -> Order {
        Order {
            id: Uuid::new_v4(),
            order_number: "VRD-1042".to_string(),
            user_id: Uuid::new_v4(),
            amount_minor: 24900,
            currency: "INR".to_string(),
            status: OrderStatus::Pending,
            payment_status,
            gateway_order_id: None,
            gateway_payment_id: None,
        }
    }

    #[test]
    fn is_paid_reflects_payment_status() {
        assert!(!order(PaymentStatus::Pending).is_paid());
        assert!(order(PaymentStatus::Paid).is_paid());
        assert!(!order(PaymentStatus::Failed).is_paid());
    }

    #[test]
    fn status_strings_round_trip_with_db_values() {
        assert_eq!(PaymentStatus::Paid.as_str(), "paid");
        assert_eq!(OrderStatus::Confirmed.as_str(), "confirmed");
    }
}
