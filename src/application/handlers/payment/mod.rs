//! Payment command handlers.

mod create_payment_order;
mod process_webhook;
mod verify_payment;

pub use create_payment_order::{
    CreatePaymentOrderCommand, CreatePaymentOrderHandler, CreatePaymentOrderResult,
};
pub use process_webhook::{ProcessWebhookCommand, ProcessWebhookHandler, ProcessWebhookResult};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
