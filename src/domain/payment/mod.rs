//! Payment domain: signature verification, gateway events, error taxonomy.

mod errors;
mod gateway_event;
mod signature;

pub use errors::PaymentError;
pub use gateway_event::{
    Entity, GatewayEventKind, GatewayWebhookEvent, OrderEntity, PaymentEntity, WebhookPayload,
};
pub use signature::{checkout_message, SignatureError, SignatureVerifier, SIGNATURE_HEX_LEN};
