//! Domain layer: payment verification core and order state types.

pub mod order;
pub mod payment;
