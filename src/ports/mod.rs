//! Ports: contracts between the application layer and infrastructure.

mod inventory_reserver;
mod order_repository;
mod payment_gateway;

pub use inventory_reserver::InventoryReserver;
pub use order_repository::OrderRepository;
pub use payment_gateway::{CreateGatewayOrderRequest, GatewayOrder, PaymentGateway};
