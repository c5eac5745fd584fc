//! PostgreSQL adapters implementing the persistence ports.

mod inventory_repository;
mod order_repository;

pub use inventory_repository::PostgresInventoryReserver;
pub use order_repository::PostgresOrderRepository;
