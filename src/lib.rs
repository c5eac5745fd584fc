//! Verdura Payments - payment verification service for the Verdura storefront
//!
//! Verifies payment gateway signatures (client redirect and webhook paths),
//! creates gateway orders, and applies the resulting order state changes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
