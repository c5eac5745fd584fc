//! HTTP adapters, grouped by module.

pub mod payments;
