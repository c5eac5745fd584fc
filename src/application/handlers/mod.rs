//! Command handlers, grouped by module.

pub mod payment;
