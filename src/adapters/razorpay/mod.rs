//! Razorpay gateway adapter.

mod client;

pub use client::{RazorpayClient, RazorpayConfig};
