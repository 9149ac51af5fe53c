//! Checkout

pub mod data;
pub mod errors;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
