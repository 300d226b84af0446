//! Orders
//!
//! Checkout turns a validated cart into an order with historical lines.

pub mod checkout;
pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
