//! Carts
//!
//! Cart lines and the price lock each line may carry.

pub mod data;
pub mod errors;
pub mod lock;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::CartsServiceError;
pub use service::*;
