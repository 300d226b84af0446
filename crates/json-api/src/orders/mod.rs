//! Orders
//!
//! Checkout and order history for the customer.

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
