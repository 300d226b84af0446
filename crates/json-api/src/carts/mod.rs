//! Carts
//!
//! The customer's cart, its lines and their flash-sale price locks.

pub(crate) mod errors;
mod handlers;
pub(crate) mod items;

pub(crate) use handlers::*;
