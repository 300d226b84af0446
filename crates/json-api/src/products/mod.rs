//! Products
//!
//! Catalog administration: price, stock and whether a product is on sale at
//! all.

pub(crate) mod errors;
mod handlers;

pub(crate) use handlers::*;
