//! Prices
//!
//! Storefront price quotes with flash-sale badges.

mod handlers;

pub(crate) use handlers::*;
