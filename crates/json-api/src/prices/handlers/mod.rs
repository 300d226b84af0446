//! Price Handlers

pub(crate) mod index;
