//! Flash-sale pricing, stock caps and cart price locks for the storefront.

pub mod clock;
pub mod context;
pub mod database;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
