//! Flash-Sale Domain Concerns

pub mod campaigns;
pub mod carts;
pub mod ledger;
pub mod orders;
pub mod pricing;
pub mod products;
