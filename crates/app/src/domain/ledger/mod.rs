//! Sold-Count Ledger
//!
//! The only writer of an offer's sold count. Increments happen inside the
//! checkout transaction as a single conditional update, so the cap cannot be
//! oversubscribed by concurrent orders.

pub mod errors;
pub(crate) mod repository;

pub use errors::LedgerError;
