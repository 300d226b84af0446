//! Pricing
//!
//! Resolves which flash-sale offer, if any, applies to a product at a point in
//! time, and whether a quantity may still be bought at the sale price.

pub mod availability;
pub mod cache;
pub mod eligibility;
pub mod errors;
pub mod records;
pub(crate) mod repository;
pub mod service;

pub use errors::PricingServiceError;
pub use service::*;
