//! Campaigns
//!
//! The sale registry: time-boxed campaigns and the discounted product offers
//! they carry.

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod validation;
pub mod window;

pub use errors::CampaignsServiceError;
pub use service::*;
