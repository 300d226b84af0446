//! Campaigns
//!
//! Administration of flash-sale campaigns, their offers and sales reports.

pub(crate) mod errors;
mod handlers;
pub(crate) mod offers;

pub(crate) use handlers::*;
