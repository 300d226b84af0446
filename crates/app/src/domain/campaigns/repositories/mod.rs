//! Campaigns Repositories

pub(crate) mod campaigns;
pub(crate) mod offers;
pub(crate) mod reports;
