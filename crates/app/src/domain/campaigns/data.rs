//! Campaigns Data

use jiff::Timestamp;

use crate::domain::{
    campaigns::records::{CampaignUuid, OfferUuid},
    products::records::ProductUuid,
};

/// New Campaign Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCampaign {
    pub uuid: CampaignUuid,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub enabled: bool,
}

/// Campaign Update Data
///
/// Applied only when the stored version still equals `expected_version`.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignUpdate {
    pub expected_version: u64,
    pub name: String,
    pub description: Option<String>,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
}

/// New Offer Data
///
/// The original price is snapshotted from the catalog when the offer is added.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    pub uuid: OfferUuid,
    pub product_uuid: ProductUuid,
    pub sale_price: u64,
    pub stock_cap: Option<u64>,
}

/// Offer Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct OfferUpdate {
    pub expected_version: u64,
    pub sale_price: u64,
    pub stock_cap: Option<u64>,
}
