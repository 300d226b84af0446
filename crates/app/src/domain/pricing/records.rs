//! Pricing Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::domain::{
    campaigns::{
        records::{CampaignStatus, CampaignUuid, OfferUuid},
        window::SaleWindow,
    },
    pricing::eligibility::{Eligibility, evaluate},
    products::records::ProductUuid,
};

/// An offer together with the campaign state that decides whether it applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferCandidate {
    pub offer_uuid: OfferUuid,
    pub campaign_uuid: CampaignUuid,
    pub product_uuid: ProductUuid,
    pub original_price: u64,
    pub sale_price: u64,
    pub discount_percentage: Decimal,
    pub stock_cap: Option<u64>,
    pub sold_count: u64,
    pub status: CampaignStatus,
    pub window: SaleWindow,
    pub created_at: Timestamp,
}

impl OfferCandidate {
    #[must_use]
    pub fn eligibility(&self, as_of: Timestamp) -> Eligibility {
        evaluate(self.status, &self.window, as_of)
    }

    /// Units left under the cap; `None` when uncapped.
    #[must_use]
    pub fn remaining(&self) -> Option<u64> {
        self.stock_cap.map(|cap| cap.saturating_sub(self.sold_count))
    }

    #[must_use]
    pub fn badge(&self) -> FlashSaleBadge {
        FlashSaleBadge {
            offer_uuid: self.offer_uuid,
            campaign_uuid: self.campaign_uuid,
            original_price: self.original_price,
            sale_price: self.sale_price,
            discount_percentage: self.discount_percentage,
            ends_at: self.window.ends_at(),
            remaining: self.remaining(),
        }
    }
}

/// What a storefront shows next to a discounted product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashSaleBadge {
    pub offer_uuid: OfferUuid,
    pub campaign_uuid: CampaignUuid,
    pub original_price: u64,
    pub sale_price: u64,
    pub discount_percentage: Decimal,
    pub ends_at: Timestamp,
    pub remaining: Option<u64>,
}

/// Effective price of a product at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub product_uuid: ProductUuid,
    pub catalog_price: u64,
    pub effective_price: u64,
    pub available: bool,
    pub badge: Option<FlashSaleBadge>,
}
