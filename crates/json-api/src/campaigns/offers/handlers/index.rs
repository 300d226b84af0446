//! Offer Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::campaigns::records::OfferRecord;

use crate::{campaigns::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferResponse {
    pub uuid: Uuid,

    pub campaign_uuid: Uuid,

    pub product_uuid: Uuid,

    /// Catalog price when the offer was created
    pub original_price: u64,

    pub sale_price: u64,

    /// Percentage off the original price, two decimal places
    pub discount_percentage: String,

    /// Units that may be sold at the sale price; absent when uncapped
    pub stock_cap: Option<u64>,

    pub sold_count: u64,

    pub remaining: Option<u64>,

    /// Send back as `expected_version` when editing
    pub version: u64,

    pub created_at: String,

    pub updated_at: String,
}

impl From<OfferRecord> for OfferResponse {
    fn from(offer: OfferRecord) -> Self {
        Self {
            remaining: offer.remaining(),
            uuid: offer.uuid.into_uuid(),
            campaign_uuid: offer.campaign_uuid.into_uuid(),
            product_uuid: offer.product_uuid.into_uuid(),
            original_price: offer.original_price,
            sale_price: offer.sale_price,
            discount_percentage: offer.discount_percentage.to_string(),
            stock_cap: offer.stock_cap,
            sold_count: offer.sold_count,
            version: offer.version,
            created_at: offer.created_at.to_string(),
            updated_at: offer.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OffersResponse {
    pub offers: Vec<OfferResponse>,
}

/// Offer Index Handler
#[endpoint(tags("campaigns"), summary = "List Campaign Offers")]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OffersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offers = state
        .app
        .campaigns
        .list_offers(campaign.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(OffersResponse {
        offers: offers.into_iter().map(Into::into).collect(),
    }))
}
