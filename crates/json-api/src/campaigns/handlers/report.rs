//! Campaign Report Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::campaigns::records::{CampaignReport, OfferPerformance};

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse, offers::index::OfferResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OfferPerformanceResponse {
    pub offer: OfferResponse,

    /// Units sold on flash-sale order lines
    pub units_sold: u64,

    /// Revenue at the locked sale prices
    pub revenue: u64,

    /// Discount granted against the catalog price
    pub discount_granted: u64,

    /// Orders containing the offer
    pub orders: u64,

    /// Percentage of the cap sold; absent when uncapped
    pub sell_through: Option<String>,
}

impl From<OfferPerformance> for OfferPerformanceResponse {
    fn from(performance: OfferPerformance) -> Self {
        Self {
            sell_through: performance.sell_through().map(|value| value.to_string()),
            units_sold: performance.units_sold,
            revenue: performance.revenue,
            discount_granted: performance.discount_granted,
            orders: performance.orders,
            offer: performance.offer.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignReportResponse {
    pub campaign: CampaignResponse,
    pub offers: Vec<OfferPerformanceResponse>,
    pub units_sold: u64,
    pub revenue: u64,
    pub discount_granted: u64,
    pub orders: u64,
}

impl CampaignReportResponse {
    fn new(report: CampaignReport, now: Timestamp) -> Self {
        Self {
            campaign: CampaignResponse::at(report.campaign, now),
            offers: report.offers.into_iter().map(Into::into).collect(),
            units_sold: report.units_sold,
            revenue: report.revenue,
            discount_granted: report.discount_granted,
            orders: report.orders,
        }
    }
}

/// Campaign Report Handler
///
/// Sales per offer and in total, from placed orders.
#[endpoint(tags("campaigns"), summary = "Campaign Sales Report")]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CampaignReportResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let report = state
        .app
        .campaigns
        .campaign_report(campaign.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignReportResponse::new(
        report,
        state.app.clock.now(),
    )))
}
