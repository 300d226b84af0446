//! Campaign Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use flashsale_app::domain::campaigns::records::CampaignSummary;

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse},
    extensions::*,
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignSummaryResponse {
    pub campaign: CampaignResponse,

    /// Number of offers in the campaign
    pub offer_count: u64,
}

impl From<CampaignSummary> for CampaignSummaryResponse {
    fn from(summary: CampaignSummary) -> Self {
        Self {
            campaign: CampaignResponse::new(summary.campaign, summary.state),
            offer_count: summary.offer_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignsResponse {
    /// Campaigns, newest first
    pub campaigns: Vec<CampaignSummaryResponse>,
}

/// Campaign Index Handler
///
/// Lists campaigns with their display state at `at`, or now.
#[endpoint(tags("campaigns"), summary = "List Campaigns")]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CampaignsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time(state.app.clock.as_ref())?;

    let campaigns = state
        .app
        .campaigns
        .list_campaigns(point_in_time)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignsResponse {
        campaigns: campaigns.into_iter().map(Into::into).collect(),
    }))
}
