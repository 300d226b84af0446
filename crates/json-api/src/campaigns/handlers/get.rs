//! Get Campaign Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::campaigns::records::{CampaignRecord, CampaignState};

use crate::{campaigns::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignResponse {
    /// The unique identifier of the campaign
    pub uuid: Uuid,

    pub name: String,

    pub description: Option<String>,

    /// Start of the sale window, inclusive
    pub starts_at: String,

    /// End of the sale window, inclusive
    pub ends_at: String,

    /// Administrative status: enabled, disabled or archived
    pub status: String,

    /// Display state now: active, upcoming, expired, disabled or archived
    pub state: String,

    /// Send back as `expected_version` when editing
    pub version: u64,

    pub created_at: String,

    pub updated_at: String,
}

impl CampaignResponse {
    pub(crate) fn new(campaign: CampaignRecord, state: CampaignState) -> Self {
        Self {
            uuid: campaign.uuid.into_uuid(),
            name: campaign.name,
            description: campaign.description,
            starts_at: campaign.window.starts_at().to_string(),
            ends_at: campaign.window.ends_at().to_string(),
            status: campaign.status.as_str().to_string(),
            state: state.as_str().to_string(),
            version: campaign.version,
            created_at: campaign.created_at.to_string(),
            updated_at: campaign.updated_at.to_string(),
        }
    }

    /// Render `campaign` with its state at `now`.
    pub(crate) fn at(campaign: CampaignRecord, now: Timestamp) -> Self {
        let state = campaign.state(now);

        Self::new(campaign, state)
    }
}

/// Get Campaign Handler
#[endpoint(tags("campaigns"), summary = "Get Campaign")]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let campaign = state
        .app
        .campaigns
        .get_campaign(campaign.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignResponse::at(campaign, state.app.clock.now())))
}
