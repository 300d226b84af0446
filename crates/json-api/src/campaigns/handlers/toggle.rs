//! Toggle Campaign Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse},
    extensions::*,
    state::State,
};

/// Toggle Campaign Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ToggleCampaignRequest {
    /// The version last read; a stale version is refused with 409
    pub expected_version: u64,
}

/// Toggle Campaign Handler
///
/// Flips a campaign between enabled and disabled.
#[endpoint(
    tags("campaigns"),
    summary = "Enable or Disable Campaign",
    responses(
        (status_code = StatusCode::OK, description = "Campaign toggled"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
        (status_code = StatusCode::CONFLICT, description = "Stale version, archived campaign or overlapping offer"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    json: JsonBody<ToggleCampaignRequest>,
    depot: &mut Depot,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let record = state
        .app
        .campaigns
        .toggle_campaign(campaign.into_inner().into(), json.into_inner().expected_version)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignResponse::at(record, state.app.clock.now())))
}
