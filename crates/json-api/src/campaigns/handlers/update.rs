//! Update Campaign Handler

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

use flashsale_app::domain::campaigns::data::CampaignUpdate;

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse, parse_timestamp},
    extensions::*,
    state::State,
};

/// Update Campaign Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCampaignRequest {
    /// The version last read; a stale version is refused with 409
    pub expected_version: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
}

impl UpdateCampaignRequest {
    fn into_update(self) -> Result<CampaignUpdate, StatusError> {
        Ok(CampaignUpdate {
            expected_version: self.expected_version,
            starts_at: parse_timestamp(&self.starts_at, "starts_at")?,
            ends_at: parse_timestamp(&self.ends_at, "ends_at")?,
            name: self.name,
            description: self.description,
        })
    }
}

/// Update Campaign Handler
#[endpoint(
    tags("campaigns"),
    summary = "Update Campaign",
    responses(
        (status_code = StatusCode::OK, description = "Campaign updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
        (status_code = StatusCode::CONFLICT, description = "Stale version, archived campaign or overlapping offer"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty name or inverted window"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "campaigns.update",
    skip(campaign, json, depot),
    fields(campaign_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    json: JsonBody<UpdateCampaignRequest>,
    depot: &mut Depot,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let campaign = campaign.into_inner();
    let update = json.into_inner().into_update()?;

    tracing::Span::current().record("campaign_uuid", tracing::field::display(campaign));

    let record = state
        .app
        .campaigns
        .update_campaign(campaign.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignResponse::at(record, state.app.clock.now())))
}
