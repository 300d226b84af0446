//! Delete Campaign Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::campaigns::records::CampaignRemoval;

use crate::{campaigns::errors::into_status_error, extensions::*, state::State};

/// Campaign Removed Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignRemovedResponse {
    /// `deleted` when the campaign had no offers, otherwise `archived`
    pub outcome: String,
}

/// Delete Campaign Handler
///
/// Campaigns with offers are archived instead of deleted so that their order
/// history keeps resolving.
#[endpoint(
    tags("campaigns"),
    summary = "Delete Campaign",
    responses(
        (status_code = StatusCode::OK, description = "Campaign deleted or archived"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CampaignRemovedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let removal = state
        .app
        .campaigns
        .delete_campaign(campaign.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let outcome = match removal {
        CampaignRemoval::Deleted => "deleted",
        CampaignRemoval::Archived => "archived",
    };

    Ok(Json(CampaignRemovedResponse {
        outcome: outcome.to_string(),
    }))
}
