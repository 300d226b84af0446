//! Delete Offer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{campaigns::errors::into_status_error, extensions::*, state::State};

/// Delete Offer Handler
#[endpoint(
    tags("campaigns"),
    summary = "Remove Offer from Campaign",
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Offer removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign or offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Campaign is archived"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    offer: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .campaigns
        .remove_offer(campaign.into_inner().into(), offer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
