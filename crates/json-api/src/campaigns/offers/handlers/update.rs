//! Update Offer Handler

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

use flashsale_app::domain::campaigns::data::OfferUpdate;

use crate::{
    campaigns::{errors::into_status_error, offers::index::OfferResponse},
    extensions::*,
    state::State,
};

/// Update Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOfferRequest {
    /// The version last read; a stale version is refused with 409
    pub expected_version: u64,
    pub sale_price: u64,
    #[serde(default)]
    pub stock_cap: Option<u64>,
}

impl From<UpdateOfferRequest> for OfferUpdate {
    fn from(request: UpdateOfferRequest) -> Self {
        OfferUpdate {
            expected_version: request.expected_version,
            sale_price: request.sale_price,
            stock_cap: request.stock_cap,
        }
    }
}

/// Update Offer Handler
#[endpoint(
    tags("campaigns"),
    summary = "Update Offer",
    responses(
        (status_code = StatusCode::OK, description = "Offer updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign or offer not found"),
        (status_code = StatusCode::CONFLICT, description = "Stale version or archived campaign"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Invalid price or cap below sold count"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    offer: PathParam<Uuid>,
    json: JsonBody<UpdateOfferRequest>,
    depot: &mut Depot,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let offer = state
        .app
        .campaigns
        .update_offer(
            campaign.into_inner().into(),
            offer.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(offer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use flashsale_app::domain::campaigns::{
        CampaignsServiceError,
        records::{CampaignUuid, OfferUuid},
        validation::ValidationError,
    };

    use crate::test_helpers::Mocks;

    use super::{super::tests::make_offer, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(
            Router::with_path("campaigns/{campaign}/offers/{offer}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_offer_success() -> TestResult {
        let campaign = CampaignUuid::new();
        let uuid = OfferUuid::new();

        let mut offer = make_offer(uuid, campaign);

        offer.sale_price = 60;
        offer.version = 2;

        let mut mocks = Mocks::default();

        mocks
            .campaigns
            .expect_update_offer()
            .once()
            .withf(move |c, o, update| {
                *c == campaign
                    && *o == uuid
                    && *update
                        == OfferUpdate {
                            expected_version: 1,
                            sale_price: 60,
                            stock_cap: Some(10),
                        }
            })
            .return_once(move |_, _, _| Ok(offer));

        let mut res = TestClient::put(format!(
            "http://example.com/campaigns/{campaign}/offers/{uuid}"
        ))
        .json(&json!({ "expected_version": 1, "sale_price": 60, "stock_cap": 10 }))
        .send(&make_service(mocks))
        .await;

        let body: OfferResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.sale_price, 60);
        assert_eq!(body.version, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_cap_below_sold_count_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .campaigns
            .expect_update_offer()
            .once()
            .return_once(|_, _, _| {
                Err(CampaignsServiceError::Validation(ValidationError::CapBelowSold {
                    stock_cap: 2,
                    sold_count: 4,
                }))
            });

        let res = TestClient::put(format!(
            "http://example.com/campaigns/{}/offers/{}",
            Uuid::now_v7(),
            Uuid::now_v7()
        ))
        .json(&json!({ "expected_version": 1, "sale_price": 60, "stock_cap": 2 }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
