//! Create Offer Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::campaigns::data::NewOffer;

use crate::{
    campaigns::{errors::into_status_error, offers::index::OfferResponse},
    extensions::*,
    state::State,
};

/// Create Offer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOfferRequest {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub sale_price: u64,
    #[serde(default)]
    pub stock_cap: Option<u64>,
}

impl From<CreateOfferRequest> for NewOffer {
    fn from(request: CreateOfferRequest) -> Self {
        NewOffer {
            uuid: request.uuid.into(),
            product_uuid: request.product_uuid.into(),
            sale_price: request.sale_price,
            stock_cap: request.stock_cap,
        }
    }
}

/// Create Offer Handler
///
/// Adds a product to a campaign. The original price is taken from the
/// catalog.
#[endpoint(
    tags("campaigns"),
    summary = "Add Offer to Campaign",
    responses(
        (status_code = StatusCode::CREATED, description = "Offer created"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
        (status_code = StatusCode::CONFLICT, description = "Archived campaign, duplicate offer or overlapping flash sale"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Unknown product or invalid prices"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "campaigns.offers.create",
    skip(campaign, json, depot, res),
    fields(campaign_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    campaign: PathParam<Uuid>,
    json: JsonBody<CreateOfferRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OfferResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let campaign = campaign.into_inner();
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("campaign_uuid", tracing::field::display(campaign));
    span.record("product_uuid", tracing::field::display(request.product_uuid));

    let offer = state
        .app
        .campaigns
        .add_offer(campaign.into(), request.into())
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/campaigns/{campaign}/offers/{}", offer.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(offer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use flashsale_app::domain::{
        campaigns::{
            CampaignsServiceError,
            records::{CampaignUuid, OfferUuid},
            validation::ValidationError,
        },
        products::records::ProductUuid,
    };

    use crate::test_helpers::Mocks;

    use super::{super::tests::make_offer, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("campaigns/{campaign}/offers").post(handler))
    }

    #[tokio::test]
    async fn test_create_offer_success() -> TestResult {
        let campaign = CampaignUuid::new();
        let uuid = OfferUuid::new();
        let product = ProductUuid::new();

        let mut offer = make_offer(uuid, campaign);

        offer.product_uuid = product;

        let mut mocks = Mocks::default();

        mocks
            .campaigns
            .expect_add_offer()
            .once()
            .withf(move |c, new| {
                *c == campaign
                    && *new
                        == NewOffer {
                            uuid,
                            product_uuid: product,
                            sale_price: 80,
                            stock_cap: Some(10),
                        }
            })
            .return_once(move |_, _| Ok(offer));

        let mut res = TestClient::post(format!("http://example.com/campaigns/{campaign}/offers"))
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "product_uuid": product.into_uuid(),
                "sale_price": 80,
                "stock_cap": 10,
            }))
            .send(&make_service(mocks))
            .await;

        let body: OfferResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/campaigns/{campaign}/offers/{uuid}").as_str())
        );
        assert_eq!(body.original_price, 100);

        Ok(())
    }

    #[tokio::test]
    async fn test_sale_price_not_below_original_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.campaigns.expect_add_offer().once().return_once(|_, _| {
            Err(CampaignsServiceError::Validation(
                ValidationError::SalePriceNotBelowOriginal {
                    sale_price: 100,
                    original_price: 100,
                },
            ))
        });

        let res = TestClient::post(format!(
            "http://example.com/campaigns/{}/offers",
            Uuid::now_v7()
        ))
        .json(&json!({
            "uuid": Uuid::now_v7(),
            "product_uuid": Uuid::now_v7(),
            "sale_price": 100,
        }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_overlapping_flash_sale_returns_409() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .campaigns
            .expect_add_offer()
            .once()
            .return_once(move |_, _| Err(CampaignsServiceError::ActiveOfferConflict { product }));

        let res = TestClient::post(format!(
            "http://example.com/campaigns/{}/offers",
            Uuid::now_v7()
        ))
        .json(&json!({
            "uuid": Uuid::now_v7(),
            "product_uuid": product.into_uuid(),
            "sale_price": 50,
        }))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
