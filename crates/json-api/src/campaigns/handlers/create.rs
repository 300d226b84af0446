//! Create Campaign Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::campaigns::data::NewCampaign;

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse, parse_timestamp},
    extensions::*,
    state::State,
};

/// Create Campaign Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCampaignRequest {
    pub uuid: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub starts_at: String,
    pub ends_at: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl CreateCampaignRequest {
    fn into_new_campaign(self) -> Result<NewCampaign, StatusError> {
        Ok(NewCampaign {
            uuid: self.uuid.into(),
            starts_at: parse_timestamp(&self.starts_at, "starts_at")?,
            ends_at: parse_timestamp(&self.ends_at, "ends_at")?,
            name: self.name,
            description: self.description,
            enabled: self.enabled,
        })
    }
}

/// Create Campaign Handler
#[endpoint(
    tags("campaigns"),
    summary = "Create Campaign",
    responses(
        (status_code = StatusCode::CREATED, description = "Campaign created"),
        (status_code = StatusCode::CONFLICT, description = "Campaign already exists"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Empty name or inverted window"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCampaignRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CampaignResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let campaign = json.into_inner().into_new_campaign()?;

    let campaign = state
        .app
        .campaigns
        .create_campaign(campaign)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/campaigns/{}", campaign.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CampaignResponse::at(campaign, state.app.clock.now())))
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use flashsale_app::domain::campaigns::{
        CampaignsServiceError, records::CampaignUuid, validation::ValidationError,
    };

    use crate::test_helpers::{Mocks, TEST_NOW};

    use super::{super::tests::make_campaign, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("campaigns").post(handler))
    }

    #[tokio::test]
    async fn test_create_campaign_success() -> TestResult {
        let uuid = CampaignUuid::new();
        let starts_at = TEST_NOW - SignedDuration::from_hours(1);
        let ends_at = TEST_NOW + SignedDuration::from_hours(24);

        let mut mocks = Mocks::default();

        mocks
            .campaigns
            .expect_create_campaign()
            .once()
            .withf(move |new| {
                *new == NewCampaign {
                    uuid,
                    name: "Spring Sale".to_string(),
                    description: None,
                    starts_at,
                    ends_at,
                    enabled: true,
                }
            })
            .return_once(move |_| Ok(make_campaign(uuid)));

        let mut res = TestClient::post("http://example.com/campaigns")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "name": "Spring Sale",
                "starts_at": starts_at.to_string(),
                "ends_at": ends_at.to_string(),
            }))
            .send(&make_service(mocks))
            .await;

        let body: CampaignResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/campaigns/{uuid}").as_str()));
        assert_eq!(body.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_create_campaign_with_inverted_window_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .campaigns
            .expect_create_campaign()
            .once()
            .return_once(|_| {
                Err(CampaignsServiceError::Validation(ValidationError::InvertedWindow))
            });

        let res = TestClient::post("http://example.com/campaigns")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "name": "Backwards",
                "starts_at": "2026-03-02T00:00:00Z",
                "ends_at": "2026-03-01T00:00:00Z",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_campaign_with_unparseable_window_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/campaigns")
            .json(&json!({
                "uuid": Uuid::now_v7(),
                "name": "Spring Sale",
                "starts_at": "tomorrow",
                "ends_at": Timestamp::UNIX_EPOCH.to_string(),
            }))
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
