//! Update Cart Item Handler

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
    carts::{errors::into_api_error, get::CartLineResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// New quantity; zero removes the line
    pub quantity: u64,
}

/// Update Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemResponse {
    /// The updated line; absent when a zero quantity removed it
    pub line: Option<CartLineResponse>,
}

/// Update Cart Item Handler
///
/// Sets a line's quantity, re-checking any locked flash-sale price.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Line updated or removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Line not found"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<UpdateCartItemResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let line = state
        .app
        .carts
        .update_quantity(
            customer,
            product.into_inner().into(),
            json.into_inner().quantity,
            state.app.clock.now(),
        )
        .await
        .map_err(into_api_error)?;

    Ok(Json(UpdateCartItemResponse {
        line: line.map(Into::into),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use flashsale_app::domain::{
        campaigns::records::OfferUuid, carts::CartsServiceError,
        products::records::ProductUuid,
    };

    use crate::{
        carts::tests::{locked_at, make_line},
        errors::{RejectionCode, RejectionResponse},
        test_helpers::{Mocks, TEST_CUSTOMER_UUID, TEST_NOW},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("cart/items/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_quantity_success() -> TestResult {
        let product = ProductUuid::new();
        let line = make_line(product, 4, locked_at(OfferUuid::new(), 70));

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_quantity()
            .once()
            .withf(move |customer, p, quantity, as_of| {
                *customer == TEST_CUSTOMER_UUID
                    && *p == product
                    && *quantity == 4
                    && *as_of == TEST_NOW
            })
            .return_once(move |_, _, _, _| Ok(Some(line)));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{product}"))
            .json(&json!({ "quantity": 4 }))
            .send(&make_service(mocks))
            .await;

        let body: UpdateCartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.line.map(|line| line.quantity), Some(4));

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_the_line() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_quantity()
            .once()
            .withf(|_, _, quantity, _| *quantity == 0)
            .return_once(|_, _, _, _| Ok(None));

        let body: UpdateCartItemResponse =
            TestClient::put(format!("http://example.com/cart/items/{}", Uuid::now_v7()))
                .json(&json!({ "quantity": 0 }))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert!(body.line.is_none(), "expected the line to be removed");

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_lock_returns_409_with_redirect() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_quantity()
            .once()
            .return_once(move |_, _, _, _| Err(CartsServiceError::OfferExpired { product }));

        let mut res = TestClient::put(format!("http://example.com/cart/items/{product}"))
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(mocks))
            .await;

        let body: RejectionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
        assert_eq!(body.error, RejectionCode::OfferExpired);
        assert_eq!(body.redirect, "/cart");

        Ok(())
    }
}
