//! Get Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::orders::records::{OrderLineRecord, OrderRecord};

use crate::{errors::ApiError, extensions::*, orders::errors::into_api_error, state::State};

/// Order Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub quantity: u64,

    /// Price paid per unit
    pub unit_price: u64,

    /// The flash-sale offer the line was bought under, if any
    pub offer_uuid: Option<Uuid>,

    pub was_on_flash_sale: bool,

    /// Saved against the catalog price at checkout
    pub discount: Option<u64>,
}

impl From<OrderLineRecord> for OrderLineResponse {
    fn from(line: OrderLineRecord) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            offer_uuid: line.offer_uuid.map(|offer| offer.into_uuid()),
            was_on_flash_sale: line.was_on_flash_sale,
            discount: line.discount,
        }
    }
}

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub customer_uuid: Uuid,
    pub total: u64,
    pub savings: u64,
    pub placed_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(order: OrderRecord) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            customer_uuid: order.customer_uuid.into_uuid(),
            total: order.total,
            savings: order.savings,
            placed_at: order.placed_at.to_string(),
            lines: order.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "The order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let order = state
        .app
        .orders
        .get_order(customer, order.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use flashsale_app::domain::{
        campaigns::records::OfferUuid,
        orders::{OrdersServiceError, records::OrderUuid},
    };

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID};

    use super::{super::tests::make_order, *};

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("orders/{order}").get(handler))
    }

    #[tokio::test]
    async fn test_get_order_renders_historical_lines() -> TestResult {
        let uuid = OrderUuid::new();
        let offer = OfferUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |customer, o| *customer == TEST_CUSTOMER_UUID && *o == uuid)
            .return_once(move |_, _| Ok(make_order(uuid, offer)));

        let body: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(body.total, 140);
        assert_eq!(body.lines[0].offer_uuid, Some(offer.into_uuid()));
        assert!(body.lines[0].was_on_flash_sale, "expected a flash-sale line");
        assert_eq!(body.lines[0].discount, Some(60));

        Ok(())
    }

    #[tokio::test]
    async fn test_another_customers_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
