//! Place Order Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::orders::data::NewOrder;

use crate::{
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, get::OrderResponse},
    state::State,
};

/// Place Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PlaceOrderRequest {
    /// Client-chosen order identifier; reusing one is refused
    pub uuid: Uuid,
}

/// Place Order Handler
///
/// Checks out the customer's cart. Any line that can no longer be bought at
/// its locked price aborts the whole order and leaves the cart untouched.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty, order_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<PlaceOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let uuid = json.into_inner().uuid;

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));
    span.record("order_uuid", tracing::field::display(uuid));

    let order = state
        .app
        .orders
        .place_order(customer, NewOrder { uuid: uuid.into() }, state.app.clock.now())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/orders/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
