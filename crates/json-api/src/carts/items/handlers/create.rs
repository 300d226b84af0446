//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::carts::data::NewCartItem;

use crate::{
    carts::{errors::into_api_error, get::CartLineResponse},
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Identifier for the line if the product is not in the cart yet
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub quantity: u64,

    /// The flash-sale offer the shopper saw, if any
    #[serde(default)]
    pub offer_uuid: Option<Uuid>,
}

impl From<AddCartItemRequest> for NewCartItem {
    fn from(request: AddCartItemRequest) -> Self {
        NewCartItem {
            uuid: request.uuid.into(),
            product_uuid: request.product_uuid.into(),
            quantity: request.quantity,
            offer_uuid: request.offer_uuid.map(Into::into),
        }
    }
}

/// Add Cart Item Handler
///
/// Adds a product to the cart, locking the flash-sale price when one applies.
/// Adding a product already in the cart merges into its line.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Line created"),
        (status_code = StatusCode::OK, description = "Merged into an existing line"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Zero quantity"),
    ),
)]
#[tracing::instrument(
    name = "carts.items.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;
    let item: NewCartItem = json.into_inner().into();
    let requested = item.uuid;

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));
    span.record("product_uuid", tracing::field::display(item.product_uuid));

    let line = state
        .app
        .carts
        .add_item(customer, item, state.app.clock.now())
        .await
        .map_err(into_api_error)?;

    let status = if line.uuid == requested {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    res.add_header(
        LOCATION,
        format!("/cart/items/{}", line.product_uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(status);

    Ok(Json(line.into()))
}
