//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::carts::records::{CartLineRecord, CartLineView, CartView};

use crate::{carts::errors::into_api_error, errors::ApiError, extensions::*, state::State};

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub uuid: Uuid,

    pub product_uuid: Uuid,

    pub quantity: u64,

    /// The flash-sale offer whose price is locked in, if any
    pub offer_uuid: Option<Uuid>,

    /// The locked unit price, if any
    pub locked_price: Option<u64>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CartLineRecord> for CartLineResponse {
    fn from(line: CartLineRecord) -> Self {
        Self {
            uuid: line.uuid.into_uuid(),
            product_uuid: line.product_uuid.into_uuid(),
            quantity: line.quantity,
            offer_uuid: line.lock.offer().map(|offer| offer.into_uuid()),
            locked_price: line.lock.price(),
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
        }
    }
}

/// Priced Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricedCartLineResponse {
    pub line: CartLineResponse,

    /// Current catalog price
    pub catalog_price: u64,

    /// The locked price, or the catalog price when unlocked
    pub unit_price: u64,

    pub line_total: u64,

    /// Saved against the catalog price
    pub savings: u64,
}

impl From<CartLineView> for PricedCartLineResponse {
    fn from(view: CartLineView) -> Self {
        Self {
            catalog_price: view.catalog_price,
            unit_price: view.unit_price,
            line_total: view.line_total,
            savings: view.savings,
            line: view.line.into(),
        }
    }
}

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub customer_uuid: Uuid,
    pub lines: Vec<PricedCartLineResponse>,
    pub subtotal: u64,
    pub savings: u64,
}

impl From<CartView> for CartResponse {
    fn from(cart: CartView) -> Self {
        Self {
            customer_uuid: cart.customer_uuid.into_uuid(),
            lines: cart.lines.into_iter().map(Into::into).collect(),
            subtotal: cart.subtotal,
            savings: cart.savings,
        }
    }
}

/// Get Cart Handler
///
/// The customer's cart, priced with any locked flash-sale prices.
#[endpoint(tags("cart"), summary = "Get Cart")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_uuid_or_401()?;

    let cart = state
        .app
        .carts
        .get_cart(customer)
        .await
        .map_err(into_api_error)?;

    Ok(Json(cart.into()))
}
