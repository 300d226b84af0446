//! Handler errors
//!
//! Most failures render as a plain [`StatusError`]. Cart and checkout
//! rejections render as a `409 Conflict` carrying a [`RejectionResponse`] so
//! the storefront can send the shopper back to their cart.

use salvo::{
    async_trait,
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::products::records::ProductUuid;

/// Where a rejected shopper is sent to review their cart.
pub(crate) const CART_REDIRECT: &str = "/cart";

/// Why a cart line or an order was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub(crate) enum RejectionCode {
    OfferExpired,
    OfferInactive,
    StockExceeded,
    ProductInactive,
    EmptyCart,
}

/// Rejection Response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct RejectionResponse {
    /// Machine-readable reason
    pub error: RejectionCode,

    /// Message suitable for display
    pub message: String,

    /// The product whose line was refused
    pub product_uuid: Option<Uuid>,

    /// Where to send the shopper next
    pub redirect: String,
}

impl RejectionResponse {
    pub(crate) fn new(
        error: RejectionCode,
        message: impl Into<String>,
        product: Option<ProductUuid>,
    ) -> Self {
        Self {
            error,
            message: message.into(),
            product_uuid: product.map(ProductUuid::into_uuid),
            redirect: CART_REDIRECT.to_string(),
        }
    }
}

#[derive(Debug)]
pub(crate) enum ApiError {
    Status(StatusError),
    Rejected(RejectionResponse),
}

impl From<StatusError> for ApiError {
    fn from(error: StatusError) -> Self {
        Self::Status(error)
    }
}

#[async_trait]
impl Writer for ApiError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        match self {
            Self::Status(error) => res.render(error),
            Self::Rejected(rejection) => {
                res.status_code(StatusCode::CONFLICT);
                res.render(Json(rejection));
            }
        }
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        operation.responses.insert(
            StatusCode::CONFLICT.as_str(),
            oapi::Response::new("Rejected; review the cart")
                .add_content("application/json", RejectionResponse::to_schema(components)),
        );

        operation.responses.insert(
            StatusCode::INTERNAL_SERVER_ERROR.as_str(),
            oapi::Response::new("Internal Server Error")
                .add_content("application/json", StatusError::to_schema(components)),
        );
    }
}
