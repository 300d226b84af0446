//! Order Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use flashsale_app::domain::orders::OrdersServiceError;

use crate::errors::{ApiError, RejectionCode, RejectionResponse};

/// Checkout rejections send the shopper back to the cart; everything else is
/// a plain status.
pub(crate) fn into_api_error(error: OrdersServiceError) -> ApiError {
    let (code, product) = match error {
        OrdersServiceError::OfferExpired { product } => {
            (RejectionCode::OfferExpired, Some(product))
        }
        OrdersServiceError::OfferInactive { product } => {
            (RejectionCode::OfferInactive, Some(product))
        }
        OrdersServiceError::StockExceeded { product } => {
            (RejectionCode::StockExceeded, Some(product))
        }
        OrdersServiceError::ProductInactive { product } => {
            (RejectionCode::ProductInactive, Some(product))
        }
        OrdersServiceError::EmptyCart => (RejectionCode::EmptyCart, None),
        other => return ApiError::Status(into_status_error(other)),
    };

    warn!(?code, "checkout rejected: {error}");

    ApiError::Rejected(RejectionResponse::new(code, error.to_string(), product))
}

fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => StatusError::bad_request().brief("Invalid order"),
        OrdersServiceError::EmptyCart
        | OrdersServiceError::OfferExpired { .. }
        | OrdersServiceError::OfferInactive { .. }
        | OrdersServiceError::StockExceeded { .. }
        | OrdersServiceError::ProductInactive { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
