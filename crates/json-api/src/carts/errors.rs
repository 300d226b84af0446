//! Cart Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use flashsale_app::domain::carts::CartsServiceError;

use crate::errors::{ApiError, RejectionCode, RejectionResponse};

pub(crate) fn into_api_error(error: CartsServiceError) -> ApiError {
    let (code, product) = match error {
        CartsServiceError::OfferExpired { product } => (RejectionCode::OfferExpired, product),
        CartsServiceError::OfferInactive { product } => (RejectionCode::OfferInactive, product),
        CartsServiceError::StockExceeded { product } => (RejectionCode::StockExceeded, product),
        CartsServiceError::ProductInactive { product } => {
            (RejectionCode::ProductInactive, product)
        }
        other => return ApiError::Status(into_status_error(other)),
    };

    warn!(?code, product_uuid = %product, "cart change rejected");

    ApiError::Rejected(RejectionResponse::new(code, error.to_string(), Some(product)))
}

fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Cart line already exists")
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart line not found"),
        CartsServiceError::ProductNotFound { product } => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        CartsServiceError::Validation(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        CartsServiceError::InvalidReference
        | CartsServiceError::MissingRequiredData
        | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        CartsServiceError::OfferExpired { .. }
        | CartsServiceError::OfferInactive { .. }
        | CartsServiceError::StockExceeded { .. }
        | CartsServiceError::ProductInactive { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
