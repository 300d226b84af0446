//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{carts::lock::Rejection, products::records::ProductUuid};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order already exists")]
    AlreadyExists,

    #[error("order not found")]
    NotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("the flash sale for product {product} has ended")]
    OfferExpired { product: ProductUuid },

    #[error("the flash sale for product {product} is no longer active")]
    OfferInactive { product: ProductUuid },

    #[error("not enough stock left for product {product}")]
    StockExceeded { product: ProductUuid },

    #[error("product {product} is not available")]
    ProductInactive { product: ProductUuid },

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Rejection> for OrdersServiceError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::OfferExpired(product) => Self::OfferExpired { product },
            Rejection::OfferInactive(product) => Self::OfferInactive { product },
            Rejection::StockExceeded(product) => Self::StockExceeded { product },
            Rejection::ProductInactive(product) => Self::ProductInactive { product },
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = OrdersServiceError::from(Error::RowNotFound);

        assert!(matches!(error, OrdersServiceError::NotFound));
    }

    #[test]
    fn rejections_keep_the_product() {
        let product = ProductUuid::new();

        let error = OrdersServiceError::from(Rejection::OfferInactive(product));

        assert!(
            matches!(error, OrdersServiceError::OfferInactive { product: p } if p == product),
            "expected OfferInactive, got {error:?}"
        );
    }
}
