//! Carts service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    campaigns::validation::ValidationError, carts::lock::Rejection,
    products::records::ProductUuid,
};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart line already exists")]
    AlreadyExists,

    #[error("cart line not found")]
    NotFound,

    #[error("product {product} not found")]
    ProductNotFound { product: ProductUuid },

    #[error("the flash sale for product {product} has ended")]
    OfferExpired { product: ProductUuid },

    #[error("the flash sale for product {product} is no longer active")]
    OfferInactive { product: ProductUuid },

    #[error("not enough stock left for product {product}")]
    StockExceeded { product: ProductUuid },

    #[error("product {product} is not available")]
    ProductInactive { product: ProductUuid },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Rejection> for CartsServiceError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::OfferExpired(product) => Self::OfferExpired { product },
            Rejection::OfferInactive(product) => Self::OfferInactive { product },
            Rejection::StockExceeded(product) => Self::StockExceeded { product },
            Rejection::ProductInactive(product) => Self::ProductInactive { product },
        }
    }
}

impl From<Error> for CartsServiceError {
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
