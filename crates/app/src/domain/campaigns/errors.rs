//! Campaigns service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{campaigns::validation::ValidationError, products::records::ProductUuid};

#[derive(Debug, Error)]
pub enum CampaignsServiceError {
    #[error("campaign or offer already exists")]
    AlreadyExists,

    #[error("campaign or offer not found")]
    NotFound,

    #[error("product {0} not found")]
    ProductNotFound(ProductUuid),

    #[error("campaign is archived and can no longer be changed")]
    Archived,

    #[error("campaign was changed by someone else; reload and retry")]
    ConcurrencyConflict,

    #[error("product {product} already has an active flash sale in an overlapping window")]
    ActiveOfferConflict { product: ProductUuid },

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

impl From<Error> for CampaignsServiceError {
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
