//! Pricing service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingServiceError {
    #[error("storage error")]
    Sql(#[from] Error),
}
