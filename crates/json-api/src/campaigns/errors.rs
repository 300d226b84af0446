//! Campaign Errors

use salvo::http::StatusError;
use tracing::error;

use flashsale_app::domain::campaigns::CampaignsServiceError;

pub(crate) fn into_status_error(error: CampaignsServiceError) -> StatusError {
    match error {
        CampaignsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Campaign or offer already exists")
        }
        CampaignsServiceError::NotFound => {
            StatusError::not_found().brief("Campaign or offer not found")
        }
        CampaignsServiceError::ProductNotFound(product) => {
            StatusError::unprocessable_entity().brief(format!("Product {product} not found"))
        }
        CampaignsServiceError::Archived => {
            StatusError::conflict().brief("Campaign is archived and can no longer be changed")
        }
        CampaignsServiceError::ConcurrencyConflict => StatusError::conflict()
            .brief("Campaign was changed by someone else; reload and retry"),
        CampaignsServiceError::ActiveOfferConflict { product } => StatusError::conflict().brief(
            format!("Product {product} already has a flash sale in an overlapping window"),
        ),
        CampaignsServiceError::Validation(source) => {
            StatusError::unprocessable_entity().brief(source.to_string())
        }
        CampaignsServiceError::InvalidReference
        | CampaignsServiceError::MissingRequiredData
        | CampaignsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid campaign payload")
        }
        CampaignsServiceError::Sql(source) => {
            error!("campaign storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
