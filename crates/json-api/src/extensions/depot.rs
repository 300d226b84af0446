//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use flashsale_app::domain::carts::records::CustomerUuid;

const CUSTOMER_UUID_KEY: &str = "flashsale.customer_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_customer_uuid(&mut self, customer: CustomerUuid);

    /// The customer set by the customer middleware.
    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_customer_uuid(&mut self, customer: CustomerUuid) {
        self.insert(CUSTOMER_UUID_KEY, customer);
    }

    fn customer_uuid_or_401(&self) -> Result<CustomerUuid, StatusError> {
        self.get::<CustomerUuid>(CUSTOMER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Missing customer"))
    }
}
