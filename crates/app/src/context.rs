//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    clock::{Clock, SystemClock},
    database::{self, Db},
    domain::{
        campaigns::{CampaignsService, PgCampaignsService},
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        pricing::{
            PgPricingService, PricingService,
            cache::{CacheSettings, MokaOfferCache, OfferCache},
        },
        products::{PgProductsService, ProductsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub campaigns: Arc<dyn CampaignsService>,
    pub pricing: Arc<dyn PricingService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub clock: Arc<dyn Clock>,
}

impl AppContext {
    /// Build application context from a database URL. The campaigns, pricing
    /// and orders services share one offer cache.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        cache: CacheSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(
            Db::new(pool),
            Arc::new(MokaOfferCache::new(cache)),
            Arc::new(SystemClock),
        ))
    }

    #[must_use]
    pub fn from_db(db: Db, cache: Arc<dyn OfferCache>, clock: Arc<dyn Clock>) -> Self {
        Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            campaigns: Arc::new(PgCampaignsService::new(db.clone(), cache.clone())),
            pricing: Arc::new(PgPricingService::new(db.clone(), cache.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, cache)),
            clock,
        }
    }
}
