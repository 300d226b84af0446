//! Test context for service-level integration tests.

use std::sync::Arc;

use jiff::{Timestamp, Unit};

use crate::{
    clock::{Clock, FixedClock},
    database::Db,
    domain::{
        campaigns::PgCampaignsService,
        carts::{PgCartsService, records::CustomerUuid},
        orders::PgOrdersService,
        pricing::{
            PgPricingService,
            cache::{MokaOfferCache, OfferCache},
        },
        products::PgProductsService,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub db: TestDb,
    pub clock: Arc<FixedClock>,
    pub customer: CustomerUuid,
    pub products: PgProductsService,
    pub campaigns: PgCampaignsService,
    pub pricing: PgPricingService,
    pub carts: PgCartsService,
    pub orders: PgOrdersService,
}

impl TestContext {
    /// Fresh database, empty cache and a clock frozen at the current instant,
    /// rounded to the microsecond precision Postgres stores.
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());
        let cache: Arc<dyn OfferCache> = Arc::new(MokaOfferCache::default());

        Self {
            clock: Arc::new(FixedClock::new(
                Timestamp::now()
                    .round(Unit::Microsecond)
                    .expect("current time should round to microseconds"),
            )),
            customer: CustomerUuid::new(),
            products: PgProductsService::new(db.clone()),
            campaigns: PgCampaignsService::new(db.clone(), cache.clone()),
            pricing: PgPricingService::new(db.clone(), cache.clone()),
            carts: PgCartsService::new(db.clone()),
            orders: PgOrdersService::new(db, cache),
            db: test_db,
        }
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }
}
