//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use flashsale_app::{
    clock::FixedClock,
    context::AppContext,
    domain::{
        campaigns::MockCampaignsService, carts::MockCartsService,
        carts::records::CustomerUuid, orders::MockOrdersService,
        pricing::MockPricingService, products::MockProductsService,
    },
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid =
    CustomerUuid::from_uuid(Uuid::from_u128(0x0195_5a3c_9e00_7000_8000_0000_0000_0001));

/// 2026-03-01T11:00:00Z, an hour into the campaigns built by the handler tests.
pub(crate) const TEST_NOW: Timestamp = Timestamp::constant(1_772_362_800, 0);

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_customer_uuid(TEST_CUSTOMER_UUID);
    ctrl.call_next(req, depot, res).await;
}

/// One mock per service. A call nobody set an expectation for fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) products: MockProductsService,
    pub(crate) campaigns: MockCampaignsService,
    pub(crate) pricing: MockPricingService,
    pub(crate) carts: MockCartsService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            campaigns: Arc::new(self.campaigns),
            pricing: Arc::new(self.pricing),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            clock: Arc::new(FixedClock::new(TEST_NOW)),
        })
    }

    /// Serve `route` with the mocks injected, as an authenticated customer.
    pub(crate) fn into_service(self, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_customer)
                .push(route),
        )
    }
}
