//! Orders Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            records::{CartLineUuid, CustomerUuid},
            repository::PgCartLinesRepository,
        },
        ledger::{LedgerError, repository::PgLedgerRepository},
        orders::{
            OrdersServiceError,
            checkout::{historical_line, order_totals, validate_line},
            data::NewOrder,
            records::{OrderLineUuid, OrderRecord, OrderUuid},
            repository::PgOrdersRepository,
        },
        pricing::{cache::OfferCache, repository::PgPricingRepository},
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    cache: Arc<dyn OfferCache>,
    orders: PgOrdersRepository,
    lines: PgCartLinesRepository,
    products: PgProductsRepository,
    pricing: PgPricingRepository,
    ledger: PgLedgerRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, cache: Arc<dyn OfferCache>) -> Self {
        Self {
            db,
            cache,
            orders: PgOrdersRepository::new(),
            lines: PgCartLinesRepository::new(),
            products: PgProductsRepository::new(),
            pricing: PgPricingRepository::new(),
            ledger: PgLedgerRepository::new(),
        }
    }
}

fn ledger_error(error: LedgerError, product: ProductUuid) -> OrdersServiceError {
    match error {
        LedgerError::NotFound => OrdersServiceError::OfferExpired { product },
        LedgerError::StockExceeded => OrdersServiceError::StockExceeded { product },
        LedgerError::Sql(error) => error.into(),
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(
        name = "orders.service.place_order",
        skip(self, order),
        fields(
            customer_uuid = %customer,
            order_uuid = %order.uuid,
            line_count = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: NewOrder,
        point_in_time: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        // Lock order: cart lines, campaigns (shared), products, then each
        // offer row as the ledger updates it. Admin writes take campaigns
        // before products too.
        let cart = self.lines.lock_lines(&mut tx, customer).await?;

        if cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let span = Span::current();

        span.record("line_count", cart.len());

        let offers: Vec<_> = cart.iter().filter_map(|line| line.lock.offer()).collect();

        let live: FxHashMap<_, _> = self
            .pricing
            .share_candidates(&mut tx, &offers)
            .await?
            .into_iter()
            .map(|candidate| (candidate.offer_uuid, candidate))
            .collect();

        let product_uuids: Vec<ProductUuid> = cart.iter().map(|line| line.product_uuid).collect();

        let products: FxHashMap<_, _> = self
            .products
            .lock_products(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        let mut historical = Vec::with_capacity(cart.len());

        for line in &cart {
            let product = products.get(&line.product_uuid);
            let offer = line.lock.offer().and_then(|offer| live.get(&offer));

            if let Err(rejection) = validate_line(line, product, offer, point_in_time) {
                warn!(
                    product_uuid = %rejection.product(),
                    reason = %rejection,
                    "checkout rejected"
                );

                return Err(rejection.into());
            }

            let catalog_price = product.map_or(0, |product| product.price);

            historical.push(historical_line(OrderLineUuid::new(), line, catalog_price));
        }

        let totals = order_totals(&historical).ok_or(OrdersServiceError::InvalidData)?;

        span.record("total", totals.total);

        let mut placed = self
            .orders
            .create_order(&mut tx, order.uuid, customer, totals, point_in_time)
            .await?;

        for line in &historical {
            self.orders.create_line(&mut tx, placed.uuid, line).await?;

            if let Some(offer) = line.offer_uuid {
                self.ledger
                    .increment(&mut tx, offer, line.quantity)
                    .await
                    .map_err(|error| ledger_error(error, line.product_uuid))?;
            }

            let decremented = self
                .products
                .decrement_stock(&mut tx, line.product_uuid, line.quantity)
                .await?;

            if decremented == 0 {
                return Err(OrdersServiceError::StockExceeded {
                    product: line.product_uuid,
                });
            }
        }

        let consumed: Vec<CartLineUuid> = cart.iter().map(|line| line.uuid).collect();

        self.lines.delete_lines(&mut tx, customer, &consumed).await?;

        tx.commit().await?;

        let sold: Vec<ProductUuid> = historical
            .iter()
            .filter(|line| line.was_on_flash_sale)
            .map(|line| line.product_uuid)
            .collect();

        self.cache.invalidate_products(&sold).await;

        placed.lines = historical;

        info!(
            order_uuid = %placed.uuid,
            total = placed.total,
            savings = placed.savings,
            "placed order"
        );

        Ok(placed)
    }

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.orders.get_order(&mut tx, customer, order).await?;

        tx.commit().await?;

        Ok(record)
    }
}

/// Checkout and order history.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Validate every cart line and place the order in one transaction. The
    /// first failing line aborts the order and leaves the cart as it was.
    async fn place_order(
        &self,
        customer: CustomerUuid,
        order: NewOrder,
        point_in_time: Timestamp,
    ) -> Result<OrderRecord, OrdersServiceError>;

    async fn get_order(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
