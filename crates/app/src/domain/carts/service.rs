//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        campaigns::validation::ValidationError,
        carts::{
            data::NewCartItem,
            errors::CartsServiceError,
            lock::{Rejection, lock_new_line, offer_to_revalidate, relock_line},
            records::{CartLineRecord, CartLineView, CartView, CustomerUuid, PriceLock},
            repository::PgCartLinesRepository,
        },
        pricing::{eligibility::select_offer, repository::PgPricingRepository},
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    lines: PgCartLinesRepository,
    products: PgProductsRepository,
    pricing: PgPricingRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            lines: PgCartLinesRepository::new(),
            products: PgProductsRepository::new(),
            pricing: PgPricingRepository::new(),
        }
    }

    async fn get_product(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, CartsServiceError> {
        match self.products.get_product(tx, product).await {
            Ok(record) => Ok(record),
            Err(sqlx::Error::RowNotFound) => Err(CartsServiceError::ProductNotFound { product }),
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, customer: CustomerUuid) -> Result<CartView, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.lines.list_lines(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(CartView::new(
            customer,
            lines
                .into_iter()
                .map(|(line, catalog_price)| CartLineView::new(line, catalog_price))
                .collect(),
        ))
    }

    #[tracing::instrument(
        name = "carts.service.add_item",
        skip(self, item),
        fields(
            customer_uuid = %customer,
            product_uuid = %item.product_uuid,
            quantity = item.quantity,
            merged = tracing::field::Empty,
            locked = tracing::field::Empty
        ),
        err
    )]
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
        point_in_time: Timestamp,
    ) -> Result<CartLineRecord, CartsServiceError> {
        if item.quantity == 0 {
            return Err(ValidationError::ZeroQuantity.into());
        }

        let mut tx = self.db.begin().await?;

        let product = self.get_product(&mut tx, item.product_uuid).await?;

        let existing = self
            .lines
            .get_line_for_update(&mut tx, customer, product.uuid)
            .await?;

        let span = Span::current();

        span.record("merged", existing.is_some());

        let line = match existing {
            None => {
                let candidates = self
                    .pricing
                    .list_candidates(&mut tx, &[product.uuid], point_in_time)
                    .await?;

                let resolved = select_offer(&candidates, point_in_time);
                let lock = lock_new_line(&product, item.quantity, resolved, point_in_time)?;

                self.lines
                    .create_line(
                        &mut tx,
                        item.uuid,
                        customer,
                        product.uuid,
                        item.quantity,
                        lock,
                    )
                    .await?
            }
            Some(line) => {
                let quantity = line
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or(Rejection::StockExceeded(product.uuid))?;

                let live = match offer_to_revalidate(&line.lock, item.offer_uuid) {
                    Some(offer) => self.pricing.get_candidate(&mut tx, offer).await?,
                    None => None,
                };

                let lock = relock_line(
                    &line.lock,
                    &product,
                    quantity,
                    item.offer_uuid,
                    live.as_ref(),
                    point_in_time,
                )?;

                self.lines
                    .update_line(&mut tx, line.uuid, quantity, lock)
                    .await?
            }
        };

        span.record("locked", line.lock != PriceLock::Unlocked);

        tx.commit().await?;

        info!(
            cart_line_uuid = %line.uuid,
            quantity = line.quantity,
            locked_price = ?line.lock.price(),
            "added cart item"
        );

        Ok(line)
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self),
        fields(customer_uuid = %customer, product_uuid = %product, quantity = quantity),
        err
    )]
    async fn update_quantity(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        quantity: u64,
        point_in_time: Timestamp,
    ) -> Result<Option<CartLineRecord>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let line = self
            .lines
            .get_line_for_update(&mut tx, customer, product)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if quantity == 0 {
            self.lines.delete_line(&mut tx, customer, product).await?;

            tx.commit().await?;

            info!(cart_line_uuid = %line.uuid, "removed cart item");

            return Ok(None);
        }

        let record = self.get_product(&mut tx, product).await?;

        let live = match line.lock.offer() {
            Some(offer) => self.pricing.get_candidate(&mut tx, offer).await?,
            None => None,
        };

        let lock = relock_line(
            &line.lock,
            &record,
            quantity,
            None,
            live.as_ref(),
            point_in_time,
        )?;

        let updated = self
            .lines
            .update_line(&mut tx, line.uuid, quantity, lock)
            .await?;

        tx.commit().await?;

        info!(cart_line_uuid = %updated.uuid, quantity, "updated cart item");

        Ok(Some(updated))
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(customer_uuid = %customer, product_uuid = %product),
        err
    )]
    async fn remove_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.lines.delete_line(&mut tx, customer, product).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(customer_uuid = %customer, product_uuid = %product, "removed cart item");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.release_lock",
        skip(self),
        fields(customer_uuid = %customer, product_uuid = %product),
        err
    )]
    async fn release_lock(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let line = self
            .lines
            .get_line_for_update(&mut tx, customer, product)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        let released = self
            .lines
            .update_line(&mut tx, line.uuid, line.quantity, PriceLock::Unlocked)
            .await?;

        tx.commit().await?;

        info!(cart_line_uuid = %released.uuid, "released price lock");

        Ok(released)
    }
}

/// Cart lines and their price locks. Every rejection leaves the cart as it
/// was.
#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// The customer's cart priced for display.
    async fn get_cart(&self, customer: CustomerUuid) -> Result<CartView, CartsServiceError>;

    /// Add a product, merging into an existing line for the same product.
    async fn add_item(
        &self,
        customer: CustomerUuid,
        item: NewCartItem,
        point_in_time: Timestamp,
    ) -> Result<CartLineRecord, CartsServiceError>;

    /// Set a line's quantity. Zero removes the line and returns `None`.
    async fn update_quantity(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
        quantity: u64,
        point_in_time: Timestamp,
    ) -> Result<Option<CartLineRecord>, CartsServiceError>;

    async fn remove_item(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<(), CartsServiceError>;

    /// Drop a line's lock so it is priced from the catalog again.
    async fn release_lock(
        &self,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<CartLineRecord, CartsServiceError>;
}
