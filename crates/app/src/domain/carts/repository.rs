//! Cart Lines Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{
        try_get_amount, try_get_optional_amount, try_i64_from_u64, try_optional_i64_from_u64,
    },
    domain::{
        campaigns::records::OfferUuid,
        carts::records::{CartLineRecord, CartLineUuid, CustomerUuid, PriceLock},
        products::records::ProductUuid,
    },
};

const LIST_CART_LINES_SQL: &str = include_str!("sql/list_cart_lines.sql");
const GET_CART_LINE_FOR_UPDATE_SQL: &str = include_str!("sql/get_cart_line_for_update.sql");
const LOCK_CART_LINES_SQL: &str = include_str!("sql/lock_cart_lines.sql");
const CREATE_CART_LINE_SQL: &str = include_str!("sql/create_cart_line.sql");
const UPDATE_CART_LINE_SQL: &str = include_str!("sql/update_cart_line.sql");
const DELETE_CART_LINE_SQL: &str = include_str!("sql/delete_cart_line.sql");
const DELETE_CART_LINES_SQL: &str = include_str!("sql/delete_cart_lines.sql");

const COLUMN_QUANTITY: &str = "quantity";
const COLUMN_LOCKED_PRICE: &str = "locked_price";

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartLinesRepository;

impl PgCartLinesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// The customer's lines, each with its product's live catalog price.
    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<(CartLineRecord, u64)>, sqlx::Error> {
        let rows = query(LIST_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| Ok((CartLineRecord::from_row(row)?, try_get_amount(row, "catalog_price")?)))
            .collect()
    }

    pub(crate) async fn get_line_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<Option<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(GET_CART_LINE_FOR_UPDATE_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Every line of the cart, locked until the transaction ends.
    pub(crate) async fn lock_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Vec<CartLineRecord>, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(LOCK_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CartLineUuid,
        customer: CustomerUuid,
        product: ProductUuid,
        quantity: u64,
        lock: PriceLock,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(CREATE_CART_LINE_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .bind(try_i64_from_u64(quantity, COLUMN_QUANTITY)?)
            .bind(lock.offer().map(OfferUuid::into_uuid))
            .bind(try_optional_i64_from_u64(lock.price(), COLUMN_LOCKED_PRICE)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        line: CartLineUuid,
        quantity: u64,
        lock: PriceLock,
    ) -> Result<CartLineRecord, sqlx::Error> {
        query_as::<Postgres, CartLineRecord>(UPDATE_CART_LINE_SQL)
            .bind(line.into_uuid())
            .bind(try_i64_from_u64(quantity, COLUMN_QUANTITY)?)
            .bind(lock.offer().map(OfferUuid::into_uuid))
            .bind(try_optional_i64_from_u64(lock.price(), COLUMN_LOCKED_PRICE)?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_LINE_SQL)
            .bind(customer.into_uuid())
            .bind(product.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Delete the given lines of the customer's cart. Lines not listed are
    /// kept, even if they were added after the cart was read.
    pub(crate) async fn delete_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        lines: &[CartLineUuid],
    ) -> Result<u64, sqlx::Error> {
        let uuids: Vec<Uuid> = lines.iter().copied().map(CartLineUuid::into_uuid).collect();

        let rows_affected = query(DELETE_CART_LINES_SQL)
            .bind(customer.into_uuid())
            .bind(uuids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for CartLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let offer: Option<Uuid> = row.try_get("offer_uuid")?;
        let locked_price = try_get_optional_amount(row, COLUMN_LOCKED_PRICE)?;

        let lock = match (offer, locked_price) {
            (Some(offer), Some(price)) => PriceLock::Locked {
                offer: OfferUuid::from_uuid(offer),
                price,
            },
            _ => PriceLock::Unlocked,
        };

        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_amount(row, COLUMN_QUANTITY)?,
            lock,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::carts::CartsService,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn deleting_locked_lines_keeps_lines_added_after_the_lock() -> TestResult {
        let ctx = TestContext::new().await;
        let ordered = helpers::create_product(&ctx, 100, 10).await?;
        let added_later = helpers::create_product(&ctx, 50, 10).await?;

        helpers::add_to_cart(&ctx, ordered.uuid, 1, None).await?;

        let repository = PgCartLinesRepository::new();
        let mut tx = ctx.db.pool().begin().await?;
        let locked = repository.lock_lines(&mut tx, ctx.customer).await?;

        // Committed by its own transaction while the cart rows are locked.
        let later = helpers::add_to_cart(&ctx, added_later.uuid, 2, None).await?;

        let consumed: Vec<CartLineUuid> = locked.iter().map(|line| line.uuid).collect();
        let deleted = repository.delete_lines(&mut tx, ctx.customer, &consumed).await?;

        tx.commit().await?;

        assert_eq!(deleted, 1, "only the locked line should be deleted");

        let cart = ctx.carts.get_cart(ctx.customer).await?;
        let remaining: Vec<CartLineUuid> = cart.lines.iter().map(|view| view.line.uuid).collect();

        assert_eq!(remaining, vec![later.uuid]);

        Ok(())
    }
}
