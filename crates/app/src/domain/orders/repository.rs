//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{
        try_get_amount, try_get_optional_amount, try_i64_from_u64, try_optional_i64_from_u64,
    },
    domain::{
        campaigns::records::OfferUuid,
        carts::records::CustomerUuid,
        orders::{
            checkout::OrderTotals,
            records::{OrderLineRecord, OrderLineUuid, OrderRecord, OrderUuid},
        },
        products::records::ProductUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_LINE_SQL: &str = include_str!("sql/create_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LIST_ORDER_LINES_SQL: &str = include_str!("sql/list_order_lines.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert the order header. The returned record has no lines.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: OrderUuid,
        customer: CustomerUuid,
        totals: OrderTotals,
        placed_at: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Postgres, OrderRecord>(CREATE_ORDER_SQL)
            .bind(uuid.into_uuid())
            .bind(customer.into_uuid())
            .bind(try_i64_from_u64(totals.total, "total")?)
            .bind(try_i64_from_u64(totals.savings, "savings")?)
            .bind(SqlxTimestamp::from(placed_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_line(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        line: &OrderLineRecord,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_LINE_SQL)
            .bind(line.uuid.into_uuid())
            .bind(order.into_uuid())
            .bind(line.product_uuid.into_uuid())
            .bind(try_i64_from_u64(line.quantity, "quantity")?)
            .bind(try_i64_from_u64(line.unit_price, "unit_price")?)
            .bind(line.offer_uuid.map(OfferUuid::into_uuid))
            .bind(line.was_on_flash_sale)
            .bind(try_optional_i64_from_u64(line.discount, "discount")?)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// The customer's order with its lines.
    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut record = query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        record.lines = query_as::<Postgres, OrderLineRecord>(LIST_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(record)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            customer_uuid: CustomerUuid::from_uuid(row.try_get("customer_uuid")?),
            total: try_get_amount(row, "total")?,
            savings: try_get_amount(row, "savings")?,
            placed_at: row.try_get::<SqlxTimestamp, _>("placed_at")?.to_jiff(),
            lines: Vec::new(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for OrderLineRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let offer: Option<Uuid> = row.try_get("offer_uuid")?;

        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            quantity: try_get_amount(row, "quantity")?,
            unit_price: try_get_amount(row, "unit_price")?,
            offer_uuid: offer.map(OfferUuid::from_uuid),
            was_on_flash_sale: row.try_get("was_on_flash_sale")?,
            discount: try_get_optional_amount(row, "discount")?,
        })
    }
}
