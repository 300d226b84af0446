//! Offers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rust_decimal::Decimal;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{
        try_get_amount, try_get_optional_amount, try_i64_from_u64, try_optional_i64_from_u64,
    },
    domain::{
        campaigns::records::{CampaignUuid, OfferRecord, OfferUuid},
        products::records::ProductUuid,
    },
};

const LIST_OFFERS_SQL: &str = include_str!("../sql/list_offers.sql");
const GET_OFFER_FOR_UPDATE_SQL: &str = include_str!("../sql/get_offer_for_update.sql");
const CREATE_OFFER_SQL: &str = include_str!("../sql/create_offer.sql");
const UPDATE_OFFER_SQL: &str = include_str!("../sql/update_offer.sql");
const DELETE_OFFER_SQL: &str = include_str!("../sql/delete_offer.sql");
const LIST_CAMPAIGN_PRODUCTS_SQL: &str = include_str!("../sql/list_campaign_products.sql");

const COLUMN_ORIGINAL_PRICE: &str = "original_price";
const COLUMN_SALE_PRICE: &str = "sale_price";
const COLUMN_STOCK_CAP: &str = "stock_cap";
const COLUMN_VERSION: &str = "version";

/// Column values for a new offer row.
#[derive(Debug, Clone)]
pub(crate) struct OfferFields {
    pub uuid: OfferUuid,
    pub product_uuid: ProductUuid,
    pub original_price: u64,
    pub sale_price: u64,
    pub discount_percentage: Decimal,
    pub stock_cap: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOffersRepository;

impl PgOffersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_offers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<Vec<OfferRecord>, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(LIST_OFFERS_SQL)
            .bind(campaign.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_offer_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
        offer: OfferUuid,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(GET_OFFER_FOR_UPDATE_SQL)
            .bind(offer.into_uuid())
            .bind(campaign.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
        fields: OfferFields,
    ) -> Result<OfferRecord, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(CREATE_OFFER_SQL)
            .bind(fields.uuid.into_uuid())
            .bind(campaign.into_uuid())
            .bind(fields.product_uuid.into_uuid())
            .bind(try_i64_from_u64(fields.original_price, COLUMN_ORIGINAL_PRICE)?)
            .bind(try_i64_from_u64(fields.sale_price, COLUMN_SALE_PRICE)?)
            .bind(fields.discount_percentage)
            .bind(try_optional_i64_from_u64(fields.stock_cap, COLUMN_STOCK_CAP)?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the stored version no longer matches.
    pub(crate) async fn update_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        sale_price: u64,
        discount_percentage: Decimal,
        stock_cap: Option<u64>,
        expected_version: u64,
    ) -> Result<Option<OfferRecord>, sqlx::Error> {
        query_as::<Postgres, OfferRecord>(UPDATE_OFFER_SQL)
            .bind(offer.into_uuid())
            .bind(try_i64_from_u64(sale_price, COLUMN_SALE_PRICE)?)
            .bind(discount_percentage)
            .bind(try_optional_i64_from_u64(stock_cap, COLUMN_STOCK_CAP)?)
            .bind(try_i64_from_u64(expected_version, COLUMN_VERSION)?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
        offer: OfferUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_OFFER_SQL)
            .bind(offer.into_uuid())
            .bind(campaign.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Products carrying an offer in the campaign.
    pub(crate) async fn list_campaign_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<Vec<ProductUuid>, sqlx::Error> {
        let products: Vec<Uuid> = query_scalar(LIST_CAMPAIGN_PRODUCTS_SQL)
            .bind(campaign.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(products.into_iter().map(ProductUuid::from_uuid).collect())
    }
}

impl<'r> FromRow<'r, PgRow> for OfferRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OfferUuid::from_uuid(row.try_get("uuid")?),
            campaign_uuid: CampaignUuid::from_uuid(row.try_get("campaign_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            original_price: try_get_amount(row, COLUMN_ORIGINAL_PRICE)?,
            sale_price: try_get_amount(row, COLUMN_SALE_PRICE)?,
            discount_percentage: row.try_get("discount_percentage")?,
            stock_cap: try_get_optional_amount(row, COLUMN_STOCK_CAP)?,
            sold_count: try_get_amount(row, "sold_count")?,
            version: try_get_amount(row, COLUMN_VERSION)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
