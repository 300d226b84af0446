//! Campaigns Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_i64_from_u64},
    domain::{
        campaigns::{
            records::{CampaignRecord, CampaignStatus, CampaignUuid},
            window::SaleWindow,
        },
        products::records::ProductUuid,
    },
};

const LIST_CAMPAIGNS_SQL: &str = include_str!("../sql/list_campaigns.sql");
const GET_CAMPAIGN_SQL: &str = include_str!("../sql/get_campaign.sql");
const GET_CAMPAIGN_FOR_UPDATE_SQL: &str = include_str!("../sql/get_campaign_for_update.sql");
const CREATE_CAMPAIGN_SQL: &str = include_str!("../sql/create_campaign.sql");
const UPDATE_CAMPAIGN_SQL: &str = include_str!("../sql/update_campaign.sql");
const SET_CAMPAIGN_STATUS_SQL: &str = include_str!("../sql/set_campaign_status.sql");
const DELETE_CAMPAIGN_SQL: &str = include_str!("../sql/delete_campaign.sql");
const FIND_OVERLAPPING_OFFER_SQL: &str = include_str!("../sql/find_overlapping_offer.sql");

const COLUMN_VERSION: &str = "version";

/// Column values for a campaign insert or edit.
#[derive(Debug, Clone)]
pub(crate) struct CampaignFields<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub window: SaleWindow,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCampaignsRepository;

impl PgCampaignsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// All campaigns, newest first, each with its offer count.
    pub(crate) async fn list_campaigns(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<(CampaignRecord, u64)>, sqlx::Error> {
        let rows = query(LIST_CAMPAIGNS_SQL).fetch_all(&mut **tx).await?;

        rows.iter()
            .map(|row| Ok((CampaignRecord::from_row(row)?, try_get_amount(row, "offer_count")?)))
            .collect()
    }

    pub(crate) async fn get_campaign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<CampaignRecord, sqlx::Error> {
        query_as::<Postgres, CampaignRecord>(GET_CAMPAIGN_SQL)
            .bind(campaign.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_campaign_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<CampaignRecord, sqlx::Error> {
        query_as::<Postgres, CampaignRecord>(GET_CAMPAIGN_FOR_UPDATE_SQL)
            .bind(campaign.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_campaign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
        fields: CampaignFields<'_>,
        status: CampaignStatus,
    ) -> Result<CampaignRecord, sqlx::Error> {
        query_as::<Postgres, CampaignRecord>(CREATE_CAMPAIGN_SQL)
            .bind(campaign.into_uuid())
            .bind(fields.name)
            .bind(fields.description)
            .bind(SqlxTimestamp::from(fields.window.starts_at()))
            .bind(SqlxTimestamp::from(fields.window.ends_at()))
            .bind(status.as_str())
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the stored version no longer matches.
    pub(crate) async fn update_campaign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
        fields: CampaignFields<'_>,
        expected_version: u64,
    ) -> Result<Option<CampaignRecord>, sqlx::Error> {
        query_as::<Postgres, CampaignRecord>(UPDATE_CAMPAIGN_SQL)
            .bind(campaign.into_uuid())
            .bind(fields.name)
            .bind(fields.description)
            .bind(SqlxTimestamp::from(fields.window.starts_at()))
            .bind(SqlxTimestamp::from(fields.window.ends_at()))
            .bind(try_i64_from_u64(expected_version, COLUMN_VERSION)?)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Returns `None` when the stored version no longer matches.
    pub(crate) async fn set_status(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
        status: CampaignStatus,
        expected_version: u64,
    ) -> Result<Option<CampaignRecord>, sqlx::Error> {
        query_as::<Postgres, CampaignRecord>(SET_CAMPAIGN_STATUS_SQL)
            .bind(campaign.into_uuid())
            .bind(status.as_str())
            .bind(try_i64_from_u64(expected_version, COLUMN_VERSION)?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_campaign(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CAMPAIGN_SQL)
            .bind(campaign.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// First product among `products` that already has an offer in another
    /// enabled campaign whose window overlaps `window`.
    pub(crate) async fn find_overlapping_offer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
        excluding: CampaignUuid,
        window: SaleWindow,
    ) -> Result<Option<ProductUuid>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|p| p.into_uuid()).collect();

        let product: Option<Uuid> = query_scalar(FIND_OVERLAPPING_OFFER_SQL)
            .bind(uuids)
            .bind(excluding.into_uuid())
            .bind(SqlxTimestamp::from(window.starts_at()))
            .bind(SqlxTimestamp::from(window.ends_at()))
            .fetch_optional(&mut **tx)
            .await?;

        Ok(product.map(ProductUuid::from_uuid))
    }
}

impl<'r> FromRow<'r, PgRow> for CampaignRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<CampaignStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let window = SaleWindow::new(
            row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
            row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
        )
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "ends_at".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CampaignUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            window,
            status,
            version: try_get_amount(row, COLUMN_VERSION)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
