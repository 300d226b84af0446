//! Pricing Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::{try_get_amount, try_get_optional_amount},
    domain::{
        campaigns::{
            records::{CampaignStatus, CampaignUuid, OfferUuid},
            window::SaleWindow,
        },
        pricing::records::OfferCandidate,
        products::records::ProductUuid,
    },
};

const LIST_CANDIDATES_FOR_PRODUCTS_SQL: &str =
    include_str!("sql/list_candidates_for_products.sql");
const GET_CANDIDATE_SQL: &str = include_str!("sql/get_candidate.sql");
const SHARE_CANDIDATES_FOR_OFFERS_SQL: &str = include_str!("sql/share_candidates_for_offers.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPricingRepository;

impl PgPricingRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Offers for the products whose campaign is enabled and has not ended
    /// by `as_of`.
    pub(crate) async fn list_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[ProductUuid],
        as_of: Timestamp,
    ) -> Result<Vec<OfferCandidate>, sqlx::Error> {
        let uuids: Vec<Uuid> = products.iter().map(|p| p.into_uuid()).collect();

        query_as::<Postgres, OfferCandidate>(LIST_CANDIDATES_FOR_PRODUCTS_SQL)
            .bind(uuids)
            .bind(SqlxTimestamp::from(as_of))
            .fetch_all(&mut **tx)
            .await
    }

    /// A single offer regardless of its campaign's status.
    pub(crate) async fn get_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
    ) -> Result<Option<OfferCandidate>, sqlx::Error> {
        query_as::<Postgres, OfferCandidate>(GET_CANDIDATE_SQL)
            .bind(offer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// The given offers, holding their campaigns against concurrent status
    /// changes until the transaction ends.
    pub(crate) async fn share_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offers: &[OfferUuid],
    ) -> Result<Vec<OfferCandidate>, sqlx::Error> {
        let uuids: Vec<Uuid> = offers.iter().map(|o| o.into_uuid()).collect();

        query_as::<Postgres, OfferCandidate>(SHARE_CANDIDATES_FOR_OFFERS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for OfferCandidate {
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
            offer_uuid: OfferUuid::from_uuid(row.try_get("offer_uuid")?),
            campaign_uuid: CampaignUuid::from_uuid(row.try_get("campaign_uuid")?),
            product_uuid: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            original_price: try_get_amount(row, "original_price")?,
            sale_price: try_get_amount(row, "sale_price")?,
            discount_percentage: row.try_get("discount_percentage")?,
            stock_cap: try_get_optional_amount(row, "stock_cap")?,
            sold_count: try_get_amount(row, "sold_count")?,
            status,
            window,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
