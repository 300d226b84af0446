//! Campaign Reports Repository

use sqlx::{FromRow, Postgres, Transaction, query, query_scalar};

use crate::{
    database::try_get_amount,
    domain::campaigns::records::{CampaignUuid, OfferPerformance, OfferRecord},
};

const OFFER_PERFORMANCE_SQL: &str = include_str!("../sql/offer_performance.sql");
const CAMPAIGN_ORDER_COUNT_SQL: &str = include_str!("../sql/campaign_order_count.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgReportsRepository;

impl PgReportsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Sales per offer, taken from historical order lines.
    pub(crate) async fn offer_performance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<Vec<OfferPerformance>, sqlx::Error> {
        let rows = query(OFFER_PERFORMANCE_SQL)
            .bind(campaign.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok(OfferPerformance {
                    offer: OfferRecord::from_row(row)?,
                    units_sold: try_get_amount(row, "units_sold")?,
                    revenue: try_get_amount(row, "revenue")?,
                    discount_granted: try_get_amount(row, "discount_granted")?,
                    orders: try_get_amount(row, "orders")?,
                })
            })
            .collect()
    }

    /// Distinct orders containing any of the campaign's offers.
    pub(crate) async fn order_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        campaign: CampaignUuid,
    ) -> Result<u64, sqlx::Error> {
        let count: i64 = query_scalar(CAMPAIGN_ORDER_COUNT_SQL)
            .bind(campaign.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        u64::try_from(count).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })
    }
}
