//! Ledger Repository

use sqlx::{Postgres, Transaction, query_scalar};

use crate::{
    database::try_i64_from_u64,
    domain::{campaigns::records::OfferUuid, ledger::LedgerError},
};

const INCREMENT_SOLD_COUNT_SQL: &str = include_str!("sql/increment_sold_count.sql");
const OFFER_EXISTS_SQL: &str = include_str!("sql/offer_exists.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgLedgerRepository;

impl PgLedgerRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Add `quantity` to the offer's sold count, returning the new count.
    pub(crate) async fn increment(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        offer: OfferUuid,
        quantity: u64,
    ) -> Result<u64, LedgerError> {
        let sold_count: Option<i64> = query_scalar(INCREMENT_SOLD_COUNT_SQL)
            .bind(offer.into_uuid())
            .bind(try_i64_from_u64(quantity, "sold_count")?)
            .fetch_optional(&mut **tx)
            .await?;

        if let Some(sold_count) = sold_count {
            return u64::try_from(sold_count).map_err(|e| {
                LedgerError::Sql(sqlx::Error::ColumnDecode {
                    index: "sold_count".to_string(),
                    source: Box::new(e),
                })
            });
        }

        let exists: bool = query_scalar(OFFER_EXISTS_SQL)
            .bind(offer.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        if exists {
            Err(LedgerError::StockExceeded)
        } else {
            Err(LedgerError::NotFound)
        }
    }
}
