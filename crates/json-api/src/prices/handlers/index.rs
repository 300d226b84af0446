//! Price Quote Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use flashsale_app::domain::{
    pricing::records::{FlashSaleBadge, PriceQuote},
    products::records::ProductUuid,
};

use crate::{extensions::*, state::State};

/// Most products one request may quote.
const MAX_PRODUCTS: usize = 100;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FlashSaleBadgeResponse {
    pub offer_uuid: Uuid,
    pub campaign_uuid: Uuid,
    pub original_price: u64,
    pub sale_price: u64,
    pub discount_percentage: String,
    /// When the sale ends
    pub ends_at: String,
    /// Units left at the sale price; absent when uncapped
    pub remaining: Option<u64>,
}

impl From<FlashSaleBadge> for FlashSaleBadgeResponse {
    fn from(badge: FlashSaleBadge) -> Self {
        Self {
            offer_uuid: badge.offer_uuid.into_uuid(),
            campaign_uuid: badge.campaign_uuid.into_uuid(),
            original_price: badge.original_price,
            sale_price: badge.sale_price,
            discount_percentage: badge.discount_percentage.to_string(),
            ends_at: badge.ends_at.to_string(),
            remaining: badge.remaining,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceQuoteResponse {
    pub product_uuid: Uuid,

    pub catalog_price: u64,

    /// The sale price during a flash sale, otherwise the catalog price
    pub effective_price: u64,

    /// Whether the product can currently be bought
    pub available: bool,

    pub flash_sale: Option<FlashSaleBadgeResponse>,
}

impl From<PriceQuote> for PriceQuoteResponse {
    fn from(quote: PriceQuote) -> Self {
        Self {
            product_uuid: quote.product_uuid.into_uuid(),
            catalog_price: quote.catalog_price,
            effective_price: quote.effective_price,
            available: quote.available,
            flash_sale: quote.badge.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PriceQuotesResponse {
    /// Quotes in request order; unknown products are left out
    pub prices: Vec<PriceQuoteResponse>,
}

fn parse_products(value: &str) -> Result<Vec<ProductUuid>, StatusError> {
    let products = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::parse::<ProductUuid>)
        .collect::<Result<Vec<_>, _>>()
        .or_400("could not parse \"products\" query parameter")?;

    if products.is_empty() || products.len() > MAX_PRODUCTS {
        return Err(StatusError::bad_request()
            .brief(format!("between 1 and {MAX_PRODUCTS} products may be quoted")));
    }

    Ok(products)
}

/// Price Quote Handler
///
/// Effective prices for a comma-separated list of products at `at`, or now.
#[endpoint(tags("prices"), summary = "Quote Prices")]
pub(crate) async fn handler(
    products: QueryParam<String, true>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PriceQuotesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time(state.app.clock.as_ref())?;
    let products = parse_products(&products.into_inner())?;

    let quotes = state
        .app
        .pricing
        .quote_prices(&products, point_in_time)
        .await
        .or_500("failed to quote prices")?;

    Ok(Json(PriceQuotesResponse {
        prices: quotes.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rust_decimal::Decimal;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use flashsale_app::domain::campaigns::records::{CampaignUuid, OfferUuid};

    use crate::test_helpers::{Mocks, TEST_NOW};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        mocks.into_service(Router::with_path("prices").get(handler))
    }

    #[tokio::test]
    async fn test_quotes_keep_request_order_and_badges() -> TestResult {
        let on_sale = ProductUuid::new();
        let full_price = ProductUuid::new();
        let offer = OfferUuid::new();
        let ends_at = TEST_NOW + SignedDuration::from_hours(2);

        let mut mocks = Mocks::default();

        mocks
            .pricing
            .expect_quote_prices()
            .once()
            .withf(move |products, as_of| {
                products == [on_sale, full_price].as_slice() && *as_of == TEST_NOW
            })
            .return_once(move |_, _| {
                Ok(vec![
                    PriceQuote {
                        product_uuid: on_sale,
                        catalog_price: 100,
                        effective_price: 70,
                        available: true,
                        badge: Some(FlashSaleBadge {
                            offer_uuid: offer,
                            campaign_uuid: CampaignUuid::new(),
                            original_price: 100,
                            sale_price: 70,
                            discount_percentage: Decimal::from(30),
                            ends_at,
                            remaining: Some(5),
                        }),
                    },
                    PriceQuote {
                        product_uuid: full_price,
                        catalog_price: 250,
                        effective_price: 250,
                        available: true,
                        badge: None,
                    },
                ])
            });

        let body: PriceQuotesResponse = TestClient::get(format!(
            "http://example.com/prices?products={on_sale},{full_price}"
        ))
        .send(&make_service(mocks))
        .await
        .take_json()
        .await?;

        assert_eq!(body.prices.len(), 2, "expected two quotes");
        assert_eq!(body.prices[0].effective_price, 70);

        let badge = body.prices[0].flash_sale.as_ref();

        assert_eq!(badge.map(|b| b.offer_uuid), Some(offer.into_uuid()));
        assert_eq!(badge.and_then(|b| b.remaining), Some(5));
        assert!(body.prices[1].flash_sale.is_none(), "expected no badge");

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_product_list_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/prices?products=abc")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_product_list_returns_400() -> TestResult {
        let res = TestClient::get("http://example.com/prices?products=,")
            .send(&make_service(Mocks::default()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
