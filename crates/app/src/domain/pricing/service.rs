//! Pricing Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::{
    database::Db,
    domain::{
        campaigns::records::OfferUuid,
        pricing::{
            availability::{self, Availability},
            cache::{CachedCandidates, OfferCache},
            eligibility::select_offer,
            errors::PricingServiceError,
            records::{OfferCandidate, PriceQuote},
            repository::PgPricingRepository,
        },
        products::{records::ProductUuid, repository::PgProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgPricingService {
    db: Db,
    cache: Arc<dyn OfferCache>,
    repository: PgPricingRepository,
    products: PgProductsRepository,
}

impl PgPricingService {
    #[must_use]
    pub fn new(db: Db, cache: Arc<dyn OfferCache>) -> Self {
        Self {
            db,
            cache,
            repository: PgPricingRepository::new(),
            products: PgProductsRepository::new(),
        }
    }

    /// Candidate offers per product, from the cache where it can answer for
    /// `as_of` and from storage otherwise.
    async fn candidates(
        &self,
        products: &[ProductUuid],
        as_of: Timestamp,
    ) -> Result<FxHashMap<ProductUuid, Arc<[OfferCandidate]>>, PricingServiceError> {
        let mut found = FxHashMap::default();
        let mut seen = FxHashSet::default();
        let mut misses = Vec::new();

        for &product in products {
            if !seen.insert(product) {
                continue;
            }

            match self.cache.get(product).await {
                Some(entry) if entry.covers(as_of) => {
                    debug!(product_uuid = %product, "offer cache hit");
                    found.insert(product, entry.candidates);
                }
                _ => misses.push(product),
            }
        }

        if misses.is_empty() {
            return Ok(found);
        }

        debug!(misses = misses.len(), "offer cache miss");

        let mut tx = self.db.begin().await?;

        let loaded = self
            .repository
            .list_candidates(&mut tx, &misses, as_of)
            .await?;

        tx.commit().await?;

        let mut grouped: FxHashMap<ProductUuid, Vec<OfferCandidate>> =
            misses.iter().map(|product| (*product, Vec::new())).collect();

        for candidate in loaded {
            grouped
                .entry(candidate.product_uuid)
                .or_default()
                .push(candidate);
        }

        for (product, candidates) in grouped {
            let entry = CachedCandidates::new(as_of, candidates);

            self.cache.insert(product, entry.clone()).await;

            found.insert(product, entry.candidates);
        }

        Ok(found)
    }
}

#[async_trait]
impl PricingService for PgPricingService {
    async fn resolve(
        &self,
        product: ProductUuid,
        as_of: Timestamp,
    ) -> Result<Option<OfferCandidate>, PricingServiceError> {
        let candidates = self.candidates(&[product], as_of).await?;

        Ok(candidates
            .get(&product)
            .and_then(|candidates| select_offer(candidates, as_of))
            .cloned())
    }

    async fn resolve_bulk(
        &self,
        products: &[ProductUuid],
        as_of: Timestamp,
    ) -> Result<FxHashMap<ProductUuid, OfferCandidate>, PricingServiceError> {
        let candidates = self.candidates(products, as_of).await?;

        Ok(candidates
            .iter()
            .filter_map(|(product, candidates)| {
                select_offer(candidates, as_of).map(|offer| (*product, offer.clone()))
            })
            .collect())
    }

    async fn quote_prices(
        &self,
        products: &[ProductUuid],
        as_of: Timestamp,
    ) -> Result<Vec<PriceQuote>, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let catalog: FxHashMap<ProductUuid, _> = self
            .products
            .get_products(&mut tx, products)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        tx.commit().await?;

        let offers = self.resolve_bulk(products, as_of).await?;
        let mut seen = FxHashSet::default();

        Ok(products
            .iter()
            .filter(|product| seen.insert(**product))
            .filter_map(|product| catalog.get(product))
            .map(|product| {
                let offer = offers.get(&product.uuid);

                PriceQuote {
                    product_uuid: product.uuid,
                    catalog_price: product.price,
                    effective_price: offer.map_or(product.price, |offer| offer.sale_price),
                    available: product.can_supply(1),
                    badge: offer.map(OfferCandidate::badge),
                }
            })
            .collect())
    }

    async fn check_purchase(
        &self,
        offer: OfferUuid,
        quantity: u64,
        as_of: Timestamp,
    ) -> Result<Availability, PricingServiceError> {
        let mut tx = self.db.begin().await?;

        let candidate = self.repository.get_candidate(&mut tx, offer).await?;

        tx.commit().await?;

        Ok(availability::check(candidate.as_ref(), quantity, as_of))
    }

    async fn can_purchase(
        &self,
        offer: OfferUuid,
        quantity: u64,
        as_of: Timestamp,
    ) -> Result<bool, PricingServiceError> {
        Ok(self
            .check_purchase(offer, quantity, as_of)
            .await?
            .is_available())
    }
}

/// Price resolver and availability gate.
#[automock]
#[async_trait]
pub trait PricingService: Send + Sync {
    /// The single offer applying to `product` at `as_of`, if any.
    async fn resolve(
        &self,
        product: ProductUuid,
        as_of: Timestamp,
    ) -> Result<Option<OfferCandidate>, PricingServiceError>;

    /// Applicable offers keyed by product; products without one are absent.
    async fn resolve_bulk(
        &self,
        products: &[ProductUuid],
        as_of: Timestamp,
    ) -> Result<FxHashMap<ProductUuid, OfferCandidate>, PricingServiceError>;

    /// Catalog and effective prices, in request order. Unknown products are
    /// omitted.
    async fn quote_prices(
        &self,
        products: &[ProductUuid],
        as_of: Timestamp,
    ) -> Result<Vec<PriceQuote>, PricingServiceError>;

    /// Whether `quantity` may be bought at the offer's sale price, and if not
    /// why. Always reads the offer live.
    async fn check_purchase(
        &self,
        offer: OfferUuid,
        quantity: u64,
        as_of: Timestamp,
    ) -> Result<Availability, PricingServiceError>;

    /// [`PricingService::check_purchase`] reduced to a yes or no.
    async fn can_purchase(
        &self,
        offer: OfferUuid,
        quantity: u64,
        as_of: Timestamp,
    ) -> Result<bool, PricingServiceError>;
}
