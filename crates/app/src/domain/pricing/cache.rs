//! Offer Cache
//!
//! Short-lived read cache in front of the price resolver, keyed by product.
//! Entries hold a product's *candidate* offers (enabled campaigns whose
//! window had not ended when loaded), so eligibility is still evaluated on
//! every read and windows open and close without a write.

use std::{fmt::Debug, sync::Arc, time::Duration};

use async_trait::async_trait;
use jiff::Timestamp;
use moka::future::Cache;

use crate::domain::{pricing::records::OfferCandidate, products::records::ProductUuid};

/// Default entry lifetime.
pub const DEFAULT_TIME_TO_LIVE: Duration = Duration::from_secs(300);

/// Default number of products held.
pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;

/// Candidate offers for one product, loaded as of `loaded_as_of`.
#[derive(Debug, Clone)]
pub struct CachedCandidates {
    pub loaded_as_of: Timestamp,
    pub candidates: Arc<[OfferCandidate]>,
}

impl CachedCandidates {
    #[must_use]
    pub fn new(loaded_as_of: Timestamp, candidates: Vec<OfferCandidate>) -> Self {
        Self {
            loaded_as_of,
            candidates: candidates.into(),
        }
    }

    /// Offers that ended before the load are missing, so earlier points in
    /// time cannot be answered from this entry.
    #[must_use]
    pub fn covers(&self, as_of: Timestamp) -> bool {
        as_of >= self.loaded_as_of
    }
}

#[async_trait]
pub trait OfferCache: Debug + Send + Sync {
    async fn get(&self, product: ProductUuid) -> Option<CachedCandidates>;

    async fn insert(&self, product: ProductUuid, entry: CachedCandidates);

    async fn invalidate_product(&self, product: ProductUuid);

    async fn invalidate_products(&self, products: &[ProductUuid]) {
        for product in products {
            self.invalidate_product(*product).await;
        }
    }
}

/// Cache sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheSettings {
    pub time_to_live: Duration,
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            time_to_live: DEFAULT_TIME_TO_LIVE,
            max_capacity: DEFAULT_MAX_CAPACITY,
        }
    }
}

/// In-process [`OfferCache`] backed by `moka`.
#[derive(Debug, Clone)]
pub struct MokaOfferCache {
    inner: Cache<ProductUuid, CachedCandidates>,
}

impl MokaOfferCache {
    #[must_use]
    pub fn new(settings: CacheSettings) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(settings.max_capacity)
                .time_to_live(settings.time_to_live)
                .build(),
        }
    }
}

impl Default for MokaOfferCache {
    fn default() -> Self {
        Self::new(CacheSettings::default())
    }
}

#[async_trait]
impl OfferCache for MokaOfferCache {
    async fn get(&self, product: ProductUuid) -> Option<CachedCandidates> {
        self.inner.get(&product).await
    }

    async fn insert(&self, product: ProductUuid, entry: CachedCandidates) {
        self.inner.insert(product, entry).await;
    }

    async fn invalidate_product(&self, product: ProductUuid) {
        self.inner.invalidate(&product).await;
    }
}
