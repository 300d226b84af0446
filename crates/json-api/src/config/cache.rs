//! Price Cache Config

use std::time::Duration;

use clap::Args;
use flashsale_app::domain::pricing::cache::CacheSettings;

/// Offer cache settings.
#[derive(Debug, Args)]
pub struct CacheConfig {
    /// Seconds a product's cached offers stay valid
    #[arg(long, env = "PRICE_CACHE_TTL_SECONDS", default_value_t = 300)]
    pub price_cache_ttl_seconds: u64,

    /// Maximum number of products held in the cache
    #[arg(long, env = "PRICE_CACHE_CAPACITY", default_value_t = 10_000)]
    pub price_cache_capacity: u64,
}

impl CacheConfig {
    #[must_use]
    pub fn settings(&self) -> CacheSettings {
        CacheSettings {
            time_to_live: Duration::from_secs(self.price_cache_ttl_seconds),
            max_capacity: self.price_cache_capacity,
        }
    }
}
