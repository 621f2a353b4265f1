pub mod client;
pub mod normalize;
pub mod types;

use moka::future::Cache;
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;

pub type AnimationCache = Cache<String, CachedAnimations>;

/// Entries expire `ttl` after insertion; a stale entry is never returned by `get`.
pub fn init_cache(config: &Config) -> AnimationCache {
    build_cache(config.cache_max_entries, config.cache_ttl())
}

pub fn build_cache(max_entries: u64, ttl: Duration) -> AnimationCache {
    Cache::builder()
        .max_capacity(max_entries)
        .time_to_live(ttl)
        .build()
}

#[derive(Clone, Debug)]
pub struct CachedAnimations {
    pub data: Value,
    pub cached_at: chrono::DateTime<chrono::Utc>,
}
