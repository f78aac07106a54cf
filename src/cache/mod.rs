//! Cache layer
//!
//! In-process cache for per-user post lists, backed by moka. Entries share a
//! single capacity bound and time-to-live configured at startup; once the TTL
//! elapses the next read falls through to the database.

pub mod memory;

pub use memory::MemoryCache;

use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

/// Create the post cache from configuration
pub fn create_cache(config: &CacheConfig) -> Arc<MemoryCache> {
    Arc::new(MemoryCache::with_capacity_and_ttl(
        config.capacity,
        Duration::from_secs(config.ttl_seconds),
    ))
}
