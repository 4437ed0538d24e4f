use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Duration;

use crate::cache::TtlCache;
use crate::quotes::AggregateResult;
use crate::quotes::aggregator::QuoteAggregator;

#[derive(Debug, Serialize)]
pub struct PlatformsResponse {
    pub platforms: AggregateResult,
    pub cached: bool,
    pub timestamp: DateTime<Utc>,
}

/// Cached access to the full aggregate view. Never fails: a pass where every
/// source is down still produces a valid aggregate, and that empty aggregate
/// is cached like any other.
///
/// The envelope timestamp is stamped on every call, cached or not. Only the
/// rate service freezes its timestamp at write time.
pub struct PlatformsService {
    aggregator: QuoteAggregator,
    cache: TtlCache<AggregateResult>,
}

impl PlatformsService {
    pub fn new(aggregator: QuoteAggregator, ttl: Duration) -> Self {
        PlatformsService {
            aggregator,
            cache: TtlCache::new(ttl),
        }
    }

    pub async fn get_platforms(&self) -> PlatformsResponse {
        if let Some(platforms) = self.cache.read().await {
            return PlatformsResponse {
                platforms,
                cached: true,
                timestamp: Utc::now(),
            };
        }

        let platforms = self.aggregator.aggregate().await;
        self.cache.write(platforms.clone()).await;
        PlatformsResponse {
            platforms,
            cached: false,
            timestamp: Utc::now(),
        }
    }
}
