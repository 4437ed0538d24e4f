use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::time::Duration;

use crate::cache::TtlCache;
use crate::error::{Error, Result};
use crate::quotes::SourceConfig;
use crate::quotes::client::QuoteClient;

/// Reference-source quote frozen at the moment it was fetched. Cache hits
/// replay it verbatim, timestamp included.
#[derive(Clone, Debug, Serialize)]
pub struct RateSnapshot {
    pub ask: f64,
    pub bid: f64,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct RateResponse {
    #[serde(flatten)]
    pub rate: RateSnapshot,
    pub cached: bool,
}

/// Cached access to the single reference source.
///
/// There is no fallback here: an unavailable reference source fails the whole
/// call, and the failed attempt leaves the cache exactly as it was, so a
/// previous entry keeps expiring on its own schedule.
pub struct RateService {
    client: Arc<dyn QuoteClient>,
    reference: SourceConfig,
    cache: TtlCache<RateSnapshot>,
}

impl RateService {
    pub fn new(client: Arc<dyn QuoteClient>, reference: SourceConfig, ttl: Duration) -> Self {
        RateService {
            client,
            reference,
            cache: TtlCache::new(ttl),
        }
    }

    pub async fn get_rate(&self) -> Result<RateResponse> {
        if let Some(rate) = self.cache.read().await {
            return Ok(RateResponse { rate, cached: true });
        }

        let quote = self.client.fetch_quote(&self.reference).await;
        let (Some(ask), Some(bid)) = (quote.ask, quote.bid) else {
            let reason = quote
                .error
                .unwrap_or_else(|| "incomplete quote data".to_string());
            return Err(Error::ReferenceUnavailable(reason));
        };

        let rate = RateSnapshot {
            ask,
            bid,
            source: self.reference.name.clone(),
            timestamp: Utc::now(),
        };
        self.cache.write(rate.clone()).await;
        Ok(RateResponse {
            rate,
            cached: false,
        })
    }
}
