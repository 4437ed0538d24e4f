pub mod aggregator;
pub mod client;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// One configured upstream exchange. The list is fixed at process start.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourceConfig {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// One source's price observation, or its failure. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quote {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub ask: Option<f64>,
    pub bid: Option<f64>,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Quote {
    /// Builds a quote from whatever prices the upstream body yielded. A body
    /// with only one usable side keeps that value but is not available.
    pub fn observed(source: &SourceConfig, ask: Option<f64>, bid: Option<f64>) -> Self {
        let available = ask.is_some() && bid.is_some();
        Quote {
            id: source.id.clone(),
            name: source.name.clone(),
            icon: source.icon.clone(),
            ask,
            bid,
            available,
            error: (!available).then(|| FetchError::IncompleteQuote.to_string()),
        }
    }

    pub fn failed(source: &SourceConfig, reason: String) -> Self {
        Quote {
            id: source.id.clone(),
            name: source.name.clone(),
            icon: source.icon.clone(),
            ask: None,
            bid: None,
            available: false,
            error: Some(reason),
        }
    }
}

/// Ranked outcome of one aggregation pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AggregateResult {
    pub available: Vec<Quote>,
    pub unavailable: Vec<Quote>,
    pub count: usize,
}

impl AggregateResult {
    /// Splits quotes into available/unavailable and ranks the available side
    /// by ask, cheapest first. The sort is stable, so equal asks keep the
    /// configured source order; the unavailable side keeps it untouched.
    pub fn partition(quotes: Vec<Quote>) -> Self {
        let (mut available, unavailable): (Vec<Quote>, Vec<Quote>) =
            quotes.into_iter().partition(|q| q.available);
        available.sort_by(|a, b| a.ask.partial_cmp(&b.ask).unwrap_or(std::cmp::Ordering::Equal));
        let count = available.len();
        AggregateResult {
            available,
            unavailable,
            count,
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use tokio::time::Duration;

    use super::client::QuoteClient;
    use super::{Quote, SourceConfig};

    pub fn source(id: &str) -> SourceConfig {
        SourceConfig {
            id: id.to_string(),
            name: id.to_uppercase(),
            icon: "·".to_string(),
        }
    }

    pub fn priced(source: &SourceConfig, ask: f64, bid: f64) -> Quote {
        Quote::observed(source, Some(ask), Some(bid))
    }

    /// Fake upstream serving canned quotes, optionally after a delay, while
    /// counting fetches.
    pub struct ScriptedClient {
        quotes: HashMap<String, Quote>,
        delay: Option<Duration>,
        pub fetches: Arc<AtomicU32>,
    }

    impl ScriptedClient {
        pub fn new(quotes: Vec<Quote>) -> Self {
            ScriptedClient {
                quotes: quotes.into_iter().map(|q| (q.id.clone(), q)).collect(),
                delay: None,
                fetches: Arc::new(AtomicU32::new(0)),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl QuoteClient for ScriptedClient {
        async fn fetch_quote(&self, source: &SourceConfig) -> Quote {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.quotes
                .get(&source.id)
                .cloned()
                .unwrap_or_else(|| Quote::failed(source, "no scripted quote".to_string()))
        }
    }
}
