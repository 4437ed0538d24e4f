use std::sync::Arc;

use futures::future;

use crate::quotes::client::QuoteClient;
use crate::quotes::{AggregateResult, SourceConfig};

/// Fans one fetch per configured source out concurrently, then waits for
/// every call to settle before partitioning. One failing source only costs
/// its own slot in the ranking; the pass itself always completes, bounded by
/// the slowest source's deadline rather than the sum.
pub struct QuoteAggregator {
    client: Arc<dyn QuoteClient>,
    sources: Vec<SourceConfig>,
}

impl QuoteAggregator {
    pub fn new(client: Arc<dyn QuoteClient>, sources: Vec<SourceConfig>) -> Self {
        QuoteAggregator { client, sources }
    }

    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    pub async fn aggregate(&self) -> AggregateResult {
        let fetches = self
            .sources
            .iter()
            .map(|source| self.client.fetch_quote(source));
        let quotes = future::join_all(fetches).await;

        let result = AggregateResult::partition(quotes);
        tracing::debug!(
            available = result.count,
            unavailable = result.unavailable.len(),
            "aggregation pass complete"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tokio::time::{Duration, Instant};

    use super::*;
    use crate::quotes::Quote;
    use crate::quotes::testutil::{ScriptedClient, priced, source};

    fn aggregator_over(quotes: Vec<Quote>, sources: Vec<SourceConfig>) -> QuoteAggregator {
        QuoteAggregator::new(Arc::new(ScriptedClient::new(quotes)), sources)
    }

    #[tokio::test]
    async fn partitions_every_source_exactly_once() {
        let sources: Vec<_> = ["a", "b", "c", "d", "e", "f"].iter().map(|id| source(id)).collect();
        let quotes = vec![
            priced(&sources[0], 1520.0, 1500.0),
            Quote::failed(&sources[1], "request timed out after 5000 ms".to_string()),
            priced(&sources[2], 1490.0, 1470.0),
            priced(&sources[3], 1505.0, 1485.0),
            Quote::failed(&sources[4], "upstream returned HTTP 500".to_string()),
            priced(&sources[5], 1510.0, 1488.0),
        ];

        let result = aggregator_over(quotes, sources.clone()).aggregate().await;

        assert_eq!(result.count, 4);
        assert_eq!(result.available.len(), 4);
        assert_eq!(result.unavailable.len(), 2);

        let seen: HashSet<_> = result
            .available
            .iter()
            .chain(result.unavailable.iter())
            .map(|q| q.id.clone())
            .collect();
        let configured: HashSet<_> = sources.iter().map(|s| s.id.clone()).collect();
        assert_eq!(seen, configured);
    }

    #[tokio::test]
    async fn ranks_available_by_ask_ascending() {
        let sources: Vec<_> = ["a", "b", "c", "d"].iter().map(|id| source(id)).collect();
        let quotes = vec![
            priced(&sources[0], 1520.0, 1500.0),
            priced(&sources[1], 1490.0, 1470.0),
            priced(&sources[2], 1505.0, 1485.0),
            priced(&sources[3], 1510.0, 1488.0),
        ];

        let result = aggregator_over(quotes, sources).aggregate().await;

        let asks: Vec<_> = result.available.iter().map(|q| q.ask.unwrap()).collect();
        assert_eq!(asks, vec![1490.0, 1505.0, 1510.0, 1520.0]);
    }

    #[tokio::test]
    async fn equal_asks_keep_configured_order() {
        let sources: Vec<_> = ["a", "b", "c"].iter().map(|id| source(id)).collect();
        let quotes = vec![
            priced(&sources[0], 1500.0, 1480.0),
            priced(&sources[1], 1500.0, 1490.0),
            priced(&sources[2], 1500.0, 1470.0),
        ];

        let result = aggregator_over(quotes, sources).aggregate().await;

        let ids: Vec<_> = result.available.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn unavailable_sources_keep_configured_order() {
        let sources: Vec<_> = ["a", "b", "c", "d"].iter().map(|id| source(id)).collect();
        let quotes = vec![
            Quote::failed(&sources[0], "down".to_string()),
            priced(&sources[1], 1500.0, 1480.0),
            Quote::failed(&sources[2], "down".to_string()),
            Quote::failed(&sources[3], "down".to_string()),
        ];

        let result = aggregator_over(quotes, sources).aggregate().await;

        let ids: Vec<_> = result.unavailable.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn total_outage_is_still_a_valid_aggregate() {
        let sources: Vec<_> = ["a", "b", "c", "d", "e", "f"].iter().map(|id| source(id)).collect();
        let quotes = sources
            .iter()
            .map(|s| Quote::failed(s, "request timed out after 5000 ms".to_string()))
            .collect();

        let result = aggregator_over(quotes, sources).aggregate().await;

        assert_eq!(result.count, 0);
        assert!(result.available.is_empty());
        assert_eq!(result.unavailable.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn source_waits_overlap_instead_of_queueing() {
        let sources: Vec<_> = ["a", "b", "c", "d", "e", "f"].iter().map(|id| source(id)).collect();
        let quotes: Vec<_> = sources.iter().map(|s| priced(s, 1500.0, 1480.0)).collect();
        let client =
            ScriptedClient::new(quotes).with_delay(Duration::from_millis(100));
        let aggregator = QuoteAggregator::new(Arc::new(client), sources);

        let started = Instant::now();
        let result = aggregator.aggregate().await;

        // Six 100 ms fetches in one pass: wall clock tracks the slowest one.
        assert!(started.elapsed() < Duration::from_millis(150));
        assert_eq!(result.count, 6);
    }
}
