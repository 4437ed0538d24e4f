use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tokio::time::{Duration, timeout};

use crate::error::FetchError;
use crate::quotes::{Quote, SourceConfig};

/// Fetches one source's quote. Implementations represent every failure mode
/// in the returned `Quote` instead of raising, so callers need no per-source
/// error handling.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteClient: Send + Sync {
    async fn fetch_quote(&self, source: &SourceConfig) -> Quote;
}

/// REST client for `GET {base_url}/{source_id}/{pair}` endpoints. The whole
/// exchange (connect, response, body) runs under one hard deadline.
pub struct HttpQuoteClient {
    http: reqwest::Client,
    base_url: String,
    pair: String,
    timeout: Duration,
}

impl HttpQuoteClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        pair: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        HttpQuoteClient {
            http,
            base_url: base_url.into(),
            pair: pair.into(),
            timeout,
        }
    }

    async fn fetch_ticker(&self, source_id: &str) -> Result<TickerPayload, FetchError> {
        let url = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            source_id,
            self.pair
        );

        let exchange = async {
            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| FetchError::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status.as_u16()));
            }

            response
                .json::<TickerPayload>()
                .await
                .map_err(|e| FetchError::MalformedBody(e.to_string()))
        };

        timeout(self.timeout, exchange)
            .await
            .map_err(|_| FetchError::Timeout(self.timeout.as_millis() as u64))?
    }
}

#[async_trait]
impl QuoteClient for HttpQuoteClient {
    async fn fetch_quote(&self, source: &SourceConfig) -> Quote {
        match self.fetch_ticker(&source.id).await {
            Ok(ticker) => Quote::observed(source, ticker.ask, ticker.bid),
            Err(err) => {
                tracing::warn!(source = %source.id, error = %err, "upstream quote fetch failed");
                Quote::failed(source, err.to_string())
            }
        }
    }
}

#[derive(Deserialize)]
struct TickerPayload {
    #[serde(default, deserialize_with = "lenient_price")]
    ask: Option<f64>,
    #[serde(default, deserialize_with = "lenient_price")]
    bid: Option<f64>,
}

/// Accepts JSON numbers or numeric strings. Anything else, and any value
/// that is not a strictly positive finite number, counts as absent.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed.filter(|p| p.is_finite() && *p > 0.0))
}
