use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::time::Duration;
use tracing::info;

use quote_proxy::api::rest::{ApiState, create_router};
use quote_proxy::config::AppConfig;
use quote_proxy::observability;
use quote_proxy::quotes::aggregator::QuoteAggregator;
use quote_proxy::quotes::client::HttpQuoteClient;
use quote_proxy::service::{EconomicService, PlatformsService, RateService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    observability::init_tracing();

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "default".into());
    let config = AppConfig::load(&env)?;

    let http = reqwest::Client::new();
    let timeout = Duration::from_millis(config.upstream.timeout_ms);
    let ttl = Duration::from_millis(config.cache.ttl_ms);

    let client = Arc::new(HttpQuoteClient::new(
        http.clone(),
        config.upstream.base_url.clone(),
        config.upstream.pair.clone(),
        timeout,
    ));

    let reference = config.reference_source()?;
    let state = Arc::new(ApiState {
        rate: Arc::new(RateService::new(client.clone(), reference, ttl)),
        platforms: Arc::new(PlatformsService::new(
            QuoteAggregator::new(client, config.sources.clone()),
            ttl,
        )),
        economic: Arc::new(EconomicService::new(http, config.economic.clone(), timeout)),
    });

    let app = create_router(state, &config.server.public_dir);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, sources = config.sources.len(), "quote proxy listening");
    axum::serve(listener, app).await?;
    Ok(())
}
