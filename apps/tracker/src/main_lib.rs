use std::sync::Arc;

use minifolio_core::events::PortfolioEventSink;
use minifolio_core::holdings::HoldingsStore;
use minifolio_core::quotes::{BatchedQuoteSource, QuoteSource};
use minifolio_core::storage::{JsonFileStore, KeyValueStore};
use minifolio_core::PortfolioTracker;
use minifolio_market_data::{CoinGeckoProvider, PriceProvider, QuoteFetcher};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Whether `MINIFOLIO_LOG_FORMAT` asks for JSON logs.
pub fn json_logs_requested() -> bool {
    std::env::var("MINIFOLIO_LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Wire storage, the price provider and the event sink into a tracker, with
/// holdings loaded from the data directory.
pub fn build_tracker(
    config: &Config,
    event_sink: Arc<dyn PortfolioEventSink>,
) -> anyhow::Result<PortfolioTracker> {
    std::fs::create_dir_all(&config.data_dir)?;
    tracing::info!("Data directory in use: {}", config.data_dir.display());
    let storage: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.data_dir));
    let store = HoldingsStore::load(storage);

    let provider: Arc<dyn PriceProvider> = Arc::new(CoinGeckoProvider::with_config(
        &config.coingecko_url,
        config.coingecko_api_key.clone(),
        config.request_timeout,
    ));
    let fetcher = QuoteFetcher::new(provider);
    let quote_source: Arc<dyn QuoteSource> = if config.batch_quotes {
        Arc::new(BatchedQuoteSource::new(fetcher))
    } else {
        Arc::new(fetcher)
    };

    Ok(PortfolioTracker::new(store, quote_source, event_sink))
}
