use std::sync::Arc;

use minifolio_market_data::supported_symbols;
use minifolio_tracker::config::Config;
use minifolio_tracker::events::TracingEventSink;
use minifolio_tracker::main_lib::json_logs_requested;
use minifolio_tracker::{build_tracker, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    let json_logs = json_logs_requested();
    init_tracing(json_logs);

    let tracker = build_tracker(&config, Arc::new(TracingEventSink::new(json_logs)))?;
    tracing::info!(
        "Tracking {} holdings; priced symbols: {}",
        tracker.holdings().len(),
        supported_symbols().join(", ")
    );

    tracker
        .run(config.refresh_interval, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;
    Ok(())
}
