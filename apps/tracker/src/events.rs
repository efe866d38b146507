//! Event sink for the headless tracker: every portfolio event becomes a log
//! line.

use minifolio_core::events::{PortfolioEvent, PortfolioEventSink};
use minifolio_core::portfolio::{format_percent_change, format_usd};

#[derive(Clone, Default)]
pub struct TracingEventSink {
    json: bool,
}

impl TracingEventSink {
    /// With `json`, valuations are logged as one serialized document instead
    /// of a human-readable summary.
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl PortfolioEventSink for TracingEventSink {
    fn emit(&self, event: PortfolioEvent) {
        match &event {
            PortfolioEvent::HoldingsChanged { holding_ids } => {
                tracing::info!(count = holding_ids.len(), "Holdings changed");
            }
            PortfolioEvent::QuotesRefreshed {
                generation,
                priced,
                missing,
            } => {
                tracing::debug!(
                    generation,
                    priced = priced.len(),
                    missing = missing.len(),
                    "Quotes refreshed"
                );
            }
            PortfolioEvent::ValuationUpdated { valuation } if self.json => {
                match serde_json::to_string(valuation) {
                    Ok(json) => tracing::info!(valuation = %json, "Valuation updated"),
                    Err(e) => tracing::warn!("Failed to serialize valuation: {}", e),
                }
            }
            PortfolioEvent::ValuationUpdated { valuation } => {
                let snapshot = &valuation.snapshot;
                tracing::info!(
                    "Portfolio {} ({} / {} today), {} of {} holdings unpriced",
                    format_usd(snapshot.total_value_usd),
                    format_usd(snapshot.daily_change_usd),
                    format_percent_change(snapshot.daily_change_percent),
                    valuation.unpriced().count(),
                    valuation.holdings.len()
                );
            }
        }
    }
}
