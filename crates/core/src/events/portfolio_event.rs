//! Portfolio event types.

use serde::{Deserialize, Serialize};

use crate::portfolio::valuation::PortfolioValuation;

/// Facts emitted by the tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PortfolioEvent {
    /// A holding was added, removed or edited and the set was persisted.
    HoldingsChanged { holding_ids: Vec<String> },

    /// A refresh settled and its quotes were applied.
    QuotesRefreshed {
        generation: u64,
        /// Symbols that came back with a price
        priced: Vec<String>,
        /// Symbols requested but left without a price
        missing: Vec<String>,
    },

    /// A fresh valuation is available.
    ValuationUpdated { valuation: PortfolioValuation },
}

impl PortfolioEvent {
    pub fn holdings_changed(holding_ids: Vec<String>) -> Self {
        Self::HoldingsChanged { holding_ids }
    }

    pub fn quotes_refreshed(generation: u64, priced: Vec<String>, missing: Vec<String>) -> Self {
        Self::QuotesRefreshed {
            generation,
            priced,
            missing,
        }
    }

    pub fn valuation_updated(valuation: PortfolioValuation) -> Self {
        Self::ValuationUpdated { valuation }
    }
}
