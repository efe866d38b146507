use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::normalize_symbol;

/// Quotes keyed by upper-case token symbol.
///
/// An absent key means the price is unavailable for that symbol.
pub type QuoteMap = HashMap<String, PriceQuote>;

/// Current USD price of a token, with its 24h change.
///
/// Quotes are ephemeral: they are refetched on every refresh cycle and
/// never persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Upper-case token symbol (e.g. "ETH")
    pub token_symbol: String,

    /// Current price in USD, never negative
    #[serde(rename = "currentPriceUSD")]
    pub current_price_usd: Decimal,

    /// Signed 24h change, in percent (10 means +10%)
    pub daily_change_percent: Decimal,

    /// When the quote was fetched
    pub fetched_at: DateTime<Utc>,

    /// Provider that produced the quote (COINGECKO, MANUAL, ...)
    pub source: String,
}

impl PriceQuote {
    /// Create a quote stamped with the current time.
    pub fn new(
        token_symbol: &str,
        current_price_usd: Decimal,
        daily_change_percent: Decimal,
        source: &str,
    ) -> Self {
        Self {
            token_symbol: normalize_symbol(token_symbol),
            current_price_usd,
            daily_change_percent,
            fetched_at: Utc::now(),
            source: source.to_string(),
        }
    }
}

/// A price from a batch endpoint, keyed by provider coin id rather than symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct SimplePrice {
    pub coin_id: String,
    pub usd: Decimal,
    pub usd_24h_change: Option<Decimal>,
}
