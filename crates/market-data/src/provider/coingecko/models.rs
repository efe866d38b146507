//! CoinGecko API response models.
//!
//! Only the fields the tracker reads are modelled; everything else in the
//! (very large) coin payload is ignored by serde.

use std::collections::HashMap;

use serde::Deserialize;

/// Response from `/coins/{id}`
#[derive(Debug, Deserialize)]
pub struct CoinResponse {
    pub market_data: Option<CoinMarketData>,
}

/// `market_data` block of the coin response
#[derive(Debug, Deserialize)]
pub struct CoinMarketData {
    /// Current price keyed by vs-currency ("usd", "eur", ...)
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    pub price_change_percentage_24h: Option<f64>,
}

/// One entry of the `/simple/price` response, keyed by coin id in the outer map
#[derive(Debug, Deserialize)]
pub struct SimplePriceEntry {
    pub usd: Option<f64>,
    pub usd_24h_change: Option<f64>,
}

/// Error body CoinGecko returns with non-success statuses
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: Option<String>,
    pub status: Option<ErrorStatus>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorStatus {
    pub error_message: Option<String>,
}

impl ErrorResponse {
    pub fn message(self) -> Option<String> {
        self.error
            .or_else(|| self.status.and_then(|status| status.error_message))
    }
}
