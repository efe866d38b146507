//! Price provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, SimplePrice};

use super::capabilities::RateLimit;

/// Trait for USD price sources.
///
/// Providers receive a symbol that the coin registry has already resolved to
/// the provider's own identifier. Every call is a fresh fetch; caching is
/// left to the caller's refresh cadence.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "COINGECKO".
    ///
    /// Used for logging, rate limiting and the quote `source` field.
    fn id(&self) -> &'static str;

    /// Rate limiting configuration.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch the latest USD price and 24h change for one token.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Upper-case token symbol, copied into the returned quote
    /// * `coin_id` - Provider identifier resolved from the symbol
    async fn get_latest_quote(
        &self,
        symbol: &str,
        coin_id: &str,
    ) -> Result<PriceQuote, MarketDataError>;

    /// Fetch USD prices for several coins in one request.
    ///
    /// Coins the provider does not answer for are absent from the result.
    /// Providers without a batch endpoint return an error.
    async fn get_simple_prices(
        &self,
        _coin_ids: &[&str],
    ) -> Result<Vec<SimplePrice>, MarketDataError> {
        Err(MarketDataError::ProviderError {
            provider: self.id().to_string(),
            message: "Batch prices are not supported".to_string(),
        })
    }
}
