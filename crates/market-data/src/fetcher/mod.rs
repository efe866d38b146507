//! Batch quote fetching.
//!
//! [`QuoteFetcher::fetch_quotes`] resolves each symbol through the coin
//! registry, fires one request per coin concurrently and joins them. It never
//! fails: unresolvable symbols and failed requests are simply absent from the
//! returned map.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{normalize_symbol, PriceQuote, QuoteMap};
use crate::provider::PriceProvider;
use crate::registry::{RateLimitConfig, RateLimiter};
use crate::resolver::resolve_coin_id;

/// Fetches quotes for a set of symbols from one provider.
#[derive(Clone)]
pub struct QuoteFetcher {
    provider: Arc<dyn PriceProvider>,
    rate_limiter: Arc<RateLimiter>,
}

impl QuoteFetcher {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        let rate_limiter = RateLimiter::new();
        rate_limiter.configure(
            provider.id(),
            RateLimitConfig::from(&provider.rate_limit()),
        );
        Self {
            provider,
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    /// Use a shared rate limiter, e.g. one that other fetchers also draw from.
    pub fn with_rate_limiter(
        provider: Arc<dyn PriceProvider>,
        rate_limiter: Arc<RateLimiter>,
    ) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }

    pub fn provider_id(&self) -> &'static str {
        self.provider.id()
    }

    /// Fetch the latest quote for every resolvable symbol.
    ///
    /// Symbols are normalized and deduplicated first. The result is keyed by
    /// upper-case symbol; a missing key means the price is unavailable.
    pub async fn fetch_quotes<I, S>(&self, symbols: I) -> QuoteMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requests = resolve_requests(symbols);
        if requests.is_empty() {
            return QuoteMap::new();
        }

        debug!(
            "Fetching {} quotes from {}",
            requests.len(),
            self.provider.id()
        );

        let results = join_all(
            requests
                .iter()
                .map(|(symbol, coin_id)| self.fetch_one(symbol, coin_id)),
        )
        .await;

        let mut quotes = QuoteMap::with_capacity(results.len());
        for ((symbol, coin_id), result) in requests.into_iter().zip(results) {
            match result {
                Ok(quote) => {
                    quotes.insert(symbol, quote);
                }
                Err(e) if e.is_transient() => {
                    warn!("Quote for {} ({}) temporarily unavailable: {}", symbol, coin_id, e);
                }
                Err(e) => {
                    warn!("Quote for {} ({}) failed: {}", symbol, coin_id, e);
                }
            }
        }
        quotes
    }

    /// Like [`fetch_quotes`](Self::fetch_quotes), but prices every symbol
    /// with a single batch request.
    ///
    /// A failed batch leaves every symbol absent. A coin answered without a
    /// 24h change reports 0%.
    pub async fn fetch_quotes_batched<I, S>(&self, symbols: I) -> QuoteMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requests = resolve_requests(symbols);
        if requests.is_empty() {
            return QuoteMap::new();
        }

        let coin_ids: Vec<&str> = requests.iter().map(|(_, coin_id)| *coin_id).collect();
        self.rate_limiter.acquire(self.provider.id()).await;
        let prices = match self.provider.get_simple_prices(&coin_ids).await {
            Ok(prices) => prices,
            Err(e) => {
                warn!("Batch quote request for {} coins failed: {}", coin_ids.len(), e);
                return QuoteMap::new();
            }
        };

        let symbols_by_coin: HashMap<&str, &str> = requests
            .iter()
            .map(|(symbol, coin_id)| (*coin_id, symbol.as_str()))
            .collect();

        prices
            .into_iter()
            .filter_map(|price| {
                let symbol = *symbols_by_coin.get(price.coin_id.as_str())?;
                let quote = PriceQuote::new(
                    symbol,
                    price.usd,
                    price.usd_24h_change.unwrap_or(Decimal::ZERO),
                    self.provider.id(),
                );
                Some((symbol.to_string(), quote))
            })
            .collect()
    }

    async fn fetch_one(&self, symbol: &str, coin_id: &str) -> Result<PriceQuote, MarketDataError> {
        self.rate_limiter.acquire(self.provider.id()).await;
        let mut quote = self.provider.get_latest_quote(symbol, coin_id).await?;
        // Key and payload must agree even if a provider echoes its own casing.
        quote.token_symbol = symbol.to_string();
        Ok(quote)
    }
}

/// Normalize, deduplicate and resolve symbols to `(symbol, coin_id)` pairs,
/// dropping the ones the registry does not know.
fn resolve_requests<I, S>(symbols: I) -> Vec<(String, &'static str)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let unique: BTreeSet<String> = symbols
        .into_iter()
        .map(|s| normalize_symbol(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();

    unique
        .into_iter()
        .filter_map(|symbol| match resolve_coin_id(&symbol) {
            Some(coin_id) => Some((symbol, coin_id)),
            None => {
                debug!("Skipping: {}", MarketDataError::UnsupportedSymbol(symbol));
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SimplePrice;
    use crate::provider::RateLimit;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockProvider {
        failing: HashSet<&'static str>,
        batch_fails: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PriceProvider for MockProvider {
        fn id(&self) -> &'static str {
            "MOCK"
        }

        fn rate_limit(&self) -> RateLimit {
            RateLimit {
                requests_per_minute: 6000,
                max_concurrency: 50,
            }
        }

        async fn get_latest_quote(
            &self,
            symbol: &str,
            coin_id: &str,
        ) -> Result<PriceQuote, MarketDataError> {
            self.calls.lock().unwrap().push(coin_id.to_string());
            if self.failing.contains(coin_id) {
                return Err(MarketDataError::RateLimited {
                    provider: "MOCK".to_string(),
                });
            }
            Ok(PriceQuote::new(symbol, dec!(100), dec!(1), "MOCK"))
        }

        async fn get_simple_prices(
            &self,
            coin_ids: &[&str],
        ) -> Result<Vec<SimplePrice>, MarketDataError> {
            self.calls.lock().unwrap().push(coin_ids.join(","));
            if self.batch_fails {
                return Err(MarketDataError::Timeout {
                    provider: "MOCK".to_string(),
                });
            }
            Ok(coin_ids
                .iter()
                .filter(|id| !self.failing.contains(**id))
                .map(|id| SimplePrice {
                    coin_id: id.to_string(),
                    usd: dec!(42),
                    usd_24h_change: (*id == "ethereum").then_some(dec!(-3)),
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_fetch_quotes_keys_by_upper_case_symbol() {
        let fetcher = QuoteFetcher::new(Arc::new(MockProvider::default()));
        let quotes = fetcher.fetch_quotes(["eth", "BTC"]).await;

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes["ETH"].token_symbol, "ETH");
        assert_eq!(quotes["BTC"].current_price_usd, dec!(100));
    }

    #[tokio::test]
    async fn test_unresolvable_symbols_are_excluded() {
        let provider = Arc::new(MockProvider::default());
        let fetcher = QuoteFetcher::new(provider.clone());
        let quotes = fetcher.fetch_quotes(["ETH", "NOTACOIN", ""]).await;

        assert_eq!(quotes.len(), 1);
        assert!(quotes.contains_key("ETH"));
        assert_eq!(provider.calls.lock().unwrap().as_slice(), ["ethereum"]);
    }

    #[tokio::test]
    async fn test_one_failure_does_not_fail_the_batch() {
        let provider = Arc::new(MockProvider {
            failing: HashSet::from(["bitcoin"]),
            ..Default::default()
        });
        let fetcher = QuoteFetcher::new(provider);
        let quotes = fetcher.fetch_quotes(["BTC", "ETH", "SOL"]).await;

        assert_eq!(quotes.len(), 2);
        assert!(!quotes.contains_key("BTC"));
        assert!(quotes.contains_key("ETH"));
        assert!(quotes.contains_key("SOL"));
    }

    #[tokio::test]
    async fn test_duplicate_symbols_fetched_once() {
        let provider = Arc::new(MockProvider::default());
        let fetcher = QuoteFetcher::new(provider.clone());
        let quotes = fetcher.fetch_quotes(["eth", "ETH", " Eth "]).await;

        assert_eq!(quotes.len(), 1);
        assert_eq!(provider.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input() {
        let fetcher = QuoteFetcher::new(Arc::new(MockProvider::default()));
        let quotes = fetcher.fetch_quotes(Vec::<String>::new()).await;
        assert!(quotes.is_empty());
    }

    #[tokio::test]
    async fn test_batched_fetch_uses_one_request() {
        let provider = Arc::new(MockProvider {
            failing: HashSet::from(["solana"]),
            ..Default::default()
        });
        let fetcher = QuoteFetcher::new(provider.clone());
        let quotes = fetcher
            .fetch_quotes_batched(["eth", "BTC", "SOL", "NOTACOIN"])
            .await;

        assert_eq!(
            provider.calls.lock().unwrap().as_slice(),
            ["bitcoin,ethereum,solana"]
        );
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes["ETH"].current_price_usd, dec!(42));
        assert_eq!(quotes["ETH"].daily_change_percent, dec!(-3));
        assert_eq!(quotes["BTC"].daily_change_percent, Decimal::ZERO);
        assert_eq!(quotes["BTC"].source, "MOCK");
        assert!(!quotes.contains_key("SOL"));
    }

    #[tokio::test]
    async fn test_failed_batch_is_empty() {
        let fetcher = QuoteFetcher::new(Arc::new(MockProvider {
            batch_fails: true,
            ..Default::default()
        }));
        assert!(fetcher.fetch_quotes_batched(["ETH"]).await.is_empty());
    }
}
