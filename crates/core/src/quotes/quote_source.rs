use async_trait::async_trait;

use minifolio_market_data::{QuoteFetcher, QuoteMap};

/// Anything that can price a batch of symbols.
///
/// Implementations never fail as a whole: a symbol that could not be priced is
/// simply absent from the returned map.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch_quotes(&self, symbols: &[String]) -> QuoteMap;
}

#[async_trait]
impl QuoteSource for QuoteFetcher {
    async fn fetch_quotes(&self, symbols: &[String]) -> QuoteMap {
        QuoteFetcher::fetch_quotes(self, symbols).await
    }
}

/// Prices every symbol with one batch request instead of one per symbol.
///
/// Easier on the provider's rate limit; the batch endpoint may omit the 24h
/// change, which then reads as 0%.
#[derive(Clone)]
pub struct BatchedQuoteSource(QuoteFetcher);

impl BatchedQuoteSource {
    pub fn new(fetcher: QuoteFetcher) -> Self {
        Self(fetcher)
    }
}

#[async_trait]
impl QuoteSource for BatchedQuoteSource {
    async fn fetch_quotes(&self, symbols: &[String]) -> QuoteMap {
        self.0.fetch_quotes_batched(symbols).await
    }
}
