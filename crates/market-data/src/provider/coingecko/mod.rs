//! CoinGecko price provider.
//!
//! - Per-coin quotes via `/coins/{id}` (price plus 24h change)
//! - Batch prices via `/simple/price`, used for on-chain balance discovery
//!
//! The public API is limited to roughly 30 calls per minute. A demo API key,
//! when configured, is sent in the `x-cg-demo-api-key` header.
//! API documentation: https://docs.coingecko.com/reference/introduction

mod models;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::models::{PriceQuote, SimplePrice};
use crate::provider::{PriceProvider, RateLimit};

use models::{CoinResponse, ErrorResponse, SimplePriceEntry};

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";
const PROVIDER_ID: &str = "COINGECKO";
const API_KEY_HEADER: &str = "x-cg-demo-api-key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// CoinGecko market data provider.
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Create a provider against the public API.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BASE_URL, None, DEFAULT_TIMEOUT)
    }

    /// Create a provider with a custom base URL, optional API key and timeout.
    pub fn with_config(base_url: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Make a GET request and return the body of a successful response.
    async fn fetch(&self, path: &str, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url).query(params);
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }

        debug!("CoinGecko request: {} with {} params", path, params.len());

        let response = request.send().await.map_err(map_request_error)?;

        let status = response.status();
        if status.is_success() {
            return response
                .text()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to read response: {}", e),
                });
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_error_status(status, &body, path))
    }
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit {
            requests_per_minute: if self.api_key.is_some() { 30 } else { 10 },
            max_concurrency: 5,
        }
    }

    async fn get_latest_quote(
        &self,
        symbol: &str,
        coin_id: &str,
    ) -> Result<PriceQuote, MarketDataError> {
        let path = format!("/coins/{}", urlencoding::encode(coin_id));
        let params = [
            ("localization", "false"),
            ("tickers", "false"),
            ("community_data", "false"),
            ("developer_data", "false"),
        ];
        let text = self.fetch(&path, &params).await?;
        parse_coin_response(&text, symbol, coin_id)
    }

    async fn get_simple_prices(
        &self,
        coin_ids: &[&str],
    ) -> Result<Vec<SimplePrice>, MarketDataError> {
        if coin_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = coin_ids.join(",");
        let params = [
            ("ids", ids.as_str()),
            ("vs_currencies", "usd"),
            ("include_24hr_change", "true"),
        ];
        let text = self.fetch("/simple/price", &params).await?;
        parse_simple_prices(&text)
    }
}

fn map_request_error(error: reqwest::Error) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(error)
    }
}

fn map_error_status(status: StatusCode, body: &str, path: &str) -> MarketDataError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        },
        StatusCode::NOT_FOUND => MarketDataError::SymbolNotFound(path.to_string()),
        _ => {
            let message = serde_json::from_str::<ErrorResponse>(body)
                .ok()
                .and_then(ErrorResponse::message)
                .unwrap_or_else(|| format!("HTTP {} - {}", status, body));
            MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message,
            }
        }
    }
}

fn parse_error(what: &str, e: serde_json::Error) -> MarketDataError {
    MarketDataError::ProviderError {
        provider: PROVIDER_ID.to_string(),
        message: format!("Failed to parse {} response: {}", what, e),
    }
}

fn to_price(value: f64, coin_id: &str) -> Result<Decimal, MarketDataError> {
    let price = Decimal::try_from(value).map_err(|_| MarketDataError::ValidationFailed {
        message: format!("Invalid USD price for {}: {}", coin_id, value),
    })?;
    if price.is_sign_negative() {
        return Err(MarketDataError::ValidationFailed {
            message: format!("Negative USD price for {}: {}", coin_id, value),
        });
    }
    Ok(price)
}

/// Turn a `/coins/{id}` body into a quote.
///
/// A missing USD price is an error rather than a zero price. A missing 24h
/// change is reported as 0%.
fn parse_coin_response(
    text: &str,
    symbol: &str,
    coin_id: &str,
) -> Result<PriceQuote, MarketDataError> {
    let response: CoinResponse = serde_json::from_str(text).map_err(|e| parse_error("coin", e))?;

    let market_data = response
        .market_data
        .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.to_string()))?;

    let usd = market_data
        .current_price
        .get("usd")
        .copied()
        .flatten()
        .ok_or_else(|| MarketDataError::SymbolNotFound(coin_id.to_string()))?;

    let daily_change_percent = market_data
        .price_change_percentage_24h
        .and_then(|v| Decimal::try_from(v).ok())
        .unwrap_or(Decimal::ZERO);

    Ok(PriceQuote::new(
        symbol,
        to_price(usd, coin_id)?,
        daily_change_percent,
        PROVIDER_ID,
    ))
}

fn parse_simple_prices(text: &str) -> Result<Vec<SimplePrice>, MarketDataError> {
    let response: HashMap<String, SimplePriceEntry> =
        serde_json::from_str(text).map_err(|e| parse_error("simple price", e))?;

    let mut prices: Vec<SimplePrice> = response
        .into_iter()
        .filter_map(|(coin_id, entry)| {
            let usd = to_price(entry.usd?, &coin_id).ok()?;
            Some(SimplePrice {
                usd,
                usd_24h_change: entry.usd_24h_change.and_then(|v| Decimal::try_from(v).ok()),
                coin_id,
            })
        })
        .collect();
    prices.sort_by(|a, b| a.coin_id.cmp(&b.coin_id));
    Ok(prices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = CoinGeckoProvider::new();
        assert_eq!(provider.id(), "COINGECKO");
    }

    #[test]
    fn test_rate_limit_depends_on_api_key() {
        let public = CoinGeckoProvider::new();
        assert_eq!(public.rate_limit().requests_per_minute, 10);

        let keyed = CoinGeckoProvider::with_config(
            DEFAULT_BASE_URL,
            Some("demo-key".to_string()),
            Duration::from_secs(5),
        );
        assert_eq!(keyed.rate_limit().requests_per_minute, 30);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let provider = CoinGeckoProvider::with_config(
            "http://localhost:9999/",
            Some("  ".to_string()),
            Duration::from_secs(5),
        );
        assert!(provider.api_key.is_none());
        assert_eq!(provider.base_url, "http://localhost:9999");
    }

    #[test]
    fn test_parse_coin_response() {
        let body = r#"{
            "id": "ethereum",
            "symbol": "eth",
            "market_data": {
                "current_price": {"usd": 3000.5, "eur": 2800.1},
                "price_change_percentage_24h": -2.25
            }
        }"#;
        let quote = parse_coin_response(body, "eth", "ethereum").unwrap();
        assert_eq!(quote.token_symbol, "ETH");
        assert_eq!(quote.current_price_usd, dec!(3000.5));
        assert_eq!(quote.daily_change_percent, dec!(-2.25));
        assert_eq!(quote.source, "COINGECKO");
    }

    #[test]
    fn test_parse_coin_response_missing_change_defaults_to_zero() {
        let body = r#"{"id": "dai", "market_data": {"current_price": {"usd": 1.0}}}"#;
        let quote = parse_coin_response(body, "DAI", "dai").unwrap();
        assert_eq!(quote.daily_change_percent, Decimal::ZERO);
    }

    #[test]
    fn test_parse_coin_response_missing_usd_price() {
        let body = r#"{"id": "dai", "market_data": {"current_price": {"eur": 0.9}}}"#;
        let err = parse_coin_response(body, "DAI", "dai").unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_parse_coin_response_negative_price() {
        let body = r#"{"id": "x", "market_data": {"current_price": {"usd": -1.0}}}"#;
        let err = parse_coin_response(body, "X", "x").unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[test]
    fn test_parse_coin_response_garbage() {
        let err = parse_coin_response("<html>", "ETH", "ethereum").unwrap_err();
        assert!(matches!(err, MarketDataError::ProviderError { .. }));
    }

    #[test]
    fn test_parse_simple_prices() {
        let body = r#"{
            "weth": {"usd": 3001.0, "usd_24h_change": 1.5},
            "usd-coin": {"usd": 1.0},
            "degen-base": {}
        }"#;
        let prices = parse_simple_prices(body).unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].coin_id, "usd-coin");
        assert_eq!(prices[0].usd, dec!(1));
        assert_eq!(prices[0].usd_24h_change, None);
        assert_eq!(prices[1].coin_id, "weth");
        assert_eq!(prices[1].usd_24h_change, Some(dec!(1.5)));
    }

    #[test]
    fn test_map_error_status() {
        let err = map_error_status(StatusCode::TOO_MANY_REQUESTS, "", "/coins/bitcoin");
        assert!(matches!(err, MarketDataError::RateLimited { .. }));

        let err = map_error_status(StatusCode::NOT_FOUND, "", "/coins/nope");
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));

        let err = map_error_status(
            StatusCode::BAD_REQUEST,
            r#"{"status": {"error_message": "invalid key"}}"#,
            "/coins/bitcoin",
        );
        match err {
            MarketDataError::ProviderError { message, .. } => assert_eq!(message, "invalid key"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        // Nothing listens on the discard port.
        let provider =
            CoinGeckoProvider::with_config("http://127.0.0.1:9", None, Duration::from_secs(5));

        let err = provider
            .get_latest_quote("BTC", "bitcoin")
            .await
            .unwrap_err();

        assert!(matches!(err, MarketDataError::Network(_)), "got {err:?}");
        assert!(err.is_transient());
    }
}
