use std::path::PathBuf;
use std::time::Duration;

use minifolio_core::constants::DEFAULT_REFRESH_INTERVAL_SECS;
use minifolio_market_data::provider::coingecko::DEFAULT_BASE_URL;

pub struct Config {
    pub data_dir: PathBuf,
    pub refresh_interval: Duration,
    pub coingecko_url: String,
    pub coingecko_api_key: Option<String>,
    pub request_timeout: Duration,
    /// Price all symbols with one batch request per refresh
    pub batch_quotes: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("MINIFOLIO_DATA_DIR").unwrap_or_else(|| "./data".into());
        let refresh_secs: u64 = lookup("MINIFOLIO_REFRESH_INTERVAL_SECS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS);
        let coingecko_url =
            lookup("MINIFOLIO_COINGECKO_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let coingecko_api_key = lookup("MINIFOLIO_COINGECKO_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let timeout_ms: u64 = lookup("MINIFOLIO_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(30000);
        let batch_quotes = lookup("MINIFOLIO_BATCH_QUOTES")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            data_dir: PathBuf::from(data_dir),
            refresh_interval: Duration::from_secs(refresh_secs),
            coingecko_url,
            coingecko_api_key,
            request_timeout: Duration::from_millis(timeout_ms),
            batch_quotes,
        }
    }
}
