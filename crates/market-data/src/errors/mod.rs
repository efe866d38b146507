//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching prices.
///
/// None of these ever reach the portfolio: the fetcher turns every failure
/// into an absent entry in the result map. They exist so providers can be
/// tested on their own and so the logs say what went wrong.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider has no price for this coin.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The symbol has no entry in the coin registry.
    #[error("Unsupported symbol: {0}")]
    UnsupportedSymbol(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// The provider returned data that failed validation checks.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether the same request is likely to succeed on a later refresh.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_transient() {
        let error = MarketDataError::RateLimited {
            provider: "COINGECKO".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_timeout_is_transient() {
        let error = MarketDataError::Timeout {
            provider: "COINGECKO".to_string(),
        };
        assert!(error.is_transient());
    }

    #[test]
    fn test_terminal_errors() {
        assert!(!MarketDataError::SymbolNotFound("bitcoin".to_string()).is_transient());
        assert!(!MarketDataError::UnsupportedSymbol("FOO".to_string()).is_transient());
        assert!(!MarketDataError::ValidationFailed {
            message: "negative price".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_error_display() {
        let error = MarketDataError::SymbolNotFound("bitcoin".to_string());
        assert_eq!(format!("{}", error), "Symbol not found: bitcoin");

        let error = MarketDataError::ProviderError {
            provider: "COINGECKO".to_string(),
            message: "HTTP 500".to_string(),
        };
        assert_eq!(format!("{}", error), "Provider error: COINGECKO - HTTP 500");
    }
}
