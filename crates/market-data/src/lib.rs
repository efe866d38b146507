//! Minifolio Market Data Crate
//!
//! This crate fetches current USD prices and 24h changes for crypto tokens
//! from an external price API.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  token symbols   | --> |  CoinRegistry    |  (static symbol -> coin id table)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  QuoteFetcher    |  (concurrent, rate limited, fail-soft)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  PriceProvider   |  (CoinGecko)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   PriceQuote     |
//!                          +------------------+
//! ```
//!
//! A symbol missing from a [`QuoteMap`] means "price unavailable". Callers must
//! never read that as a zero price.

pub mod errors;
pub mod fetcher;
pub mod models;
pub mod provider;
pub mod registry;
pub mod resolver;

pub use errors::MarketDataError;
pub use fetcher::QuoteFetcher;
pub use models::{normalize_symbol, PriceQuote, QuoteMap, SimplePrice};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::{PriceProvider, RateLimit};
pub use registry::{RateLimitConfig, RateLimiter};
pub use resolver::{resolve_coin_id, supported_symbols};
