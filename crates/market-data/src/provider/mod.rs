//! Price provider abstractions and implementations.
//!
//! This module contains:
//! - The `PriceProvider` trait that all providers implement
//! - Provider rate limiting configuration
//! - The CoinGecko provider

mod capabilities;
mod traits;

pub mod coingecko;

pub use capabilities::RateLimit;
pub use traits::PriceProvider;
