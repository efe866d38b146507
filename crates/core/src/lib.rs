//! Minifolio Core - holdings, valuation and the tracker that keeps them current.
//!
//! This crate is storage-agnostic: durable state goes through the
//! [`storage::KeyValueStore`] trait, and prices come in through
//! [`quotes::QuoteSource`], implemented for the market-data crate's fetcher.

pub mod constants;
pub mod discovery;
pub mod errors;
pub mod events;
pub mod holdings;
pub mod payments;
pub mod portfolio;
pub mod quotes;
pub mod storage;
pub mod tracker;

pub use holdings::{Holding, HoldingsDiff, HoldingsStore, PersistedPortfolio};
pub use portfolio::*;
pub use tracker::PortfolioTracker;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
