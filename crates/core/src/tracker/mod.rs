//! The orchestrator tying holdings, quotes and valuation together.

mod portfolio_tracker;


pub use portfolio_tracker::PortfolioTracker;
