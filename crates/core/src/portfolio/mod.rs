//! Portfolio valuation and the display strings built from it.

pub mod share;
pub mod valuation;

pub use share::{format_percent_change, format_usd, share_message};
pub use valuation::{
    recompute, HoldingValuation, HoldingValuationStatus, PortfolioSnapshot, PortfolioValuation,
};
