//! Portfolio events.
//!
//! The tracker emits these after holdings change, quotes land or a new
//! valuation is computed. A presentation layer implements the sink to
//! re-render.

mod portfolio_event;
mod sink;

pub use portfolio_event::*;
pub use sink::*;
