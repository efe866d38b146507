//! Holdings: the user's token quantities and their persistence.

mod holdings_input;
mod holdings_model;
mod holdings_store;


pub use holdings_input::{parse_quantity, validate_quantity, validate_symbol};
pub use holdings_model::{Holding, PersistedPortfolio};
pub use holdings_store::{HoldingsDiff, HoldingsStore};
