//! Market data models
//!
//! - `types` - Symbol normalization
//! - `quote` - Price quotes and the symbol-keyed quote map

mod quote;
mod types;

pub use quote::{PriceQuote, QuoteMap, SimplePrice};
pub use types::normalize_symbol;
