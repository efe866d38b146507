//! Symbol resolution.
//!
//! Maps internal token symbols to the identifiers the price provider expects.

mod coin_registry;

pub use coin_registry::{resolve_coin_id, supported_symbols};
