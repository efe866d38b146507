//! On-chain balance discovery.
//!
//! Raw wallet balances are turned into ordinary [`Holding`](crate::holdings::Holding)s,
//! after which the valuation treats them exactly like manually entered ones.

mod balance_source;
mod balances;

pub use balance_source::BalanceSource;
pub use balances::{
    is_discovered_id, normalize_balances, to_quantity, BaseToken, TokenBalance, BASE_TOKENS,
    ERC20_DUST_THRESHOLD, NATIVE_DUST_THRESHOLD, NATIVE_SYMBOL,
};
