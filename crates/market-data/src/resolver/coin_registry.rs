//! Static token symbol -> CoinGecko coin id table.
//!
//! The index is built once via `lazy_static`. Lookups are case-insensitive.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::models::normalize_symbol;

/// (symbol, CoinGecko coin id)
const COINS: &[(&str, &str)] = &[
    ("BTC", "bitcoin"),
    ("ETH", "ethereum"),
    ("USDC", "usd-coin"),
    ("USDT", "tether"),
    ("DAI", "dai"),
    ("DEGEN", "degen-base"),
    ("WETH", "weth"),
    ("SOL", "solana"),
    ("MATIC", "matic-network"),
    ("AVAX", "avalanche-2"),
    ("DOT", "polkadot"),
    ("LINK", "chainlink"),
    ("UNI", "uniswap"),
    ("AAVE", "aave"),
    ("CRV", "curve-dao-token"),
];

lazy_static! {
    static ref COIN_IDS: HashMap<&'static str, &'static str> = COINS.iter().copied().collect();
}

/// Resolve a token symbol to its provider coin id.
///
/// Returns `None` for symbols the registry does not know; callers treat
/// those as "price unavailable", not as an error.
pub fn resolve_coin_id(symbol: &str) -> Option<&'static str> {
    COIN_IDS.get(normalize_symbol(symbol).as_str()).copied()
}

/// All symbols with a known coin id, sorted.
pub fn supported_symbols() -> Vec<&'static str> {
    let mut symbols: Vec<&'static str> = COINS.iter().map(|(symbol, _)| *symbol).collect();
    symbols.sort_unstable();
    symbols
}
