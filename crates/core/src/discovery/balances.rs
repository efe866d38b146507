use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::Holding;
use minifolio_market_data::normalize_symbol;

/// Symbol of the chain's native asset
pub const NATIVE_SYMBOL: &str = "ETH";

/// Native balances at or below this are ignored
pub const NATIVE_DUST_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// ERC-20 balances at or below this are ignored
pub const ERC20_DUST_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// An ERC-20 token tracked on Base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseToken {
    pub address: &'static str,
    pub symbol: &'static str,
    pub decimals: u32,
}

/// Tokens whose balances are read on Base.
pub const BASE_TOKENS: [BaseToken; 4] = [
    BaseToken {
        address: "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
        symbol: "USDC",
        decimals: 6,
    },
    BaseToken {
        address: "0x50c5725949A6F0c72E6C4a641F24049A917DB0Cb",
        symbol: "DAI",
        decimals: 18,
    },
    BaseToken {
        address: "0x4200000000000000000000000000000000000006",
        symbol: "WETH",
        decimals: 18,
    },
    BaseToken {
        address: "0x4ed4E862860beD51a9570b96d89aF5E1B0Efefed",
        symbol: "DEGEN",
        decimals: 18,
    },
];

/// A raw on-chain balance, in the token's smallest unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub symbol: String,
    /// `None` for the native asset
    pub contract_address: Option<String>,
    pub raw_amount: u128,
    pub decimals: u32,
}

impl TokenBalance {
    pub fn native(raw_amount: u128) -> Self {
        Self {
            symbol: NATIVE_SYMBOL.to_string(),
            contract_address: None,
            raw_amount,
            decimals: 18,
        }
    }

    pub fn erc20(token: &BaseToken, raw_amount: u128) -> Self {
        Self {
            symbol: token.symbol.to_string(),
            contract_address: Some(token.address.to_string()),
            raw_amount,
            decimals: token.decimals,
        }
    }

    pub fn is_native(&self) -> bool {
        self.contract_address.is_none()
    }
}

/// `raw_amount / 10^decimals`, or `None` if it does not fit a [`Decimal`].
pub fn to_quantity(raw_amount: u128, decimals: u32) -> Option<Decimal> {
    let raw = i128::try_from(raw_amount).ok()?;
    Decimal::try_from_i128_with_scale(raw, decimals)
        .ok()
        .map(|d| d.normalize())
}

/// Whether `id` has the shape [`normalize_balances`] assigns: a contract
/// address or the native symbol. Manually added holdings carry UUIDs.
pub fn is_discovered_id(id: &str) -> bool {
    id == NATIVE_SYMBOL
        || id.strip_prefix("0x").is_some_and(|hex| {
            hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
        })
}

/// Turn raw balances into holdings, dropping dust.
///
/// Holding ids are the lower-cased contract address, or the native symbol,
/// so rediscovering the same wallet yields the same ids.
pub fn normalize_balances(balances: &[TokenBalance]) -> Vec<Holding> {
    balances
        .iter()
        .filter_map(|balance| {
            let Some(quantity) = to_quantity(balance.raw_amount, balance.decimals) else {
                warn!(
                    "Balance of {} ({} units, {} decimals) is out of range, skipping",
                    balance.symbol, balance.raw_amount, balance.decimals
                );
                return None;
            };

            let threshold = if balance.is_native() {
                NATIVE_DUST_THRESHOLD
            } else {
                ERC20_DUST_THRESHOLD
            };
            if quantity <= threshold {
                debug!("Ignoring dust balance {} {}", quantity, balance.symbol);
                return None;
            }

            let symbol = normalize_symbol(&balance.symbol);
            if symbol.is_empty() {
                return None;
            }
            let id = match &balance.contract_address {
                Some(address) => address.to_lowercase(),
                None => symbol.clone(),
            };
            Some(Holding::with_id(id, &symbol, quantity))
        })
        .collect()
}
