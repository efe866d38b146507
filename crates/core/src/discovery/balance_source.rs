use async_trait::async_trait;

use super::TokenBalance;
use crate::errors::Result;

/// Reads raw token balances for a wallet (an RPC node, an indexer, ...).
///
/// Implementations report the native balance with `contract_address: None`
/// and one entry per ERC-20 they know about.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balances(&self, address: &str) -> Result<Vec<TokenBalance>>;
}
