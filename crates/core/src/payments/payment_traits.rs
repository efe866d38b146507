use async_trait::async_trait;

use super::TransactionReceipt;
use crate::errors::PaymentError;

/// A connected wallet that can sign token transfers.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Address of the connected account.
    fn address(&self) -> Option<String>;

    fn is_connected(&self) -> bool;

    /// Sign and broadcast an ERC-20 transfer of `units` base units of `token`.
    /// Returns the transaction hash.
    async fn transfer(&self, token: &str, to: &str, units: u128) -> Result<String, PaymentError>;

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt, PaymentError>;
}
