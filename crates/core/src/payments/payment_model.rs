use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::PaymentError;

/// Where a payment is in its lifecycle.
///
/// `Idle -> Pending -> Confirming -> Success | Failed`. Validation failures go
/// straight from `Idle` to `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    #[default]
    Idle,
    /// Waiting for the wallet to sign and broadcast
    Pending,
    /// Broadcast, waiting for the receipt
    Confirming { tx_hash: String },
    Success { tx_hash: String },
    Failed(PaymentError),
}

impl PaymentStatus {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirming { .. })
    }
}

/// Outcome of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub tx_hash: String,
    /// False when the transaction was mined but reverted
    pub success: bool,
}

/// `0x` followed by 40 hex digits.
pub fn is_valid_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Convert a token amount to integer base units, rounding half away from zero
/// at `decimals` places.
pub fn to_token_units(amount: Decimal, decimals: u32) -> Result<u128, PaymentError> {
    if amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(amount.to_string()));
    }
    let mut scaled =
        amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    scaled.rescale(decimals);
    if scaled.scale() != decimals {
        return Err(PaymentError::InvalidAmount(amount.to_string()));
    }
    match u128::try_from(scaled.mantissa()) {
        Ok(units) if units > 0 => Ok(units),
        _ => Err(PaymentError::InvalidAmount(amount.to_string())),
    }
}
