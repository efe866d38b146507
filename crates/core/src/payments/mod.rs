//! USDC payments through a connected wallet.
//!
//! Payments never touch holdings or valuation state.

mod payment_model;
mod payment_service;
mod payment_traits;

#[cfg(test)]
mod payment_service_tests;

pub use payment_model::{is_valid_address, to_token_units, PaymentStatus, TransactionReceipt};
pub use payment_service::PaymentService;
pub use payment_traits::WalletSigner;
