//! Core error types for the Minifolio tracker.
//!
//! Only [`ValidationError`] and [`PaymentError`] are ever surfaced to a user.
//! Storage and market data failures are logged and degraded around: the
//! aggregation path always produces a best-effort snapshot.

use thiserror::Error;

pub use minifolio_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the tracker.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Balance discovery failed: {0}")]
    Discovery(String),
}

/// Bad user input. The holding is not created or updated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Token symbol must not be empty")]
    EmptySymbol,

    #[error("Quantity must be greater than zero, got {0}")]
    NonPositiveQuantity(String),

    #[error("Quantity must be a finite number, got '{0}'")]
    NonFiniteQuantity(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Durable storage failures. Never fatal.
///
/// Read failures yield an empty portfolio; write failures leave the previous
/// persisted state stale while the in-memory state stays correct.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("Stored data for '{key}' is corrupt: {message}")]
    Corrupt { key: String, message: String },
}

/// Transfer failures. Surfaced with a retry action; never touch holdings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("Transfer rejected: {0}")]
    Rejected(String),

    #[error("Transfer reverted: {0}")]
    Reverted(String),
}
