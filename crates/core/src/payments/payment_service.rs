use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::payment_model::{is_valid_address, to_token_units, PaymentStatus};
use super::payment_traits::WalletSigner;
use crate::constants::{USDC_BASE_ADDRESS, USDC_DECIMALS};
use crate::errors::PaymentError;

/// Sends USDC through a [`WalletSigner`] and tracks the payment status.
pub struct PaymentService {
    signer: Arc<dyn WalletSigner>,
    token_address: String,
    status: Mutex<PaymentStatus>,
}

impl PaymentService {
    /// A service that pays in USDC on Base.
    pub fn new(signer: Arc<dyn WalletSigner>) -> Self {
        Self::with_token(signer, USDC_BASE_ADDRESS)
    }

    pub fn with_token(signer: Arc<dyn WalletSigner>, token_address: &str) -> Self {
        Self {
            signer,
            token_address: token_address.to_string(),
            status: Mutex::new(PaymentStatus::Idle),
        }
    }

    pub fn status(&self) -> PaymentStatus {
        self.lock_status().clone()
    }

    /// Back to `Idle`, e.g. when the user dismisses a result. Ignored while a
    /// payment is in flight.
    pub fn reset(&self) {
        let mut status = self.lock_status();
        if !status.is_in_flight() {
            *status = PaymentStatus::Idle;
        }
    }

    /// Transfer `amount_usd` USDC to `to`. Returns the transaction hash once
    /// the transfer is confirmed.
    pub async fn send_usdc(&self, to: &str, amount_usd: Decimal) -> Result<String, PaymentError> {
        let to = to.trim();
        let units = match self.validate(to, amount_usd) {
            Ok(units) => units,
            Err(e) => return Err(self.fail(e)),
        };

        self.set_status(PaymentStatus::Pending);
        debug!("Sending {} USDC ({} units) to {}", amount_usd, units, to);

        let tx_hash = match self.signer.transfer(&self.token_address, to, units).await {
            Ok(tx_hash) => tx_hash,
            Err(e) => return Err(self.fail(e)),
        };

        self.set_status(PaymentStatus::Confirming {
            tx_hash: tx_hash.clone(),
        });

        match self.signer.wait_for_receipt(&tx_hash).await {
            Ok(receipt) if receipt.success => {
                info!("Payment {} confirmed", tx_hash);
                self.set_status(PaymentStatus::Success {
                    tx_hash: tx_hash.clone(),
                });
                Ok(tx_hash)
            }
            Ok(_) => Err(self.fail(PaymentError::Reverted(tx_hash))),
            Err(e) => Err(self.fail(e)),
        }
    }

    fn validate(&self, to: &str, amount_usd: Decimal) -> Result<u128, PaymentError> {
        if !self.signer.is_connected() || self.signer.address().is_none() {
            return Err(PaymentError::WalletNotConnected);
        }
        if !is_valid_address(to) {
            return Err(PaymentError::InvalidRecipient(to.to_string()));
        }
        to_token_units(amount_usd, USDC_DECIMALS)
    }

    fn fail(&self, error: PaymentError) -> PaymentError {
        warn!("Payment failed: {}", error);
        self.set_status(PaymentStatus::Failed(error.clone()));
        error
    }

    fn set_status(&self, status: PaymentStatus) {
        *self.lock_status() = status;
    }

    fn lock_status(&self) -> MutexGuard<'_, PaymentStatus> {
        self.status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
