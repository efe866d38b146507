use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use crate::constants::USDC_BASE_ADDRESS;
use crate::errors::PaymentError;
use crate::payments::{PaymentService, PaymentStatus, TransactionReceipt, WalletSigner};

const RECIPIENT: &str = "0x1111111111111111111111111111111111111111";

#[derive(Default)]
struct MockSigner {
    disconnected: bool,
    reject_transfer: bool,
    revert: bool,
    transfers: Mutex<Vec<(String, String, u128)>>,
}

#[async_trait]
impl WalletSigner for MockSigner {
    fn address(&self) -> Option<String> {
        (!self.disconnected).then(|| "0x2222222222222222222222222222222222222222".to_string())
    }

    fn is_connected(&self) -> bool {
        !self.disconnected
    }

    async fn transfer(&self, token: &str, to: &str, units: u128) -> Result<String, PaymentError> {
        if self.reject_transfer {
            return Err(PaymentError::Rejected("user denied signature".to_string()));
        }
        self.transfers
            .lock()
            .unwrap()
            .push((token.to_string(), to.to_string(), units));
        Ok("0xabc".to_string())
    }

    async fn wait_for_receipt(&self, tx_hash: &str) -> Result<TransactionReceipt, PaymentError> {
        Ok(TransactionReceipt {
            tx_hash: tx_hash.to_string(),
            success: !self.revert,
        })
    }
}

#[tokio::test]
async fn test_send_usdc_success() {
    let signer = Arc::new(MockSigner::default());
    let service = PaymentService::new(signer.clone());
    assert_eq!(service.status(), PaymentStatus::Idle);

    let tx_hash = service.send_usdc(RECIPIENT, dec!(12.5)).await.unwrap();

    assert_eq!(tx_hash, "0xabc");
    assert_eq!(
        service.status(),
        PaymentStatus::Success {
            tx_hash: "0xabc".to_string()
        }
    );
    let transfers = signer.transfers.lock().unwrap().clone();
    assert_eq!(
        transfers,
        vec![(USDC_BASE_ADDRESS.to_string(), RECIPIENT.to_string(), 12_500_000)]
    );
}

#[tokio::test]
async fn test_send_usdc_requires_connected_wallet() {
    let signer = Arc::new(MockSigner {
        disconnected: true,
        ..Default::default()
    });
    let service = PaymentService::new(signer.clone());

    let err = service.send_usdc(RECIPIENT, dec!(1)).await.unwrap_err();

    assert_eq!(err, PaymentError::WalletNotConnected);
    assert_eq!(service.status(), PaymentStatus::Failed(err));
    assert!(signer.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_send_usdc_validates_input() {
    let signer = Arc::new(MockSigner::default());
    let service = PaymentService::new(signer.clone());

    assert!(matches!(
        service.send_usdc("0x123", dec!(1)).await,
        Err(PaymentError::InvalidRecipient(_))
    ));
    assert!(matches!(
        service.send_usdc(RECIPIENT, dec!(0)).await,
        Err(PaymentError::InvalidAmount(_))
    ));
    assert!(matches!(
        service.send_usdc(RECIPIENT, dec!(-4)).await,
        Err(PaymentError::InvalidAmount(_))
    ));
    assert!(signer.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_transfer_fails() {
    let service = PaymentService::new(Arc::new(MockSigner {
        reject_transfer: true,
        ..Default::default()
    }));

    let err = service.send_usdc(RECIPIENT, dec!(1)).await.unwrap_err();

    assert!(matches!(err, PaymentError::Rejected(_)));
    assert!(matches!(service.status(), PaymentStatus::Failed(_)));
}

#[tokio::test]
async fn test_reverted_transfer_fails() {
    let service = PaymentService::new(Arc::new(MockSigner {
        revert: true,
        ..Default::default()
    }));

    let err = service.send_usdc(RECIPIENT, dec!(1)).await.unwrap_err();

    assert_eq!(err, PaymentError::Reverted("0xabc".to_string()));
}

#[tokio::test]
async fn test_reset_returns_to_idle() {
    let service = PaymentService::new(Arc::new(MockSigner::default()));
    service.send_usdc(RECIPIENT, dec!(1)).await.unwrap();

    service.reset();

    assert_eq!(service.status(), PaymentStatus::Idle);
}
