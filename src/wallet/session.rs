//! Wallet session state and signing coordination
//!
//! One session object owns the connected address and is shared across
//! pipeline runs. Only `connect` and `disconnect` mutate it; a run that
//! observes a disconnect mid-flight fails rather than resuming under a
//! different identity.

use crate::txn::UnsignedTransaction;
use crate::wallet::{WalletError, WalletSigner};
use tokio::sync::RwLock;

/// A wallet session: signer handle plus the connected account address
pub struct WalletSession<S: WalletSigner> {
    signer: S,
    address: RwLock<Option<String>>,
}

impl<S: WalletSigner> WalletSession<S> {
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            address: RwLock::new(None),
        }
    }

    /// Connect to the wallet and remember the returned account address
    pub async fn connect(&self) -> Result<String, WalletError> {
        let address = self.signer.connect().await?;
        if address.is_empty() {
            return Err(WalletError::NoAccount);
        }
        log::info!("wallet connected as {}", crate::wallet::format_address(&address));
        *self.address.write().await = Some(address.clone());
        Ok(address)
    }

    /// Disconnect from the wallet and clear the session address
    pub async fn disconnect(&self) {
        self.signer.disconnect().await;
        *self.address.write().await = None;
        log::info!("wallet disconnected");
    }

    /// The connected account address, if any
    pub async fn current_address(&self) -> Option<String> {
        self.address.read().await.clone()
    }

    /// Sign one transaction group on behalf of `expected_sender`
    ///
    /// Fails with [`WalletError::NotConnected`] if the session has been
    /// disconnected, or reconnected under a different address, since the
    /// run captured its sender. A [`WalletError::Declined`] from the
    /// signer passes through untouched so the caller can distinguish
    /// cancellation from failure.
    pub async fn sign_group(
        &self,
        group: Vec<UnsignedTransaction>,
        expected_sender: &str,
    ) -> Result<Vec<Vec<u8>>, WalletError> {
        match self.current_address().await {
            Some(address) if address == expected_sender => {}
            _ => return Err(WalletError::NotConnected),
        }
        self.signer
            .sign_transactions(&[group], Some(expected_sender))
            .await
    }
}
