//! Wallet signer interface and session handling
//!
//! All key material and signing lives in an external, user-controlled
//! wallet. The crate only holds a session: the connected account address
//! and a handle to the signer. Declining to sign is a first-class outcome,
//! kept distinct from every other signer failure.

mod session;

pub use session::WalletSession;

use crate::txn::UnsignedTransaction;
use async_trait::async_trait;
use thiserror::Error;

/// Wallet-side failures
#[derive(Error, Debug)]
pub enum WalletError {
    /// The user declined to sign in their wallet. Recoverable; the caller
    /// may submit again.
    #[error("signing declined by the user")]
    Declined,
    #[error("wallet returned no account")]
    NoAccount,
    #[error("wallet session is not connected")]
    NotConnected,
    #[error("wallet connection failed: {0}")]
    Connection(String),
}

/// An external wallet that authenticates the user and signs transactions
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Authenticate and return the account address to act as
    async fn connect(&self) -> Result<String, WalletError>;

    /// End the wallet session
    async fn disconnect(&self);

    /// Sign one or more transaction groups, returning signed bytes per
    /// transaction in order
    async fn sign_transactions(
        &self,
        groups: &[Vec<UnsignedTransaction>],
        signer: Option<&str>,
    ) -> Result<Vec<Vec<u8>>, WalletError>;
}

/// Shorten an address for display: first six and last six characters
pub fn format_address(address: &str) -> String {
    if address.len() <= 12 {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 6..])
}
