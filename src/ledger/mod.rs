//! Ledger service interfaces and clients
//!
//! The pipeline talks to the network through three narrow seams:
//! - [`ProgramCompiler`] turns program source text into bytecode
//! - [`LedgerQuery`] answers balance, parameter, and application lookups
//! - [`LedgerSubmission`] accepts signed transactions and reports
//!   round-by-round confirmation
//!
//! [`AlgodClient`] and [`IndexerClient`] are the concrete REST
//! implementations; [`LedgerClient`] bundles them behind [`LedgerQuery`]
//! the way the services are actually split across the two node APIs.
//! Tests substitute mock implementations of the same traits.

mod algod;
mod indexer;
mod types;

pub use algod::AlgodClient;
pub use indexer::IndexerClient;
pub use types::{
    ApplicationInfo, ApplicationSummary, ConfirmationInfo, ConfirmationStatus, SuggestedParams,
};

use crate::config::Network;
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by the ledger services
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid bytecode encoding: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("program compilation failed: {message}")]
    Compile { message: String },
    #[error("transaction rejected: {reason}")]
    Rejected { reason: String },
}

/// Compiles program source text into executable bytecode
#[async_trait]
pub trait ProgramCompiler: Send + Sync {
    async fn compile(&self, source: &str) -> Result<Vec<u8>, LedgerError>;
}

/// Read-only ledger lookups
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Spendable balance of an account, in microAlgos
    async fn account_balance(&self, address: &str) -> Result<u64, LedgerError>;

    /// Current fee and round-window parameters for building a transaction
    async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError>;

    /// Applications created by an account
    async fn created_applications(
        &self,
        address: &str,
    ) -> Result<Vec<ApplicationSummary>, LedgerError>;

    /// Details of a single application
    async fn application_info(&self, app_id: u64) -> Result<ApplicationInfo, LedgerError>;
}

/// Transaction submission and confirmation reporting
#[async_trait]
pub trait LedgerSubmission: Send + Sync {
    /// Submit signed transaction bytes; returns the transaction ID
    async fn submit(&self, signed: &[Vec<u8>]) -> Result<String, LedgerError>;

    /// Confirmation status of a previously submitted transaction
    async fn confirmation_status(&self, txid: &str) -> Result<ConfirmationStatus, LedgerError>;
}

/// The two REST services of one network, bundled behind [`LedgerQuery`]
pub struct LedgerClient {
    pub algod: AlgodClient,
    pub indexer: IndexerClient,
}

impl LedgerClient {
    pub fn new(network: Network) -> Self {
        Self {
            algod: AlgodClient::new(network),
            indexer: IndexerClient::new(network),
        }
    }
}

#[async_trait]
impl LedgerQuery for LedgerClient {
    async fn account_balance(&self, address: &str) -> Result<u64, LedgerError> {
        self.indexer.account_balance(address).await
    }

    async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError> {
        self.algod.transaction_params().await
    }

    async fn created_applications(
        &self,
        address: &str,
    ) -> Result<Vec<ApplicationSummary>, LedgerError> {
        self.indexer.created_applications(address).await
    }

    async fn application_info(&self, app_id: u64) -> Result<ApplicationInfo, LedgerError> {
        self.indexer.application_info(app_id).await
    }
}
