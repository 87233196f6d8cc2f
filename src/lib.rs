//! Algo-Deployer: deploy and invoke Algorand smart contracts through an
//! external wallet signer.
//!
//! This crate is the orchestration core behind a contract-deployment
//! frontend. It owns everything between raw form input and a confirmed
//! ledger transaction:
//! - Collect-all validation of deployment forms
//! - Minimum-balance cost estimation and affordability prechecking
//! - Program compilation via an algod node
//! - Unsigned transaction assembly from fresh network parameters
//! - Wallet signing with user cancellation as a first-class outcome
//! - Submission and round-bounded confirmation polling
//! - An explicit state machine sequencing the above, one stage in flight
//!   at a time
//!
//! Rendering, routing, and wallet connection chrome are the caller's
//! business; the caller drives the pipeline and observes its state.
//!
//! # Example
//!
//! ```no_run
//! use algo_deployer::config::Network;
//! use algo_deployer::ledger::{AlgodClient, LedgerClient};
//! use algo_deployer::pipeline::DeploymentPipeline;
//! use algo_deployer::txn::UnsignedTransaction;
//! use algo_deployer::validate::RawDeploymentForm;
//! use algo_deployer::wallet::{WalletError, WalletSession, WalletSigner};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! /// Bridge to the user's wallet application
//! struct MyWalletBridge;
//!
//! #[async_trait]
//! impl WalletSigner for MyWalletBridge {
//!     async fn connect(&self) -> Result<String, WalletError> {
//!         unimplemented!("hand off to the wallet app")
//!     }
//!     async fn disconnect(&self) {}
//!     async fn sign_transactions(
//!         &self,
//!         _groups: &[Vec<UnsignedTransaction>],
//!         _signer: Option<&str>,
//!     ) -> Result<Vec<Vec<u8>>, WalletError> {
//!         unimplemented!("hand off to the wallet app")
//!     }
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Arc::new(WalletSession::new(MyWalletBridge));
//! session.connect().await?;
//!
//! let algod = Arc::new(AlgodClient::new(Network::Testnet));
//! let query = Arc::new(LedgerClient::new(Network::Testnet));
//! let mut pipeline = DeploymentPipeline::new(Arc::clone(&algod), query, algod, session);
//!
//! let form = RawDeploymentForm {
//!     approval_source: Some("#pragma version 8\nint 1".to_string()),
//!     clear_state_source: Some("#pragma version 8\nint 1".to_string()),
//!     num_global_ints: "1".to_string(),
//!     num_global_byte_slices: "0".to_string(),
//!     num_local_ints: "0".to_string(),
//!     num_local_byte_slices: "0".to_string(),
//!     extra_pages: "0".to_string(),
//! };
//!
//! let result = pipeline.deploy(&form).await?;
//! println!(
//!     "application {:?} confirmed in round {}",
//!     result.application_id, result.confirmed_round
//! );
//! # Ok(())
//! # }
//! ```

pub mod abi;
pub mod config;
pub mod cost;
pub mod ledger;
pub mod pipeline;
pub mod txn;
pub mod validate;
pub mod wallet;

// Re-export commonly used types
pub use abi::{AbiInterface, AbiMethod, ArgKind, MethodArgValue};
pub use config::Network;
pub use cost::{estimate, CostEstimate};
pub use ledger::{
    AlgodClient, ApplicationSummary, IndexerClient, LedgerClient, LedgerQuery, LedgerSubmission,
    ProgramCompiler, SuggestedParams,
};
pub use pipeline::{
    ConfirmationResult, DeploymentPipeline, MethodCallForm, PipelineError, PipelineState,
};
pub use txn::{TransactionBuilder, UnsignedTransaction};
pub use validate::{validate, DeploymentRequest, RawDeploymentForm, StateSchema};
pub use wallet::{format_address, WalletSession, WalletSigner};
