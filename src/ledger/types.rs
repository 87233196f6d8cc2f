//! Shared ledger wire types

use serde::{Deserialize, Serialize};

/// Fee and round-window parameters for building a transaction
///
/// Always fetched fresh immediately before building; the pipeline never
/// reuses a params snapshot across retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    /// Suggested fee, in microAlgos per byte
    pub fee: u64,
    /// Minimum flat fee accepted by the network
    pub min_fee: u64,
    /// First round the transaction is valid in
    pub first_round: u64,
    /// Last round the transaction is valid in
    pub last_round: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
}

/// One application created by an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub app_id: u64,
    pub created_at_round: Option<u64>,
    pub deleted: bool,
}

/// Details of a deployed application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub app_id: u64,
    pub creator: Option<String>,
}

/// What the node knows about a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationStatus {
    /// Known to the node, not yet in a block
    Pending,
    /// Not (or no longer) known to the node; treated like pending while
    /// waiting, since the transaction may surface in a later round
    NotFound,
    /// Dropped from the pool with an error
    Rejected { reason: String },
    Confirmed(ConfirmationInfo),
}

/// Details of a confirmed transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationInfo {
    /// Round the transaction was confirmed in
    pub confirmed_round: u64,
    /// Application ID allocated by an application-create transaction
    pub application_index: Option<u64>,
    /// Base64-encoded log entries emitted by the application, in order
    pub logs: Vec<String>,
}
