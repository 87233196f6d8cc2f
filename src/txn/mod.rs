//! Unsigned transaction model
//!
//! The crate never encodes or signs wire bytes itself; the wallet signer
//! owns the cryptography. What the pipeline hands to the signer is this
//! typed model: a common header (sender plus a fresh parameter snapshot)
//! and one application payload.

mod builder;

pub use builder::{BuildError, TransactionBuilder};

use crate::abi::MethodArgValue;
use crate::ledger::SuggestedParams;
use crate::validate::StateSchema;
use serde::Serialize;

/// What the ledger should do when the application call completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnComplete {
    /// Approve and do nothing further
    NoOp,
    /// Delete the application
    DeleteApplication,
}

/// One unsigned ledger transaction, ready for the wallet signer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnsignedTransaction {
    pub sender: String,
    pub params: SuggestedParams,
    pub payload: TransactionPayload,
}

/// The application-specific body of a transaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TransactionPayload {
    ApplicationCreate {
        approval_program: Vec<u8>,
        clear_program: Vec<u8>,
        global_schema: StateSchema,
        local_schema: StateSchema,
        extra_pages: u64,
        on_complete: OnComplete,
    },
    ApplicationDelete {
        app_id: u64,
        on_complete: OnComplete,
    },
    ApplicationCall {
        app_id: u64,
        method: String,
        args: Vec<MethodArgValue>,
    },
}
