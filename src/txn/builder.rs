//! Transaction assembly
//!
//! Builds unsigned transactions from validated requests. A builder is
//! constructed with a sender and a freshly fetched parameter snapshot and
//! used for exactly one build; the pipeline never carries one across
//! retries.

use crate::abi::{self, AbiError, AbiMethod};
use crate::ledger::SuggestedParams;
use crate::txn::{OnComplete, TransactionPayload, UnsignedTransaction};
use crate::validate::DeploymentRequest;
use std::collections::BTreeMap;
use thiserror::Error;

/// Transaction build failures
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Abi(#[from] AbiError),
}

/// Assembles unsigned transactions for one sender and params snapshot
pub struct TransactionBuilder {
    sender: String,
    params: SuggestedParams,
}

impl TransactionBuilder {
    pub fn new(sender: &str, params: SuggestedParams) -> Self {
        Self {
            sender: sender.to_string(),
            params,
        }
    }

    /// Application-creation transaction
    ///
    /// Embeds both compiled programs, the four schema counts, the extra
    /// page count, and the no-op completion intent.
    pub fn application_create(
        &self,
        request: &DeploymentRequest,
        approval_program: Vec<u8>,
        clear_program: Vec<u8>,
    ) -> UnsignedTransaction {
        UnsignedTransaction {
            sender: self.sender.clone(),
            params: self.params.clone(),
            payload: TransactionPayload::ApplicationCreate {
                approval_program,
                clear_program,
                global_schema: request.global_state,
                local_schema: request.local_state,
                extra_pages: request.extra_pages,
                on_complete: OnComplete::NoOp,
            },
        }
    }

    /// Application-deletion transaction
    pub fn application_delete(&self, app_id: u64) -> UnsignedTransaction {
        UnsignedTransaction {
            sender: self.sender.clone(),
            params: self.params.clone(),
            payload: TransactionPayload::ApplicationDelete {
                app_id,
                on_complete: OnComplete::DeleteApplication,
            },
        }
    }

    /// Application method-call transaction group
    ///
    /// Resolves each declared argument against the user-supplied values
    /// (by declared name or the positional fallback key) and coerces it to
    /// its kind. A missing or uncoercible value fails the build, naming
    /// the argument. The group currently holds a single transaction; the
    /// group shape matches what the wallet signer API expects.
    pub fn application_call(
        &self,
        app_id: u64,
        method: &AbiMethod,
        values: &BTreeMap<String, String>,
    ) -> Result<Vec<UnsignedTransaction>, BuildError> {
        let args = abi::bind_args(method, values)?;
        Ok(vec![UnsignedTransaction {
            sender: self.sender.clone(),
            params: self.params.clone(),
            payload: TransactionPayload::ApplicationCall {
                app_id,
                method: method.name.clone(),
                args,
            },
        }])
    }
}
