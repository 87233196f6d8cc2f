//! REST client for an algod node
//!
//! Covers the node-side half of the ledger services: program compilation,
//! transaction parameters, submission, and confirmation polling.

use crate::config::Network;
use crate::ledger::types::{ConfirmationInfo, ConfirmationStatus, SuggestedParams};
use crate::ledger::{LedgerError, LedgerSubmission, ProgramCompiler};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::StatusCode;
use serde::Deserialize;

/// How many rounds a built transaction stays valid, mirroring the window
/// the node SDKs apply on top of the reported last round
const MAX_TX_VALIDITY_ROUNDS: u64 = 1000;

/// Client for the algod REST API
pub struct AlgodClient {
    base_url: String,
    http: reqwest::Client,
}

impl AlgodClient {
    pub fn new(network: Network) -> Self {
        Self::from_url(network.config().algod_url)
    }

    pub fn from_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Fetch current fee and round-window parameters
    pub async fn transaction_params(&self) -> Result<SuggestedParams, LedgerError> {
        let url = format!("{}/v2/transactions/params", self.base_url);
        let response = self.http.get(&url).send().await?;
        let payload: TransactionParamsPayload = decode_ok(response).await?;
        Ok(payload.into())
    }
}

#[async_trait]
impl ProgramCompiler for AlgodClient {
    async fn compile(&self, source: &str) -> Result<Vec<u8>, LedgerError> {
        let url = format!("{}/v2/teal/compile", self.base_url);
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(source.to_string())
            .send()
            .await?;

        // The node reports source-level failures as a 400 with a message
        // body; those are the user's to fix, not a transport problem.
        if response.status() == StatusCode::BAD_REQUEST {
            let message = error_body(response).await;
            return Err(LedgerError::Compile { message });
        }

        let payload: CompilePayload = decode_ok(response).await?;
        let bytecode = BASE64.decode(payload.result)?;
        log::debug!("compiled program: {} bytes of bytecode", bytecode.len());
        Ok(bytecode)
    }
}

#[async_trait]
impl LedgerSubmission for AlgodClient {
    async fn submit(&self, signed: &[Vec<u8>]) -> Result<String, LedgerError> {
        let url = format!("{}/v2/transactions", self.base_url);
        let body: Vec<u8> = signed.iter().flatten().copied().collect();
        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-binary")
            .body(body)
            .send()
            .await?;

        if response.status() == StatusCode::BAD_REQUEST {
            let reason = error_body(response).await;
            return Err(LedgerError::Rejected { reason });
        }

        let payload: SubmitPayload = decode_ok(response).await?;
        log::info!("submitted transaction {}", payload.tx_id);
        Ok(payload.tx_id)
    }

    async fn confirmation_status(&self, txid: &str) -> Result<ConfirmationStatus, LedgerError> {
        let url = format!("{}/v2/transactions/pending/{}", self.base_url, txid);
        let response = self.http.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(ConfirmationStatus::NotFound);
        }

        let payload: PendingPayload = decode_ok(response).await?;
        Ok(payload.into_status())
    }
}

/// Check the status and decode a JSON payload
///
/// A malformed body on a successful status is a `Decode` error, kept apart
/// from transport failures so the caller can tell a broken node from a
/// broken connection.
async fn decode_ok<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LedgerError> {
    let status = response.status();
    if !status.is_success() {
        return Err(LedgerError::Status {
            code: status.as_u16(),
            body: error_body(response).await,
        });
    }
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Extract the human-readable message from an error response
async fn error_body(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    // Error bodies are usually {"message": "..."}; fall back to raw text
    match serde_json::from_str::<ErrorPayload>(&body) {
        Ok(payload) => payload.message,
        Err(_) => body,
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Deserialize)]
struct ErrorPayload {
    message: String,
}

#[derive(Deserialize)]
struct CompilePayload {
    /// Base64-encoded bytecode
    result: String,
}

#[derive(Debug, Deserialize)]
struct SubmitPayload {
    #[serde(rename = "txId")]
    tx_id: String,
}

#[derive(Deserialize)]
struct TransactionParamsPayload {
    #[serde(default)]
    fee: u64,
    #[serde(rename = "min-fee")]
    min_fee: u64,
    #[serde(rename = "last-round")]
    last_round: u64,
    #[serde(rename = "genesis-id")]
    genesis_id: String,
    #[serde(rename = "genesis-hash")]
    genesis_hash: String,
}

impl From<TransactionParamsPayload> for SuggestedParams {
    fn from(payload: TransactionParamsPayload) -> Self {
        SuggestedParams {
            fee: payload.fee,
            min_fee: payload.min_fee,
            first_round: payload.last_round,
            last_round: payload.last_round + MAX_TX_VALIDITY_ROUNDS,
            genesis_id: payload.genesis_id,
            genesis_hash: payload.genesis_hash,
        }
    }
}

#[derive(Deserialize)]
struct PendingPayload {
    #[serde(rename = "confirmed-round", default)]
    confirmed_round: Option<u64>,
    #[serde(rename = "pool-error", default)]
    pool_error: String,
    #[serde(rename = "application-index", default)]
    application_index: Option<u64>,
    #[serde(default)]
    logs: Option<Vec<String>>,
}

impl PendingPayload {
    fn into_status(self) -> ConfirmationStatus {
        if !self.pool_error.is_empty() {
            return ConfirmationStatus::Rejected {
                reason: self.pool_error,
            };
        }
        match self.confirmed_round {
            Some(round) if round > 0 => ConfirmationStatus::Confirmed(ConfirmationInfo {
                confirmed_round: round,
                application_index: self.application_index,
                logs: self.logs.unwrap_or_default(),
            }),
            _ => ConfirmationStatus::Pending,
        }
    }
}
