//! REST client for an indexer node
//!
//! Covers the lookup half of the ledger services: account balances and
//! application listings.

use crate::config::Network;
use crate::ledger::types::{ApplicationInfo, ApplicationSummary};
use crate::ledger::LedgerError;
use serde::Deserialize;

/// Client for the indexer REST API
pub struct IndexerClient {
    base_url: String,
    http: reqwest::Client,
}

impl IndexerClient {
    pub fn new(network: Network) -> Self {
        Self::from_url(network.config().indexer_url)
    }

    pub fn from_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Spendable balance of an account, in microAlgos
    pub async fn account_balance(&self, address: &str) -> Result<u64, LedgerError> {
        let url = format!("{}/v2/accounts/{}", self.base_url, address);
        let payload: AccountPayload = self.get(&url).await?;
        Ok(payload.account.amount)
    }

    /// Applications created by an account
    pub async fn created_applications(
        &self,
        address: &str,
    ) -> Result<Vec<ApplicationSummary>, LedgerError> {
        let url = format!(
            "{}/v2/accounts/{}/created-applications",
            self.base_url, address
        );
        let payload: CreatedApplicationsPayload = self.get(&url).await?;
        Ok(payload
            .applications
            .into_iter()
            .map(ApplicationRecord::into_summary)
            .collect())
    }

    /// Details of a single application
    pub async fn application_info(&self, app_id: u64) -> Result<ApplicationInfo, LedgerError> {
        let url = format!("{}/v2/applications/{}", self.base_url, app_id);
        let payload: ApplicationPayload = self.get(&url).await?;
        Ok(ApplicationInfo {
            app_id: payload.application.id,
            creator: payload.application.params.and_then(|p| p.creator),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, LedgerError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Status {
                code: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

// ============================================================================
// Wire payloads
// ============================================================================

#[derive(Deserialize)]
struct AccountPayload {
    account: AccountRecord,
}

#[derive(Deserialize)]
struct AccountRecord {
    amount: u64,
}

#[derive(Deserialize)]
struct CreatedApplicationsPayload {
    #[serde(default)]
    applications: Vec<ApplicationRecord>,
}

#[derive(Deserialize)]
struct ApplicationPayload {
    application: ApplicationRecord,
}

#[derive(Deserialize)]
struct ApplicationRecord {
    id: u64,
    #[serde(rename = "created-at-round", default)]
    created_at_round: Option<u64>,
    #[serde(default)]
    deleted: bool,
    #[serde(default)]
    params: Option<ApplicationParams>,
}

impl ApplicationRecord {
    fn into_summary(self) -> ApplicationSummary {
        ApplicationSummary {
            app_id: self.id,
            created_at_round: self.created_at_round,
            deleted: self.deleted,
        }
    }
}

#[derive(Deserialize)]
struct ApplicationParams {
    #[serde(default)]
    creator: Option<String>,
}
