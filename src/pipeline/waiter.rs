//! Submission and round-bounded confirmation
//!
//! Submits signed bytes exactly once, then polls the node's confirmation
//! status once per round up to a bounded number of rounds. Exhausting the
//! budget is a timeout, which is an indeterminate outcome: the transaction
//! may still confirm later, so a timeout is never reported as a rejection.

use crate::ledger::{ConfirmationInfo, ConfirmationStatus, LedgerError, LedgerSubmission};
use std::time::Duration;
use thiserror::Error;

/// Default confirmation budget, in rounds
pub const DEFAULT_WAIT_ROUNDS: u64 = 5;

/// Default pause between confirmation polls, roughly one block interval
const ROUND_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Submission and confirmation failures
#[derive(Error, Debug)]
pub enum WaitError {
    /// The network refused the transaction; a definite failure
    #[error("transaction rejected: {reason}")]
    Rejected { reason: String },
    /// The round budget ran out with the outcome still unknown. The
    /// caller must check the transaction status out-of-band; this is not
    /// proof of failure.
    #[error("transaction {txid} not confirmed after {rounds} rounds; outcome unknown")]
    Timeout { txid: String, rounds: u64 },
    #[error(transparent)]
    Ledger(LedgerError),
}

/// Submits a signed transaction group and waits for confirmation
pub struct SubmissionWaiter<'a, S: LedgerSubmission + ?Sized> {
    submission: &'a S,
    max_wait_rounds: u64,
    poll_interval: Duration,
}

impl<'a, S: LedgerSubmission + ?Sized> SubmissionWaiter<'a, S> {
    pub fn new(submission: &'a S) -> Self {
        Self {
            submission,
            max_wait_rounds: DEFAULT_WAIT_ROUNDS,
            poll_interval: ROUND_POLL_INTERVAL,
        }
    }

    pub fn with_max_wait_rounds(mut self, rounds: u64) -> Self {
        self.max_wait_rounds = rounds;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Submit signed transaction bytes once, returning the transaction ID
    pub async fn submit(&self, signed: &[Vec<u8>]) -> Result<String, WaitError> {
        match self.submission.submit(signed).await {
            Ok(txid) => Ok(txid),
            Err(LedgerError::Rejected { reason }) => Err(WaitError::Rejected { reason }),
            Err(other) => Err(WaitError::Ledger(other)),
        }
    }

    /// Poll for confirmation up to the round budget
    ///
    /// Performs exactly `max_wait_rounds` status polls before giving up
    /// with [`WaitError::Timeout`]. An unknown transaction is treated like
    /// a pending one while the budget lasts.
    pub async fn wait_for_confirmation(
        &self,
        txid: &str,
    ) -> Result<ConfirmationInfo, WaitError> {
        for round in 1..=self.max_wait_rounds {
            match self
                .submission
                .confirmation_status(txid)
                .await
                .map_err(WaitError::Ledger)?
            {
                ConfirmationStatus::Confirmed(info) => {
                    log::info!(
                        "transaction {} confirmed in round {}",
                        txid,
                        info.confirmed_round
                    );
                    return Ok(info);
                }
                ConfirmationStatus::Rejected { reason } => {
                    return Err(WaitError::Rejected { reason });
                }
                ConfirmationStatus::Pending | ConfirmationStatus::NotFound => {
                    log::debug!(
                        "transaction {} unconfirmed after poll {}/{}",
                        txid,
                        round,
                        self.max_wait_rounds
                    );
                }
            }

            if round < self.max_wait_rounds && !self.poll_interval.is_zero() {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        Err(WaitError::Timeout {
            txid: txid.to_string(),
            rounds: self.max_wait_rounds,
        })
    }

    /// Submit and wait in one step
    pub async fn submit_and_confirm(
        &self,
        signed: &[Vec<u8>],
    ) -> Result<ConfirmationInfo, WaitError> {
        let txid = self.submit(signed).await?;
        self.wait_for_confirmation(&txid).await
    }
}
