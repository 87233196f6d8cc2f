//! Minimum-balance cost estimation
//!
//! Deploying an application raises the creator's minimum balance, and opting
//! in raises the user's. Both increases are a fixed affine function of the
//! requested state schema, reproduced here so the caller can show live cost
//! figures and the pipeline can refuse unaffordable deployments before any
//! signing round-trip happens.

use crate::ledger::{LedgerError, LedgerQuery};
use crate::validate::StateSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Constants (ledger economics, microAlgos)
// =============================================================================

/// Flat cost of an application, per program page
pub const BASE_APP_COST: u64 = 100_000;

/// Cost of any state key, regardless of value kind
pub const KEY_COST: u64 = 25_000;

/// Additional cost of an integer value slot
pub const INT_SLOT_COST: u64 = 3_500;

/// Additional cost of a byte-slice value slot
pub const BYTES_SLOT_COST: u64 = 25_000;

// =============================================================================
// Estimator
// =============================================================================

/// Minimum-balance increases implied by a deployment request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Increase for the creator when the application is created
    pub app_create: u64,
    /// Increase for any account that opts in to the application
    pub app_opt_in: u64,
}

/// Compute the minimum-balance cost of an application
///
/// Pure and total; recomputed on every schema change for live display.
/// Validation bounds `extra_pages` but not the schema counters, so the
/// arithmetic saturates: an absurdly large schema caps at `u64::MAX`
/// microAlgos and fails the balance precheck instead of wrapping.
pub fn estimate(global: &StateSchema, local: &StateSchema, extra_pages: u64) -> CostEstimate {
    CostEstimate {
        app_create: BASE_APP_COST
            .saturating_mul(extra_pages.saturating_add(1))
            .saturating_add((KEY_COST + INT_SLOT_COST).saturating_mul(global.num_ints))
            .saturating_add((KEY_COST + BYTES_SLOT_COST).saturating_mul(global.num_byte_slices)),
        app_opt_in: BASE_APP_COST
            .saturating_add((KEY_COST + INT_SLOT_COST).saturating_mul(local.num_ints))
            .saturating_add((KEY_COST + BYTES_SLOT_COST).saturating_mul(local.num_byte_slices)),
    }
}

// =============================================================================
// Balance precheck
// =============================================================================

/// Precheck failures
#[derive(Error, Debug)]
pub enum CostError {
    #[error("insufficient funds: need {required} microAlgos, have {available}")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("balance lookup failed: {0}")]
    Lookup(#[from] LedgerError),
}

/// Check that an account can afford an application creation
///
/// Performs exactly one balance lookup. This runs before compilation and
/// signing to avoid wasting a wallet round-trip; the ledger's own admission
/// check at submission time remains authoritative, so a balance change
/// between this check and the submit is a tolerated race, not a bug.
pub async fn precheck<Q>(
    query: &Q,
    address: &str,
    estimate: &CostEstimate,
) -> Result<(), CostError>
where
    Q: LedgerQuery + ?Sized,
{
    let available = query.account_balance(address).await?;
    if estimate.app_create > available {
        return Err(CostError::InsufficientFunds {
            required: estimate.app_create,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{ApplicationInfo, ApplicationSummary, SuggestedParams};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedBalance {
        balance: u64,
        lookups: AtomicUsize,
    }

    impl FixedBalance {
        fn new(balance: u64) -> Self {
            Self {
                balance,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LedgerQuery for FixedBalance {
        async fn account_balance(&self, _address: &str) -> Result<u64, LedgerError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            Ok(self.balance)
        }

        async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError> {
            unreachable!("precheck must not fetch params")
        }

        async fn created_applications(
            &self,
            _address: &str,
        ) -> Result<Vec<ApplicationSummary>, LedgerError> {
            unreachable!("precheck must not list applications")
        }

        async fn application_info(&self, _app_id: u64) -> Result<ApplicationInfo, LedgerError> {
            unreachable!("precheck must not fetch application info")
        }
    }

    #[test]
    fn test_estimate_matches_ledger_formula() {
        let cost = estimate(&StateSchema::new(1, 1), &StateSchema::new(0, 0), 0);
        assert_eq!(cost.app_create, 178_500);
        assert_eq!(cost.app_opt_in, 100_000);
    }

    #[test]
    fn test_estimate_empty_schema() {
        let cost = estimate(&StateSchema::default(), &StateSchema::default(), 0);
        assert_eq!(cost.app_create, BASE_APP_COST);
        assert_eq!(cost.app_opt_in, BASE_APP_COST);
    }

    #[test]
    fn test_extra_pages_multiply_base_only() {
        let global = StateSchema::new(2, 3);
        let without = estimate(&global, &StateSchema::default(), 0);
        let with = estimate(&global, &StateSchema::default(), 3);
        assert_eq!(with.app_create - without.app_create, 3 * BASE_APP_COST);
        assert_eq!(with.app_opt_in, without.app_opt_in);
    }

    #[test]
    fn test_estimate_saturates_instead_of_wrapping() {
        // Counters this large pass validation (they fit in i64), so the
        // estimate must stay monotonic rather than overflow.
        let huge = StateSchema::new(9_000_000_000_000_000_000, 0);
        let cost = estimate(&huge, &huge, 0);
        assert_eq!(cost.app_create, u64::MAX);
        assert_eq!(cost.app_opt_in, u64::MAX);
    }

    #[test]
    fn test_opt_in_tracks_local_schema() {
        let cost = estimate(&StateSchema::default(), &StateSchema::new(2, 1), 0);
        assert_eq!(
            cost.app_opt_in,
            BASE_APP_COST + 2 * (KEY_COST + INT_SLOT_COST) + (KEY_COST + BYTES_SLOT_COST)
        );
    }

    #[tokio::test]
    async fn test_precheck_passes_on_exact_balance() {
        let cost = estimate(&StateSchema::new(1, 1), &StateSchema::default(), 0);
        let query = FixedBalance::new(cost.app_create);
        precheck(&query, "ADDR", &cost).await.unwrap();
        assert_eq!(query.lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_precheck_fails_when_short() {
        let cost = estimate(&StateSchema::new(1, 1), &StateSchema::default(), 0);
        let query = FixedBalance::new(cost.app_create - 1);
        match precheck(&query, "ADDR", &cost).await {
            Err(CostError::InsufficientFunds {
                required,
                available,
            }) => {
                assert_eq!(required, 178_500);
                assert_eq!(available, 178_499);
            }
            other => panic!("expected InsufficientFunds, got {:?}", other.err()),
        }
    }
}
