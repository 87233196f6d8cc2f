//! Deployment orchestration pipeline
//!
//! Sequences validation, affordability prechecking, compilation,
//! transaction building, wallet signing, submission, and round-bounded
//! confirmation into one linear run per flow (create, delete, or method
//! call). Exactly one stage is in flight at any instant; every failure
//! short-circuits into a terminal state, and nothing is retried without an
//! explicit new submit from the caller.

mod state;
mod waiter;

pub use state::PipelineState;
pub use waiter::{SubmissionWaiter, WaitError, DEFAULT_WAIT_ROUNDS};

use crate::abi::{AbiError, AbiInterface};
use crate::cost::{self, CostError};
use crate::ledger::{ConfirmationInfo, LedgerError, LedgerQuery, LedgerSubmission, ProgramCompiler};
use crate::txn::{BuildError, TransactionBuilder};
use crate::validate::{self, FieldErrors, RawDeploymentForm};
use crate::wallet::{WalletError, WalletSession, WalletSigner};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Terminal artifact of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationResult {
    /// Round the transaction was confirmed in
    pub confirmed_round: u64,
    /// Application ID allocated by a creation run
    pub application_id: Option<u64>,
    /// Base64-encoded log entries of a method-call run, in order; the
    /// caller decodes return values with its ABI tooling
    pub method_results: Vec<String>,
}

impl From<ConfirmationInfo> for ConfirmationResult {
    fn from(info: ConfirmationInfo) -> Self {
        Self {
            confirmed_round: info.confirmed_round,
            application_id: info.application_index,
            method_results: info.logs,
        }
    }
}

/// Caller-supplied request for the method-call flow
#[derive(Debug, Clone, Default)]
pub struct MethodCallForm {
    pub app_id: u64,
    /// JSON text of the application's ABI descriptor
    pub abi_json: String,
    pub method_name: String,
    /// User-entered argument values, keyed by the argument's form key
    pub values: BTreeMap<String, String>,
}

/// Everything that can end a run short of confirmation
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A run is active or already confirmed; submits are only accepted
    /// from `Idle`, `Error`, or `Cancelled`
    #[error("pipeline is not ready for a new run")]
    Busy,
    #[error("validation failed: {0}")]
    Validation(#[from] FieldErrors),
    #[error("invalid method call: {0}")]
    MethodCall(#[from] AbiError),
    #[error("insufficient funds: need {required} microAlgos, have {available}")]
    InsufficientFunds { required: u64, available: u64 },
    #[error("compilation failed: {message}")]
    Compile { message: String },
    /// The user declined in their wallet; distinct from failure, and the
    /// pipeline stays retryable
    #[error("signing declined by the user")]
    Declined,
    #[error("wallet failure: {0}")]
    Wallet(WalletError),
    #[error("submission rejected: {reason}")]
    Submission { reason: String },
    /// Indeterminate outcome; the transaction may still confirm later
    #[error("transaction {txid} not confirmed after {rounds} rounds; outcome unknown")]
    Timeout { txid: String, rounds: u64 },
    #[error("ledger failure: {0}")]
    Ledger(LedgerError),
}

impl From<CostError> for PipelineError {
    fn from(err: CostError) -> Self {
        match err {
            CostError::InsufficientFunds {
                required,
                available,
            } => PipelineError::InsufficientFunds {
                required,
                available,
            },
            CostError::Lookup(e) => PipelineError::Ledger(e),
        }
    }
}

impl From<LedgerError> for PipelineError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Compile { message } => PipelineError::Compile { message },
            LedgerError::Rejected { reason } => PipelineError::Submission { reason },
            other => PipelineError::Ledger(other),
        }
    }
}

impl From<WalletError> for PipelineError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Declined => PipelineError::Declined,
            other => PipelineError::Wallet(other),
        }
    }
}

impl From<WaitError> for PipelineError {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::Rejected { reason } => PipelineError::Submission { reason },
            WaitError::Timeout { txid, rounds } => PipelineError::Timeout { txid, rounds },
            WaitError::Ledger(e) => PipelineError::Ledger(e),
        }
    }
}

impl From<BuildError> for PipelineError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::Abi(e) => PipelineError::MethodCall(e),
        }
    }
}

/// The deployment state machine
///
/// Owns its [`PipelineState`] exclusively; the caller observes it through
/// [`state`](Self::state), [`last_error`](Self::last_error), and
/// [`visited_states`](Self::visited_states) but never mutates it. One run
/// at a time: a submit while a run is active or confirmed is rejected with
/// [`PipelineError::Busy`]; a submit from `Error` or `Cancelled` retries
/// implicitly.
pub struct DeploymentPipeline<C, Q, T, W>
where
    C: ProgramCompiler,
    Q: LedgerQuery,
    T: LedgerSubmission,
    W: WalletSigner,
{
    compiler: Arc<C>,
    query: Arc<Q>,
    submission: Arc<T>,
    session: Arc<WalletSession<W>>,
    state: PipelineState,
    last_error: Option<String>,
    visited: Vec<PipelineState>,
    max_wait_rounds: u64,
    poll_interval: Option<Duration>,
}

impl<C, Q, T, W> DeploymentPipeline<C, Q, T, W>
where
    C: ProgramCompiler,
    Q: LedgerQuery,
    T: LedgerSubmission,
    W: WalletSigner,
{
    pub fn new(
        compiler: Arc<C>,
        query: Arc<Q>,
        submission: Arc<T>,
        session: Arc<WalletSession<W>>,
    ) -> Self {
        Self {
            compiler,
            query,
            submission,
            session,
            state: PipelineState::Idle,
            last_error: None,
            visited: Vec::new(),
            max_wait_rounds: DEFAULT_WAIT_ROUNDS,
            poll_interval: None,
        }
    }

    /// Confirmation budget, in rounds
    pub fn with_max_wait_rounds(mut self, rounds: u64) -> Self {
        self.max_wait_rounds = rounds;
        self
    }

    /// Override the pause between confirmation polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    /// Current pipeline state
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Message of the failure that ended the last run, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// States the most recent run moved through, in order
    pub fn visited_states(&self) -> &[PipelineState] {
        &self.visited
    }

    /// Return to `Idle` after a failed or cancelled run
    ///
    /// Only meaningful from `Error` or `Cancelled`; a confirmed pipeline
    /// has completed its run and does not come back.
    pub fn retry(&mut self) {
        if matches!(self.state, PipelineState::Error | PipelineState::Cancelled) {
            self.state = PipelineState::Idle;
            self.last_error = None;
        }
    }

    /// Run the application-creation flow to completion
    pub async fn deploy(
        &mut self,
        form: &RawDeploymentForm,
    ) -> Result<ConfirmationResult, PipelineError> {
        self.begin()?;
        let result = self.run_deploy(form).await;
        self.conclude(result)
    }

    /// Run the application-deletion flow to completion
    pub async fn delete(&mut self, app_id: u64) -> Result<ConfirmationResult, PipelineError> {
        self.begin()?;
        let result = self.run_delete(app_id).await;
        self.conclude(result)
    }

    /// Run the method-call flow to completion
    pub async fn call(
        &mut self,
        request: &MethodCallForm,
    ) -> Result<ConfirmationResult, PipelineError> {
        self.begin()?;
        let result = self.run_call(request).await;
        self.conclude(result)
    }

    async fn run_deploy(
        &mut self,
        form: &RawDeploymentForm,
    ) -> Result<ConfirmationResult, PipelineError> {
        let request = validate::validate(form)?;
        let sender = self.require_sender().await?;

        // Refuse before compiling or signing if the creator cannot afford
        // the deployment; the ledger re-checks authoritatively at submit.
        let estimate = cost::estimate(
            &request.global_state,
            &request.local_state,
            request.extra_pages,
        );
        cost::precheck(self.query.as_ref(), &sender, &estimate).await?;

        let approval = self.compiler.compile(&request.approval_source).await?;
        let clear = self.compiler.compile(&request.clear_state_source).await?;

        let params = self.query.suggested_params().await?;
        let txn =
            TransactionBuilder::new(&sender, params).application_create(&request, approval, clear);

        self.enter(PipelineState::Signing);
        let signed = self.session.sign_group(vec![txn], &sender).await?;

        self.enter(PipelineState::Submitting);
        let txid = self.waiter().submit(&signed).await?;

        self.enter(PipelineState::Confirming);
        let info = self.waiter().wait_for_confirmation(&txid).await?;
        Ok(info.into())
    }

    async fn run_delete(&mut self, app_id: u64) -> Result<ConfirmationResult, PipelineError> {
        let sender = self.require_sender().await?;

        let params = self.query.suggested_params().await?;
        let txn = TransactionBuilder::new(&sender, params).application_delete(app_id);

        self.enter(PipelineState::Signing);
        let signed = self.session.sign_group(vec![txn], &sender).await?;

        self.enter(PipelineState::Submitting);
        let txid = self.waiter().submit(&signed).await?;

        self.enter(PipelineState::Confirming);
        let info = self.waiter().wait_for_confirmation(&txid).await?;
        Ok(info.into())
    }

    async fn run_call(
        &mut self,
        request: &MethodCallForm,
    ) -> Result<ConfirmationResult, PipelineError> {
        let abi = AbiInterface::parse(&request.abi_json)?;
        let method = abi
            .method(&request.method_name)
            .ok_or_else(|| AbiError::UnknownMethod(request.method_name.clone()))?
            .clone();
        let sender = self.require_sender().await?;

        let params = self.query.suggested_params().await?;
        let group = TransactionBuilder::new(&sender, params).application_call(
            request.app_id,
            &method,
            &request.values,
        )?;

        self.enter(PipelineState::Signing);
        let signed = self.session.sign_group(group, &sender).await?;

        self.enter(PipelineState::Submitting);
        let txid = self.waiter().submit(&signed).await?;

        self.enter(PipelineState::Confirming);
        let info = self.waiter().wait_for_confirmation(&txid).await?;
        Ok(info.into())
    }

    async fn require_sender(&self) -> Result<String, PipelineError> {
        self.session
            .current_address()
            .await
            .ok_or(PipelineError::Wallet(WalletError::NotConnected))
    }

    fn waiter(&self) -> SubmissionWaiter<'_, T> {
        let mut waiter =
            SubmissionWaiter::new(self.submission.as_ref()).with_max_wait_rounds(self.max_wait_rounds);
        if let Some(interval) = self.poll_interval {
            waiter = waiter.with_poll_interval(interval);
        }
        waiter
    }

    fn begin(&mut self) -> Result<(), PipelineError> {
        if !self.state.accepts_submit() {
            return Err(PipelineError::Busy);
        }
        self.last_error = None;
        self.visited.clear();
        self.enter(PipelineState::Validating);
        Ok(())
    }

    fn enter(&mut self, next: PipelineState) {
        log::debug!("pipeline: {} -> {}", self.state, next);
        self.state = next;
        self.visited.push(next);
    }

    fn conclude(
        &mut self,
        result: Result<ConfirmationResult, PipelineError>,
    ) -> Result<ConfirmationResult, PipelineError> {
        match &result {
            Ok(confirmed) => {
                log::info!(
                    "run confirmed in round {}{}",
                    confirmed.confirmed_round,
                    confirmed
                        .application_id
                        .map(|id| format!(", application {}", id))
                        .unwrap_or_default()
                );
                self.enter(PipelineState::Confirmed);
            }
            Err(PipelineError::Declined) => {
                log::info!("run cancelled: user declined to sign");
                self.last_error = Some(PipelineError::Declined.to_string());
                self.enter(PipelineState::Cancelled);
            }
            Err(err) => {
                log::warn!("run failed: {}", err);
                self.last_error = Some(err.to_string());
                self.enter(PipelineState::Error);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{
        ApplicationInfo, ApplicationSummary, ConfirmationStatus, SuggestedParams,
    };
    use crate::txn::UnsignedTransaction;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;

    type EventLog = Arc<Mutex<Vec<&'static str>>>;

    fn test_params() -> SuggestedParams {
        SuggestedParams {
            fee: 0,
            min_fee: 1000,
            first_round: 5000,
            last_round: 6000,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: "hash".to_string(),
        }
    }

    /// Scripted ledger collaborator covering all three service seams
    struct MockLedger {
        events: EventLog,
        balance: u64,
        confirm_after: u64,
        polls: AtomicU64,
        logs: Vec<String>,
    }

    impl MockLedger {
        fn new(events: EventLog) -> Self {
            Self {
                events,
                balance: 10_000_000,
                confirm_after: 1,
                polls: AtomicU64::new(0),
                logs: vec![],
            }
        }

        fn record(&self, event: &'static str) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[async_trait]
    impl ProgramCompiler for MockLedger {
        async fn compile(&self, _source: &str) -> Result<Vec<u8>, LedgerError> {
            self.record("compile");
            Ok(vec![0x0a])
        }
    }

    #[async_trait]
    impl LedgerQuery for MockLedger {
        async fn account_balance(&self, _address: &str) -> Result<u64, LedgerError> {
            self.record("balance");
            Ok(self.balance)
        }

        async fn suggested_params(&self) -> Result<SuggestedParams, LedgerError> {
            self.record("params");
            Ok(test_params())
        }

        async fn created_applications(
            &self,
            _address: &str,
        ) -> Result<Vec<ApplicationSummary>, LedgerError> {
            unreachable!("not used by the pipeline")
        }

        async fn application_info(&self, _app_id: u64) -> Result<ApplicationInfo, LedgerError> {
            unreachable!("not used by the pipeline")
        }
    }

    #[async_trait]
    impl LedgerSubmission for MockLedger {
        async fn submit(&self, _signed: &[Vec<u8>]) -> Result<String, LedgerError> {
            self.record("submit");
            Ok("TXID".to_string())
        }

        async fn confirmation_status(
            &self,
            _txid: &str,
        ) -> Result<ConfirmationStatus, LedgerError> {
            self.record("status");
            let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
            if poll >= self.confirm_after {
                Ok(ConfirmationStatus::Confirmed(ConfirmationInfo {
                    confirmed_round: 6001,
                    application_index: Some(99),
                    logs: self.logs.clone(),
                }))
            } else {
                Ok(ConfirmationStatus::Pending)
            }
        }
    }

    #[derive(Clone, Copy)]
    enum SignerMode {
        Approve,
        Decline,
    }

    struct MockSigner {
        events: EventLog,
        mode: SignerMode,
    }

    #[async_trait]
    impl WalletSigner for MockSigner {
        async fn connect(&self) -> Result<String, WalletError> {
            Ok("SENDER".to_string())
        }

        async fn disconnect(&self) {}

        async fn sign_transactions(
            &self,
            groups: &[Vec<UnsignedTransaction>],
            _signer: Option<&str>,
        ) -> Result<Vec<Vec<u8>>, WalletError> {
            self.events.lock().unwrap().push("sign");
            match self.mode {
                SignerMode::Approve => {
                    Ok(groups.iter().flatten().map(|_| vec![0u8; 8]).collect())
                }
                SignerMode::Decline => Err(WalletError::Declined),
            }
        }
    }

    struct Harness {
        events: EventLog,
        pipeline: DeploymentPipeline<MockLedger, MockLedger, MockLedger, MockSigner>,
    }

    async fn harness(configure: impl FnOnce(&mut MockLedger), mode: SignerMode) -> Harness {
        let _ = env_logger::builder().is_test(true).try_init();
        let events: EventLog = Arc::new(Mutex::new(Vec::new()));
        let mut ledger = MockLedger::new(Arc::clone(&events));
        configure(&mut ledger);
        let ledger = Arc::new(ledger);
        let session = Arc::new(WalletSession::new(MockSigner {
            events: Arc::clone(&events),
            mode,
        }));
        session.connect().await.unwrap();
        let pipeline = DeploymentPipeline::new(
            Arc::clone(&ledger),
            Arc::clone(&ledger),
            ledger,
            session,
        )
        .with_poll_interval(Duration::ZERO);
        Harness { events, pipeline }
    }

    fn deploy_form() -> RawDeploymentForm {
        RawDeploymentForm {
            approval_source: Some("int 1".to_string()),
            clear_state_source: Some("int 1".to_string()),
            num_global_ints: "1".to_string(),
            num_global_byte_slices: "1".to_string(),
            num_local_ints: "0".to_string(),
            num_local_byte_slices: "0".to_string(),
            extra_pages: "0".to_string(),
        }
    }

    fn call_form() -> MethodCallForm {
        MethodCallForm {
            app_id: 7,
            abi_json: r#"{
                "name": "app",
                "methods": [
                    {
                        "name": "transfer",
                        "args": [
                            { "name": "to", "type": "address" },
                            { "type": "uint64" }
                        ]
                    },
                    {
                        "name": "greet",
                        "args": [{ "name": "message", "type": "string" }]
                    }
                ]
            }"#
            .to_string(),
            method_name: "transfer".to_string(),
            values: [
                ("to".to_string(), "RECEIVER".to_string()),
                ("uint64_1".to_string(), "42".to_string()),
            ]
            .into_iter()
            .collect(),
        }
    }

    #[tokio::test]
    async fn test_successful_deploy_visits_stages_in_order() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        let result = h.pipeline.deploy(&deploy_form()).await.unwrap();
        assert_eq!(result.application_id, Some(99));
        assert_eq!(result.confirmed_round, 6001);
        assert_eq!(
            h.pipeline.visited_states(),
            &[
                PipelineState::Validating,
                PipelineState::Signing,
                PipelineState::Submitting,
                PipelineState::Confirming,
                PipelineState::Confirmed,
            ]
        );
        assert_eq!(h.pipeline.state(), PipelineState::Confirmed);
        assert_eq!(h.pipeline.last_error(), None);
    }

    #[tokio::test]
    async fn test_deploy_orders_collaborator_calls() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        h.pipeline.deploy(&deploy_form()).await.unwrap();
        let events = h.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["balance", "compile", "compile", "params", "sign", "submit", "status"]
        );
    }

    #[tokio::test]
    async fn test_validation_failure_skips_all_io() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        let mut form = deploy_form();
        form.extra_pages = "9".to_string();
        let err = h.pipeline.deploy(&form).await.unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
        assert_eq!(h.pipeline.state(), PipelineState::Error);
        assert!(h.events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_funds_blocks_before_compile_and_sign() {
        let mut h = harness(|ledger| ledger.balance = 100, SignerMode::Approve).await;
        let err = h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        match err {
            PipelineError::InsufficientFunds {
                required,
                available,
            } => {
                assert_eq!(required, 178_500);
                assert_eq!(available, 100);
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        }
        assert_eq!(*h.events.lock().unwrap(), vec!["balance"]);
        assert_eq!(h.pipeline.state(), PipelineState::Error);
    }

    #[tokio::test]
    async fn test_oversized_schema_fails_precheck_without_panicking() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        let mut form = deploy_form();
        form.num_global_ints = "9000000000000000000".to_string();
        let err = h.pipeline.deploy(&form).await.unwrap_err();
        match err {
            PipelineError::InsufficientFunds { required, .. } => {
                assert_eq!(required, u64::MAX);
            }
            other => panic!("expected InsufficientFunds, got {:?}", other),
        }
        assert_eq!(*h.events.lock().unwrap(), vec!["balance"]);
        assert_eq!(h.pipeline.state(), PipelineState::Error);
    }

    #[tokio::test]
    async fn test_declined_signing_cancels_and_allows_retry() {
        let mut h = harness(|_| {}, SignerMode::Decline).await;
        let err = h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Declined));
        assert_eq!(h.pipeline.state(), PipelineState::Cancelled);

        // A new submit restarts cleanly from Validating.
        let err = h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Declined));
        assert_eq!(h.pipeline.visited_states()[0], PipelineState::Validating);
    }

    #[tokio::test]
    async fn test_retry_returns_to_idle() {
        let mut h = harness(|_| {}, SignerMode::Decline).await;
        h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        assert_eq!(h.pipeline.state(), PipelineState::Cancelled);
        h.pipeline.retry();
        assert_eq!(h.pipeline.state(), PipelineState::Idle);
        assert_eq!(h.pipeline.last_error(), None);
    }

    #[tokio::test]
    async fn test_no_new_run_after_confirmation() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        h.pipeline.deploy(&deploy_form()).await.unwrap();
        let err = h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        assert!(matches!(err, PipelineError::Busy));
        assert_eq!(h.pipeline.state(), PipelineState::Confirmed);
    }

    #[tokio::test]
    async fn test_confirmation_timeout_is_indeterminate_error() {
        let mut h = harness(|ledger| ledger.confirm_after = 100, SignerMode::Approve).await;
        h.pipeline = h.pipeline.with_max_wait_rounds(2);
        let err = h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        match err {
            PipelineError::Timeout { txid, rounds } => {
                assert_eq!(txid, "TXID");
                assert_eq!(rounds, 2);
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
        assert_eq!(h.pipeline.state(), PipelineState::Error);
        assert!(h.pipeline.last_error().unwrap().contains("outcome unknown"));
    }

    #[tokio::test]
    async fn test_delete_flow_reaches_confirmed() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        let result = h.pipeline.delete(42).await.unwrap();
        assert_eq!(result.confirmed_round, 6001);
        assert_eq!(
            h.pipeline.visited_states(),
            &[
                PipelineState::Validating,
                PipelineState::Signing,
                PipelineState::Submitting,
                PipelineState::Confirming,
                PipelineState::Confirmed,
            ]
        );
        // No validation, precheck, or compilation for deletions.
        let events = h.events.lock().unwrap().clone();
        assert_eq!(events, vec!["params", "sign", "submit", "status"]);
    }

    #[tokio::test]
    async fn test_call_flow_surfaces_method_results() {
        let mut h = harness(
            |ledger| ledger.logs = vec!["cmVzdWx0".to_string()],
            SignerMode::Approve,
        )
        .await;
        let result = h.pipeline.call(&call_form()).await.unwrap();
        assert_eq!(result.method_results, vec!["cmVzdWx0".to_string()]);
        assert_eq!(h.pipeline.state(), PipelineState::Confirmed);
    }

    #[tokio::test]
    async fn test_call_with_unsupported_kind_fails_before_signing() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        let mut form = call_form();
        form.method_name = "greet".to_string();
        form.values = [("message".to_string(), "hi".to_string())].into_iter().collect();
        let err = h.pipeline.call(&form).await.unwrap_err();
        match err {
            PipelineError::MethodCall(AbiError::UnsupportedKind { method, kind }) => {
                assert_eq!(method, "greet");
                assert_eq!(kind, "string");
            }
            other => panic!("expected UnsupportedKind, got {:?}", other),
        }
        assert!(!h.events.lock().unwrap().contains(&"sign"));
        assert_eq!(h.pipeline.state(), PipelineState::Error);
    }

    #[tokio::test]
    async fn test_disconnected_session_fails_the_run() {
        let mut h = harness(|_| {}, SignerMode::Approve).await;
        h.pipeline.session.disconnect().await;
        let err = h.pipeline.deploy(&deploy_form()).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Wallet(WalletError::NotConnected)
        ));
        assert_eq!(h.pipeline.state(), PipelineState::Error);
    }
}
