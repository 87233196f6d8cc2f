//! Pipeline states
//!
//! The externally observable lifecycle of one deployment, deletion, or
//! method-call run:
//!
//! ```text
//! Idle --submit--> Validating
//! Validating --ok--> Signing         ; --fail--> Error
//! Signing --ok--> Submitting         ; --declined--> Cancelled ; --fail--> Error
//! Submitting --ok--> Confirming      ; --fail--> Error
//! Confirming --ok--> Confirmed       ; --timeout/fail--> Error
//! Error --retry--> Idle
//! Cancelled --retry--> Idle
//! ```

use serde::Serialize;
use std::fmt;

/// Current stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Idle,
    Validating,
    Signing,
    Submitting,
    Confirming,
    Confirmed,
    Cancelled,
    Error,
}

impl PipelineState {
    /// Whether a run has finished in this state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelineState::Confirmed | PipelineState::Cancelled | PipelineState::Error
        )
    }

    /// Whether a new submit may start from this state
    ///
    /// A submit from `Error` or `Cancelled` is an implicit retry; any other
    /// non-idle state means a run is active or already completed.
    pub fn accepts_submit(&self) -> bool {
        matches!(
            self,
            PipelineState::Idle | PipelineState::Error | PipelineState::Cancelled
        )
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::Validating => "validating",
            PipelineState::Signing => "signing",
            PipelineState::Submitting => "submitting",
            PipelineState::Confirming => "confirming",
            PipelineState::Confirmed => "confirmed",
            PipelineState::Cancelled => "cancelled",
            PipelineState::Error => "error",
        };
        write!(f, "{}", name)
    }
}
