//! Attempt outcomes and the per-request fallback run record

use crate::transport::RawResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Classification of one execution against one attempt target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    /// Transport returned in time and the response was usable
    Success,
    /// Transport signaled failure, or the response was rejected as unusable
    Error,
    /// The attempt's time budget elapsed before the transport completed
    Timeout,
    /// Entry was never attempted (global budget exhausted, or cancelled)
    Skipped,
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptStatus::Success => write!(f, "success"),
            AttemptStatus::Error => write!(f, "error"),
            AttemptStatus::Timeout => write!(f, "timeout"),
            AttemptStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Result of one execution against one attempt target
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    /// Id of the descriptor tried
    pub attempt_id: String,
    /// How the attempt ended
    pub status: AttemptStatus,
    /// Failure classification; absent on success
    pub reason: Option<String>,
    /// Wall-clock time spent on this attempt
    pub duration: Duration,
}

impl AttemptOutcome {
    /// Record a successful attempt
    pub fn success(attempt_id: impl Into<String>, duration: Duration) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            status: AttemptStatus::Success,
            reason: None,
            duration,
        }
    }

    /// Record a failed attempt
    pub fn error(
        attempt_id: impl Into<String>,
        reason: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            status: AttemptStatus::Error,
            reason: Some(reason.into()),
            duration,
        }
    }

    /// Record a timed-out attempt
    pub fn timeout(attempt_id: impl Into<String>, budget: Duration, duration: Duration) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            status: AttemptStatus::Timeout,
            reason: Some(format!("timeout after {}ms", budget.as_millis())),
            duration,
        }
    }

    /// Record an entry that was never attempted
    pub fn skipped(attempt_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            attempt_id: attempt_id.into(),
            status: AttemptStatus::Skipped,
            reason: Some(reason.into()),
            duration: Duration::ZERO,
        }
    }
}

/// Terminal failure classification for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Every enabled entry was tried and none produced a usable response
    AllAttemptsFailed,
    /// The total wall-clock budget ran out before the walk finished
    GlobalTimeout,
    /// The caller aborted the run
    Cancelled,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureReason::AllAttemptsFailed => write!(f, "all-attempts-failed"),
            FailureReason::GlobalTimeout => write!(f, "global-timeout"),
            FailureReason::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Final result of a fallback run
#[derive(Debug, Clone)]
pub enum RunResult {
    /// First usable response, with provenance
    Success {
        payload: RawResponse,
        /// Id of the attempt that served the request
        source: String,
    },
    /// No attempt produced a usable response
    Failed { reason: FailureReason },
}

/// The aggregate record of one top-level request.
///
/// Created fresh per request and discarded after the caller consumes it;
/// no run state persists across requests.
#[derive(Debug, Clone)]
pub struct FallbackRun {
    /// Correlation identifier for logging and tracing
    pub request_id: String,
    /// Outcomes in execution order
    pub attempts: Vec<AttemptOutcome>,
    /// Terminal result
    pub result: RunResult,
}

impl FallbackRun {
    /// Whether the run ended with a usable response
    pub fn is_success(&self) -> bool {
        matches!(self.result, RunResult::Success { .. })
    }

    /// The winning payload, if any
    pub fn payload(&self) -> Option<&RawResponse> {
        match &self.result {
            RunResult::Success { payload, .. } => Some(payload),
            RunResult::Failed { .. } => None,
        }
    }

    /// Id of the attempt that served the request, if any
    pub fn source(&self) -> Option<&str> {
        match &self.result {
            RunResult::Success { source, .. } => Some(source.as_str()),
            RunResult::Failed { .. } => None,
        }
    }

    /// Terminal failure reason, if the run failed
    pub fn failure_reason(&self) -> Option<FailureReason> {
        match &self.result {
            RunResult::Success { .. } => None,
            RunResult::Failed { reason } => Some(*reason),
        }
    }

    /// Per-attempt breakdown for verbose or debug surfaces.
    ///
    /// One line per attempt: `id: status (reason)`. Returns `None` for
    /// successful runs.
    pub fn failure_report(&self) -> Option<String> {
        let reason = self.failure_reason()?;
        let mut report = format!("{reason}\n");
        for attempt in &self.attempts {
            match &attempt.reason {
                Some(why) => {
                    report.push_str(&format!(
                        "  {}: {} ({})\n",
                        attempt.attempt_id, attempt.status, why
                    ));
                }
                None => {
                    report.push_str(&format!("  {}: {}\n", attempt.attempt_id, attempt.status));
                }
            }
        }
        Some(report)
    }
}
