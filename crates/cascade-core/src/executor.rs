//! Fallback executor
//!
//! Drives sequential attempts against a catalog snapshot until the first
//! usable response, an exhausted list, an expired global budget, or a
//! caller-side cancellation. The greedy first-success-wins policy is
//! deliberate: cheapest viable answer, stop as soon as one works. Attempts
//! are never raced in parallel; losing quota on abandoned calls costs more
//! than the latency of a sequential walk.

use crate::catalog::ProviderCatalog;
use crate::messages::ChatRequest;
use crate::outcome::{AttemptOutcome, FailureReason, FallbackRun, RunResult};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Per-run options
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Preferred first attempt; the cascade still falls back past it
    pub override_id: Option<String>,
    /// Total wall-clock budget across all attempts combined
    pub global_timeout: Option<Duration>,
    /// Caller-side abort signal
    pub cancellation: Option<CancellationToken>,
    /// Correlation id; generated when absent
    pub request_id: Option<String>,
}

impl RunOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Try this entry first, then continue with the normal order
    pub fn with_override(mut self, id: impl Into<String>) -> Self {
        self.override_id = Some(id.into());
        self
    }

    /// Bound the total wall-clock time of the run
    pub fn with_global_timeout(mut self, timeout: Duration) -> Self {
        self.global_timeout = Some(timeout);
        self
    }

    /// Attach a cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set the correlation id
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

/// Sequential fallback executor.
///
/// `run` always returns a [`FallbackRun`] value; exhaustion, global timeout,
/// and cancellation are representable outcomes, never errors. Only catalog
/// construction and mutation can fail with an `Err`.
#[derive(Debug, Clone)]
pub struct FallbackExecutor {
    default_attempt_timeout: Duration,
}

impl FallbackExecutor {
    /// Default per-attempt timeout when a descriptor has no override
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Create an executor with the default per-attempt timeout
    pub fn new() -> Self {
        Self {
            default_attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }

    /// Set the default per-attempt timeout
    pub fn with_default_attempt_timeout(mut self, timeout: Duration) -> Self {
        self.default_attempt_timeout = timeout;
        self
    }

    /// Execute the fallback walk for one request.
    ///
    /// The catalog is snapshotted once at the start; `set_enabled` calls
    /// made while the run is in flight do not affect it.
    pub async fn run(
        &self,
        catalog: &ProviderCatalog,
        request: &ChatRequest,
        options: RunOptions,
    ) -> FallbackRun {
        let request_id = options
            .request_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let cancellation = options.cancellation.unwrap_or_default();
        let order = catalog.ordered_attempts(options.override_id.as_deref());
        let started = Instant::now();

        let mut attempts: Vec<AttemptOutcome> = Vec::with_capacity(order.len());

        for (position, descriptor) in order.iter().enumerate() {
            let remaining = match options.global_timeout {
                Some(total) => {
                    let elapsed = started.elapsed();
                    if elapsed >= total {
                        for left_over in &order[position..] {
                            attempts.push(AttemptOutcome::skipped(
                                &left_over.id,
                                FailureReason::GlobalTimeout.to_string(),
                            ));
                        }
                        warn!(
                            request_id = %request_id,
                            attempted = position,
                            skipped = order.len() - position,
                            "global budget exhausted before the walk finished"
                        );
                        return Self::failed(request_id, attempts, FailureReason::GlobalTimeout);
                    }
                    Some(total - elapsed)
                }
                None => None,
            };

            let per_attempt = descriptor.timeout.unwrap_or(self.default_attempt_timeout);
            let budget = match remaining {
                Some(left) => per_attempt.min(left),
                None => per_attempt,
            };

            debug!(
                request_id = %request_id,
                attempt = %descriptor.id,
                tier = descriptor.tier,
                budget_ms = budget.as_millis() as u64,
                "starting attempt"
            );

            let attempt_started = Instant::now();
            let waited = tokio::select! {
                biased;
                _ = cancellation.cancelled() => None,
                invoked = tokio::time::timeout(budget, descriptor.transport.invoke(request)) => {
                    Some(invoked)
                }
            };

            let Some(invoked) = waited else {
                // The in-flight transport future is dropped here, so a late
                // response cannot write into a finalized run.
                attempts.push(AttemptOutcome::skipped(
                    &descriptor.id,
                    FailureReason::Cancelled.to_string(),
                ));
                warn!(request_id = %request_id, attempt = %descriptor.id, "run cancelled");
                return Self::failed(request_id, attempts, FailureReason::Cancelled);
            };

            let duration = attempt_started.elapsed();
            match invoked {
                Ok(Ok(response)) => {
                    if descriptor.transport.is_usable(&response) {
                        attempts.push(AttemptOutcome::success(&descriptor.id, duration));
                        if position > 0 {
                            info!(
                                request_id = %request_id,
                                attempt = %descriptor.id,
                                failed_before = position,
                                "fallback succeeded"
                            );
                        }
                        return FallbackRun {
                            request_id,
                            attempts,
                            result: RunResult::Success {
                                payload: response,
                                source: descriptor.id.clone(),
                            },
                        };
                    }

                    warn!(
                        request_id = %request_id,
                        attempt = %descriptor.id,
                        "response rejected as unusable, trying next"
                    );
                    attempts.push(AttemptOutcome::error(
                        &descriptor.id,
                        "empty response",
                        duration,
                    ));
                }
                Ok(Err(error)) => {
                    warn!(
                        request_id = %request_id,
                        attempt = %descriptor.id,
                        %error,
                        "attempt failed, trying next"
                    );
                    attempts.push(AttemptOutcome::error(
                        &descriptor.id,
                        error.to_string(),
                        duration,
                    ));
                }
                Err(_elapsed) => {
                    warn!(
                        request_id = %request_id,
                        attempt = %descriptor.id,
                        budget_ms = budget.as_millis() as u64,
                        "attempt timed out, trying next"
                    );
                    attempts.push(AttemptOutcome::timeout(&descriptor.id, budget, duration));
                }
            }
        }

        Self::failed(request_id, attempts, FailureReason::AllAttemptsFailed)
    }

    fn failed(
        request_id: String,
        attempts: Vec<AttemptOutcome>,
        reason: FailureReason,
    ) -> FallbackRun {
        FallbackRun {
            request_id,
            attempts,
            result: RunResult::Failed { reason },
        }
    }
}

impl Default for FallbackExecutor {
    fn default() -> Self {
        Self::new()
    }
}
