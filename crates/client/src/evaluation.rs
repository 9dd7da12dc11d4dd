//! Evaluation session: cached benchmark metrics and on-demand re-runs.
//!
//! State is `Empty` until metrics are loaded, then `Loaded`. A transient
//! `running` flag overlays either state while a benchmark is in flight and
//! blocks overlapping runs. Metrics are only ever replaced as a whole.

use std::sync::Arc;

use shieldai_core::error::CoreError;
use shieldai_core::evaluation::EvaluationMetrics;
use tokio::sync::Mutex;

use crate::api::ApiError;
use crate::service::EvaluationService;

/// Transient notice shown after a failed benchmark run.
pub const EVALUATION_FAILED_NOTICE: &str = "Evaluation failed. Check the service logs.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStatus {
    Empty,
    Loaded,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("A benchmark run is already in progress")]
    AlreadyRunning,

    #[error("Benchmark run failed: {0}")]
    Benchmark(ApiError),

    #[error("Loading cached metrics failed: {0}")]
    Cache(ApiError),

    #[error(transparent)]
    Malformed(CoreError),
}

/// Read-only copy of the session state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationSnapshot {
    pub metrics: Option<EvaluationMetrics>,
    pub running: bool,
    pub notice: Option<String>,
}

impl EvaluationSnapshot {
    pub fn status(&self) -> EvaluationStatus {
        if self.metrics.is_some() {
            EvaluationStatus::Loaded
        } else {
            EvaluationStatus::Empty
        }
    }
}

struct EvaluationState {
    metrics: Option<EvaluationMetrics>,
    running: bool,
    notice: Option<String>,
    /// Bumped whenever a benchmark run stores fresh metrics.
    revision: u64,
}

pub struct EvaluationSession {
    service: Arc<dyn EvaluationService>,
    state: Mutex<EvaluationState>,
}

impl EvaluationSession {
    pub fn new(service: Arc<dyn EvaluationService>) -> Self {
        Self {
            service,
            state: Mutex::new(EvaluationState {
                metrics: None,
                running: false,
                notice: None,
                revision: 0,
            }),
        }
    }

    /// Load the metrics of the last recorded run. Called once at startup.
    ///
    /// No cached run is the expected first-use case and leaves the session
    /// `Empty`. Cached metrics never overwrite metrics from a benchmark run
    /// that finished while the load was in flight.
    pub async fn load_cached(&self) -> Result<Option<EvaluationMetrics>, EvaluationError> {
        let revision = self.state.lock().await.revision;

        let cached = match self.service.cached_metrics().await {
            Ok(cached) => cached,
            Err(e) => {
                tracing::error!(error = %e, "Cached metrics load failed");
                return Err(EvaluationError::Cache(e));
            }
        };

        let Some(metrics) = cached else {
            tracing::info!("No cached evaluation metrics");
            return Ok(None);
        };

        if let Err(e) = metrics.validate() {
            tracing::error!(error = %e, "Cached metrics are malformed");
            return Err(EvaluationError::Malformed(e));
        }

        let mut state = self.state.lock().await;
        if state.revision == revision {
            tracing::info!(
                accuracy = metrics.accuracy,
                f1_score = metrics.f1_score,
                "Loaded cached evaluation metrics",
            );
            state.metrics = Some(metrics.clone());
        } else {
            tracing::debug!("Benchmark finished during cache load, keeping fresh metrics");
        }

        Ok(Some(metrics))
    }

    /// Run a fresh benchmark and replace the stored metrics.
    ///
    /// Returns [`EvaluationError::AlreadyRunning`] without a request while
    /// another run is in flight. On failure the previous metrics are kept
    /// and a transient notice is recorded.
    pub async fn run_benchmark(&self) -> Result<EvaluationMetrics, EvaluationError> {
        {
            let mut state = self.state.lock().await;
            if state.running {
                tracing::debug!("Benchmark already running, ignoring trigger");
                return Err(EvaluationError::AlreadyRunning);
            }
            state.running = true;
            state.notice = None;
        }

        tracing::info!("Starting benchmark run");

        let outcome = match self.service.run_benchmark().await {
            Ok(metrics) => metrics
                .validate()
                .map(|()| metrics)
                .map_err(EvaluationError::Malformed),
            Err(e) => Err(EvaluationError::Benchmark(e)),
        };

        let mut state = self.state.lock().await;
        state.running = false;

        match &outcome {
            Ok(metrics) => {
                tracing::info!(
                    accuracy = metrics.accuracy,
                    precision = metrics.precision,
                    recall = metrics.recall,
                    f1_score = metrics.f1_score,
                    "Benchmark run completed",
                );
                state.metrics = Some(metrics.clone());
                state.revision += 1;
            }
            Err(e) => {
                tracing::error!(error = %e, "Benchmark run failed");
                state.notice = Some(EVALUATION_FAILED_NOTICE.to_string());
            }
        }

        outcome
    }

    /// Clear the transient failure notice.
    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    pub async fn snapshot(&self) -> EvaluationSnapshot {
        let state = self.state.lock().await;
        EvaluationSnapshot {
            metrics: state.metrics.clone(),
            running: state.running,
            notice: state.notice.clone(),
        }
    }
}
