//! Collaborator traits the sessions talk to.
//!
//! [`ShieldApi`] implements both against the real HTTP service; tests swap
//! in in-process fakes.

use async_trait::async_trait;
use shieldai_core::analysis::{AnalysisRequest, AnalysisResult};
use shieldai_core::evaluation::EvaluationMetrics;
use shieldai_core::feedback::FeedbackRecord;

use crate::api::{ApiError, ShieldApi};

/// The forensic-analysis service.
#[async_trait]
pub trait ForensicService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError>;

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ApiError>;
}

/// The benchmark/evaluation service.
#[async_trait]
pub trait EvaluationService: Send + Sync {
    /// Metrics of the last recorded run, or `None` before the first run.
    async fn cached_metrics(&self) -> Result<Option<EvaluationMetrics>, ApiError>;

    async fn run_benchmark(&self) -> Result<EvaluationMetrics, ApiError>;
}

#[async_trait]
impl ForensicService for ShieldApi {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        ShieldApi::analyze(self, request).await
    }

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ApiError> {
        ShieldApi::submit_feedback(self, record).await
    }
}

#[async_trait]
impl EvaluationService for ShieldApi {
    async fn cached_metrics(&self) -> Result<Option<EvaluationMetrics>, ApiError> {
        ShieldApi::cached_metrics(self).await
    }

    async fn run_benchmark(&self) -> Result<EvaluationMetrics, ApiError> {
        ShieldApi::run_benchmark(self).await
    }
}
