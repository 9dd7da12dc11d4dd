//! Benchmark metrics produced by the evaluation service.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::validation::{into_malformed, validate_unit_range};

/// Aggregate quality metrics from one benchmark run.
///
/// Always replaced as a whole; fields are never merged across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Share of noisy re-runs whose verdict did not flip.
    pub robustness: f64,
    /// Heuristic completeness score of the generated reports.
    pub explanation_quality: f64,
}

/// A labelled metric ready for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricReading {
    pub label: &'static str,
    pub value: f64,
}

impl EvaluationMetrics {
    /// Check every metric is a fraction in `[0, 1]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        for reading in self.kpis().into_iter().chain(self.quality()) {
            validate_unit_range(reading.value, reading.label).map_err(into_malformed)?;
        }
        Ok(())
    }

    /// Headline classification metrics, in display order.
    pub fn kpis(&self) -> [MetricReading; 4] {
        [
            MetricReading { label: "Accuracy", value: self.accuracy },
            MetricReading { label: "Precision", value: self.precision },
            MetricReading { label: "Recall", value: self.recall },
            MetricReading { label: "F1 Score", value: self.f1_score },
        ]
    }

    /// Robustness and explainability scores.
    pub fn quality(&self) -> [MetricReading; 2] {
        [
            MetricReading { label: "Stability Score", value: self.robustness },
            MetricReading { label: "Report Quality", value: self.explanation_quality },
        ]
    }
}

/// Body of `POST /evaluate`.
///
/// A run that found no benchmark data answers `{"error": "..."}` with a
/// success status.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BenchmarkResponse {
    Completed(EvaluationMetrics),
    Failed { error: String },
}
