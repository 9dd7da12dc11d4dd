//! REST API client for the ShieldAI analysis and evaluation endpoints.
//!
//! Wraps the service HTTP API (analysis upload, feedback, cached and fresh
//! benchmark metrics, health) using [`reqwest`] multipart and JSON bodies.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use shieldai_core::analysis::{AnalysisRequest, AnalysisResult};
use shieldai_core::evaluation::{BenchmarkResponse, EvaluationMetrics};
use shieldai_core::feedback::FeedbackRecord;

use crate::config::ClientConfig;

/// HTTP client for a single ShieldAI service instance.
#[derive(Debug, Clone)]
pub struct ShieldApi {
    client: reqwest::Client,
    api_url: String,
    benchmark_timeout: Duration,
}

/// Response returned by the service root `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceHealth {
    pub status: String,
    /// Human-readable model identifier.
    pub model: String,
}

/// Errors from the ShieldAI REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("ShieldAI API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body did not match the expected JSON shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service completed the benchmark call but reported a failure.
    #[error("Benchmark failed: {0}")]
    Benchmark(String),
}

impl ApiError {
    /// Whether the request was abandoned because it exceeded its timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Request(e) if e.is_timeout())
    }
}

impl ShieldApi {
    /// Create a new API client from configuration.
    ///
    /// `config.request_timeout` becomes the client-wide default;
    /// benchmark runs use `config.benchmark_timeout` instead.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self::with_client(
            client,
            config.api_url.clone(),
            config.benchmark_timeout,
        ))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: String, benchmark_timeout: Duration) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            benchmark_timeout,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Check the service is online.
    ///
    /// Sends a `GET /` request.
    pub async fn health(&self) -> Result<ServiceHealth, ApiError> {
        let response = self.client.get(format!("{}/", self.api_url)).send().await?;

        Self::parse_response(response).await
    }

    /// Upload media and claim for forensic analysis.
    ///
    /// Sends a multipart `POST /analyze` with a `file` part carrying the
    /// media bytes, file name, and MIME type, and a `claim` text part.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        let media = request.media();
        let file = Part::bytes(media.bytes().to_vec())
            .file_name(media.file_name().to_string())
            .mime_str(media.mime_type())?;

        let form = Form::new()
            .part("file", file)
            .text("claim", request.claim().to_string());

        let response = self
            .client
            .post(format!("{}/analyze", self.api_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Report an incorrect verdict.
    ///
    /// Sends a multipart `POST /feedback` with `file_name`,
    /// `feedback_type`, and `notes` when present. The response body is
    /// not inspected.
    pub async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ApiError> {
        let mut form = Form::new()
            .text("file_name", record.file_name.clone())
            .text("feedback_type", record.feedback_type.as_str());

        if let Some(notes) = &record.notes {
            form = form.text("notes", notes.clone());
        }

        let response = self
            .client
            .post(format!("{}/feedback", self.api_url))
            .multipart(form)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Fetch the metrics saved by the last benchmark run.
    ///
    /// Sends a `GET /evaluate/cache` request. An empty body or JSON
    /// `null` means no run has been recorded yet.
    pub async fn cached_metrics(&self) -> Result<Option<EvaluationMetrics>, ApiError> {
        let response = self
            .client
            .get(format!("{}/evaluate/cache", self.api_url))
            .send()
            .await?;

        let body = Self::ensure_success(response).await?.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(serde_json::from_str::<Option<EvaluationMetrics>>(&body)?)
    }

    /// Trigger a fresh benchmark run and wait for its metrics.
    ///
    /// Sends a `POST /evaluate` request with the benchmark timeout.
    pub async fn run_benchmark(&self) -> Result<EvaluationMetrics, ApiError> {
        let response = self
            .client
            .post(format!("{}/evaluate", self.api_url))
            .timeout(self.benchmark_timeout)
            .send()
            .await?;

        match Self::parse_response::<BenchmarkResponse>(response).await? {
            BenchmarkResponse::Completed(metrics) => Ok(metrics),
            BenchmarkResponse::Failed { error } => Err(ApiError::Benchmark(error)),
        }
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// The body is read as text first so a shape mismatch surfaces as
    /// [`ApiError::Decode`] rather than a transport error.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let body = Self::ensure_success(response).await?.text().await?;
        Ok(serde_json::from_str::<T>(&body)?)
    }

    /// Assert the response has a success status code, discarding the body.
    async fn check_status(response: reqwest::Response) -> Result<(), ApiError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
