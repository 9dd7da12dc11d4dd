//! Analysis request and the verdict payload returned by `POST /analyze`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::media::MediaFile;
use crate::validation::{into_malformed, validate_unit_range};

/// Reason reported when media or claim is missing at submit time.
pub const MISSING_INPUT_MESSAGE: &str = "missing media/claim";

/// A validated (media, claim) pair ready to be sent to the analysis
/// service.
///
/// The only constructor is [`AnalysisRequest::new`], so an instance always
/// carries non-empty media and a non-blank claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    media: MediaFile,
    claim: String,
}

impl AnalysisRequest {
    /// Validate the draft inputs and build a request.
    ///
    /// Fails with [`CoreError::Validation`] when the media is absent or
    /// empty, or when the claim is blank.
    pub fn new(media: Option<&MediaFile>, claim: &str) -> Result<Self, CoreError> {
        let media = media
            .filter(|m| !m.is_empty())
            .ok_or_else(|| CoreError::Validation(MISSING_INPUT_MESSAGE.to_string()))?;

        if claim.trim().is_empty() {
            return Err(CoreError::Validation(MISSING_INPUT_MESSAGE.to_string()));
        }

        Ok(Self {
            media: media.clone(),
            claim: claim.to_string(),
        })
    }

    pub fn media(&self) -> &MediaFile {
        &self.media
    }

    pub fn claim(&self) -> &str {
        &self.claim
    }
}

/// Which signal drove the service's verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictType {
    /// AI-generation probability exceeded the service threshold.
    Synthetic,
    /// Claim and media are semantically out of context.
    #[serde(rename = "OOC")]
    OutOfContext,
    Clear,
    #[serde(other)]
    Unknown,
}

/// Raw scores backing a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalStats {
    /// Probability the media is synthetically generated.
    pub ai_prob: f64,
    /// Semantic alignment between claim and media.
    pub consistency: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict_type: Option<VerdictType>,
}

/// Verdict payload returned by the analysis service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub is_misinfo: bool,
    pub technical_stats: TechnicalStats,
    /// Newline-delimited evidence report.
    pub explanation: String,
    /// Static URL of the uploaded file on the service, when it serves one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
}

impl AnalysisResult {
    /// Check that both scores are fractions in `[0, 1]`.
    ///
    /// A payload that fails this check is a [`CoreError::MalformedResponse`].
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_unit_range(self.technical_stats.ai_prob, "technical_stats.ai_prob")
            .map_err(into_malformed)?;
        validate_unit_range(self.technical_stats.consistency, "technical_stats.consistency")
            .map_err(into_malformed)?;
        Ok(())
    }

    /// Evidence report paragraphs, one per line of `explanation`.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.explanation.lines()
    }
}
