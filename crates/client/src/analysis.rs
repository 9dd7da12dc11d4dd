//! Analysis session: one media/claim draft, its verdict, and feedback.
//!
//! [`AnalysisSession`] owns the request lifecycle
//! `Idle -> Submitting -> {Succeeded, Failed}`. A succeeded session also
//! tracks whether feedback was sent for the analyzed file.
//!
//! Every transition into an in-flight state is written under the state
//! lock before the network call starts, and the lock is never held across
//! that call. Selecting new media or re-submitting bumps a generation
//! counter so a response for a superseded request is returned to its
//! caller but never stored. The outstanding `/analyze` request is tracked
//! apart from the displayed phase, so selecting new media mid-flight does
//! not open the way for a second concurrent request.

use std::sync::Arc;

use shieldai_core::analysis::{AnalysisRequest, AnalysisResult};
use shieldai_core::error::CoreError;
use shieldai_core::feedback::{FeedbackKind, FeedbackRecord};
use shieldai_core::media::MediaFile;
use shieldai_core::verdict::{DerivedVerdictView, VerdictDeriver};
use tokio::sync::Mutex;

use crate::api::ApiError;
use crate::service::ForensicService;

/// Message shown for every transport or payload failure.
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "Analysis failed. Confirm the analysis service is reachable.";

/// Message shown when the service rejects or never receives feedback.
pub const FEEDBACK_FAILED_MESSAGE: &str =
    "Feedback could not be logged. Confirm the analysis service is reachable.";

/// Whether the user already reported the current verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackState {
    NotSent,
    Sent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPhase {
    Idle,
    Submitting,
    Succeeded {
        result: AnalysisResult,
        feedback: FeedbackState,
    },
    Failed {
        message: String,
    },
}

/// What happened to a feedback request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// The service accepted the feedback.
    Sent,
    /// Feedback for this verdict was already sent; no request was made.
    AlreadySent,
    /// No verdict exists for the current media, or a feedback request is
    /// already in flight; no request was made.
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(CoreError),

    #[error("An analysis request is already in flight")]
    InFlight,

    #[error("Analysis service call failed: {0}")]
    Transport(#[from] ApiError),

    #[error(transparent)]
    Malformed(CoreError),

    #[error("Feedback submission failed: {0}")]
    Feedback(ApiError),
}

impl AnalysisError {
    /// Text safe to show the user. Transport details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(e) => e.to_string(),
            AnalysisError::InFlight => "Analysis already in progress.".to_string(),
            AnalysisError::Transport(_) | AnalysisError::Malformed(_) => {
                ANALYSIS_FAILED_MESSAGE.to_string()
            }
            AnalysisError::Feedback(_) => FEEDBACK_FAILED_MESSAGE.to_string(),
        }
    }
}

/// Read-only copy of the session state for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSnapshot {
    pub phase: AnalysisPhase,
    pub file_name: Option<String>,
    pub claim: String,
    /// Display data derived from the current result, if any.
    pub verdict: Option<DerivedVerdictView>,
    /// An `/analyze` request is outstanding, possibly for media that has
    /// since been replaced.
    pub request_in_flight: bool,
}

impl AnalysisSnapshot {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            AnalysisPhase::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            AnalysisPhase::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn feedback(&self) -> Option<FeedbackState> {
        match &self.phase {
            AnalysisPhase::Succeeded { feedback, .. } => Some(*feedback),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.request_in_flight
    }
}

struct AnalysisState {
    media: Option<MediaFile>,
    claim: String,
    phase: AnalysisPhase,
    submit_in_flight: bool,
    feedback_in_flight: bool,
    generation: u64,
}

pub struct AnalysisSession {
    service: Arc<dyn ForensicService>,
    deriver: VerdictDeriver,
    state: Mutex<AnalysisState>,
}

impl AnalysisSession {
    pub fn new(service: Arc<dyn ForensicService>) -> Self {
        Self::with_deriver(service, VerdictDeriver::default())
    }

    pub fn with_deriver(service: Arc<dyn ForensicService>, deriver: VerdictDeriver) -> Self {
        Self {
            service,
            deriver,
            state: Mutex::new(AnalysisState {
                media: None,
                claim: String::new(),
                phase: AnalysisPhase::Idle,
                submit_in_flight: false,
                feedback_in_flight: false,
                generation: 0,
            }),
        }
    }

    /// Select new media, discarding any verdict, error, and feedback state
    /// tied to the previous file. An outstanding request keeps blocking
    /// new submissions until it resolves.
    pub async fn select_media(&self, media: MediaFile) {
        let mut state = self.state.lock().await;
        tracing::debug!(file_name = %media.file_name(), "Media selected");
        state.media = Some(media);
        state.phase = AnalysisPhase::Idle;
        state.feedback_in_flight = false;
        state.generation += 1;
    }

    pub async fn set_claim(&self, claim: impl Into<String>) {
        self.state.lock().await.claim = claim.into();
    }

    /// Submit the current media and claim for analysis.
    ///
    /// Missing inputs fail with [`AnalysisError::Validation`] before any
    /// request is made, and a second call while one is in flight fails with
    /// [`AnalysisError::InFlight`]. Otherwise exactly one request is sent and
    /// its outcome decides between `Succeeded` and `Failed`.
    pub async fn submit(&self) -> Result<AnalysisResult, AnalysisError> {
        let (request, generation) = {
            let mut state = self.state.lock().await;
            if state.submit_in_flight {
                return Err(AnalysisError::InFlight);
            }

            let request = AnalysisRequest::new(state.media.as_ref(), &state.claim)
                .map_err(AnalysisError::Validation)?;

            state.phase = AnalysisPhase::Submitting;
            state.submit_in_flight = true;
            state.feedback_in_flight = false;
            state.generation += 1;
            (request, state.generation)
        };

        tracing::info!(
            file_name = %request.media().file_name(),
            mime_type = %request.media().mime_type(),
            size = request.media().bytes().len(),
            "Submitting media for analysis",
        );

        let outcome = match self.service.analyze(&request).await {
            Ok(result) => result.validate().map(|()| result).map_err(AnalysisError::Malformed),
            Err(e) => Err(AnalysisError::Transport(e)),
        };

        let mut state = self.state.lock().await;
        state.submit_in_flight = false;
        if state.generation != generation {
            tracing::warn!(
                file_name = %request.media().file_name(),
                "Media changed while analysis was in flight, discarding response",
            );
            return outcome;
        }

        match &outcome {
            Ok(result) => {
                tracing::info!(
                    file_name = %request.media().file_name(),
                    is_misinfo = result.is_misinfo,
                    ai_prob = result.technical_stats.ai_prob,
                    consistency = result.technical_stats.consistency,
                    "Analysis completed",
                );
                state.phase = AnalysisPhase::Succeeded {
                    result: result.clone(),
                    feedback: FeedbackState::NotSent,
                };
            }
            Err(e) => {
                tracing::error!(
                    file_name = %request.media().file_name(),
                    error = %e,
                    "Analysis request failed",
                );
                state.phase = AnalysisPhase::Failed {
                    message: ANALYSIS_FAILED_MESSAGE.to_string(),
                };
            }
        }

        outcome
    }

    /// Select media, set the claim, and submit in one step.
    pub async fn analyze(
        &self,
        media: MediaFile,
        claim: impl Into<String>,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.select_media(media).await;
        self.set_claim(claim).await;
        self.submit().await
    }

    /// Report that the current verdict is wrong.
    ///
    /// Makes no request unless a verdict exists for the current media and
    /// feedback has not been sent for it yet. A failed request leaves the
    /// feedback state `NotSent` so the caller may retry.
    pub async fn submit_feedback(
        &self,
        kind: FeedbackKind,
        notes: Option<String>,
    ) -> Result<FeedbackOutcome, AnalysisError> {
        let (record, generation) = {
            let mut state = self.state.lock().await;
            let file_name = match (&state.phase, &state.media) {
                (
                    AnalysisPhase::Succeeded {
                        feedback: FeedbackState::Sent,
                        ..
                    },
                    _,
                ) => return Ok(FeedbackOutcome::AlreadySent),
                (AnalysisPhase::Succeeded { .. }, Some(media)) if !state.feedback_in_flight => {
                    media.file_name().to_string()
                }
                _ => {
                    tracing::debug!("No verdict for current media, skipping feedback");
                    return Ok(FeedbackOutcome::Skipped);
                }
            };

            state.feedback_in_flight = true;
            let record = FeedbackRecord {
                file_name,
                feedback_type: kind,
                notes,
            };
            (record, state.generation)
        };

        let outcome = self.service.submit_feedback(&record).await;

        let mut state = self.state.lock().await;
        let current = state.generation == generation;
        if current {
            state.feedback_in_flight = false;
        }

        match outcome {
            Ok(()) => {
                tracing::info!(
                    file_name = %record.file_name,
                    feedback_type = %record.feedback_type,
                    "Feedback logged",
                );
                if current {
                    if let AnalysisPhase::Succeeded { feedback, .. } = &mut state.phase {
                        *feedback = FeedbackState::Sent;
                    }
                }
                Ok(FeedbackOutcome::Sent)
            }
            Err(e) => {
                tracing::warn!(
                    file_name = %record.file_name,
                    feedback_type = %record.feedback_type,
                    error = %e,
                    "Feedback submission failed",
                );
                Err(AnalysisError::Feedback(e))
            }
        }
    }

    pub async fn snapshot(&self) -> AnalysisSnapshot {
        let state = self.state.lock().await;
        let verdict = match &state.phase {
            AnalysisPhase::Succeeded { result, .. } => Some(self.deriver.derive(result)),
            _ => None,
        };

        AnalysisSnapshot {
            phase: state.phase.clone(),
            file_name: state.media.as_ref().map(|m| m.file_name().to_string()),
            claim: state.claim.clone(),
            verdict,
            request_in_flight: state.submit_in_flight,
        }
    }
}
