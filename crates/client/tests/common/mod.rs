//! Shared fakes for session integration tests.
//!
//! Each fake counts calls and can hold a call in flight until the test
//! releases it, so tests can observe in-flight state.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use shieldai_client::api::ApiError;
use shieldai_client::service::{EvaluationService, ForensicService};
use shieldai_core::analysis::{AnalysisRequest, AnalysisResult, TechnicalStats};
use shieldai_core::evaluation::EvaluationMetrics;
use shieldai_core::feedback::FeedbackRecord;
use shieldai_core::media::MediaFile;
use tokio::sync::Notify;

/// Canned reply for a fake call.
#[derive(Debug, Clone)]
pub enum Reply<T> {
    Ok(T),
    Status(u16),
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, ApiError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status) => Err(ApiError::Status {
                status: *status,
                body: "stub failure".to_string(),
            }),
        }
    }
}

/// Holds a call until released. `entered` fires when the call starts.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

impl Gate {
    async fn pass(&self) {
        self.entered.notify_one();
        self.release.notified().await;
    }
}

pub fn media(name: &str) -> MediaFile {
    MediaFile::from_bytes(name, vec![0xFF, 0xD8, 0xFF, 0xE0])
}

pub fn verdict(is_misinfo: bool, ai_prob: f64, consistency: f64) -> AnalysisResult {
    AnalysisResult {
        is_misinfo,
        technical_stats: TechnicalStats {
            ai_prob,
            consistency,
            verdict_type: None,
        },
        explanation: "Verdict line\nEvidence line".to_string(),
        media_url: None,
    }
}

pub fn metrics(accuracy: f64) -> EvaluationMetrics {
    EvaluationMetrics {
        accuracy,
        precision: 0.9,
        recall: 0.8,
        f1_score: 0.85,
        robustness: 1.0,
        explanation_quality: 0.7,
    }
}

pub struct FakeForensic {
    pub analyze_reply: Mutex<Reply<AnalysisResult>>,
    pub feedback_reply: Mutex<Reply<()>>,
    pub analyze_gate: Option<Gate>,
    pub feedback_gate: Option<Gate>,
    pub analyze_calls: AtomicUsize,
    pub feedback_calls: AtomicUsize,
    pub requests: Mutex<Vec<AnalysisRequest>>,
    pub feedback: Mutex<Vec<FeedbackRecord>>,
}

impl FakeForensic {
    pub fn replying(result: AnalysisResult) -> Self {
        Self {
            analyze_reply: Mutex::new(Reply::Ok(result)),
            feedback_reply: Mutex::new(Reply::Ok(())),
            analyze_gate: None,
            feedback_gate: None,
            analyze_calls: AtomicUsize::new(0),
            feedback_calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            feedback: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        let fake = Self::replying(verdict(false, 0.0, 0.0));
        *fake.analyze_reply.lock().unwrap() = Reply::Status(status);
        fake
    }

    pub fn gated(mut self) -> Self {
        self.analyze_gate = Some(Gate::default());
        self
    }

    pub fn feedback_gated(mut self) -> Self {
        self.feedback_gate = Some(Gate::default());
        self
    }

    pub fn set_analyze_reply(&self, reply: Reply<AnalysisResult>) {
        *self.analyze_reply.lock().unwrap() = reply;
    }

    pub fn set_feedback_reply(&self, reply: Reply<()>) {
        *self.feedback_reply.lock().unwrap() = reply;
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn feedback_calls(&self) -> usize {
        self.feedback_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ForensicService for FakeForensic {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ApiError> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.analyze_gate {
            gate.pass().await;
        }
        let reply = self.analyze_reply.lock().unwrap().clone();
        reply.produce()
    }

    async fn submit_feedback(&self, record: &FeedbackRecord) -> Result<(), ApiError> {
        self.feedback_calls.fetch_add(1, Ordering::SeqCst);
        self.feedback.lock().unwrap().push(record.clone());
        if let Some(gate) = &self.feedback_gate {
            gate.pass().await;
        }
        let reply = self.feedback_reply.lock().unwrap().clone();
        reply.produce()
    }
}

pub struct FakeEvaluation {
    pub cache_reply: Mutex<Reply<Option<EvaluationMetrics>>>,
    pub benchmark_reply: Mutex<Reply<EvaluationMetrics>>,
    pub benchmark_gate: Option<Gate>,
    pub cache_gate: Option<Gate>,
    pub cache_calls: AtomicUsize,
    pub benchmark_calls: AtomicUsize,
}

impl FakeEvaluation {
    pub fn new(cached: Option<EvaluationMetrics>, fresh: Reply<EvaluationMetrics>) -> Self {
        Self {
            cache_reply: Mutex::new(Reply::Ok(cached)),
            benchmark_reply: Mutex::new(fresh),
            benchmark_gate: None,
            cache_gate: None,
            cache_calls: AtomicUsize::new(0),
            benchmark_calls: AtomicUsize::new(0),
        }
    }

    pub fn gated(mut self) -> Self {
        self.benchmark_gate = Some(Gate::default());
        self
    }

    pub fn cache_gated(mut self) -> Self {
        self.cache_gate = Some(Gate::default());
        self
    }

    pub fn set_benchmark_reply(&self, reply: Reply<EvaluationMetrics>) {
        *self.benchmark_reply.lock().unwrap() = reply;
    }

    pub fn set_cache_reply(&self, reply: Reply<Option<EvaluationMetrics>>) {
        *self.cache_reply.lock().unwrap() = reply;
    }

    pub fn benchmark_calls(&self) -> usize {
        self.benchmark_calls.load(Ordering::SeqCst)
    }

    pub fn cache_calls(&self) -> usize {
        self.cache_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvaluationService for FakeEvaluation {
    async fn cached_metrics(&self) -> Result<Option<EvaluationMetrics>, ApiError> {
        self.cache_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.cache_gate {
            gate.pass().await;
        }
        let reply = self.cache_reply.lock().unwrap().clone();
        reply.produce()
    }

    async fn run_benchmark(&self) -> Result<EvaluationMetrics, ApiError> {
        self.benchmark_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.benchmark_gate {
            gate.pass().await;
        }
        let reply = self.benchmark_reply.lock().unwrap().clone();
        reply.produce()
    }
}
