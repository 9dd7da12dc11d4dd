//! Client-side orchestration for the ShieldAI forensic service.
//!
//! Provides the HTTP API wrapper, the collaborator traits it implements,
//! and the two stateful sessions that drive it: [`analysis::AnalysisSession`]
//! for verdict requests and feedback, and [`evaluation::EvaluationSession`]
//! for cached and fresh benchmark metrics.

pub mod analysis;
pub mod api;
pub mod config;
pub mod evaluation;
pub mod media;
pub mod service;
pub mod view;
