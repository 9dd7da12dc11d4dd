//! Plain-text rendering of session snapshots.

use std::fmt::Write;

use shieldai_client::analysis::{AnalysisSnapshot, FeedbackState};
use shieldai_client::api::ServiceHealth;
use shieldai_client::evaluation::EvaluationSnapshot;
use shieldai_core::verdict::format_percent;

/// Pipeline stages listed on the verdict card.
const PIPELINE_STAGES: [&str; 4] = ["Ingestion", "Purification", "Sensor Analysis", "Logic Fusion"];

pub fn verdict_card(snapshot: &AnalysisSnapshot) -> String {
    let mut out = String::new();

    if let Some(message) = snapshot.error_message() {
        let _ = writeln!(out, "! {message}");
        return out;
    }

    let (Some(result), Some(view)) = (snapshot.result(), snapshot.verdict) else {
        out.push_str("Ready to analyze. Upload media to begin.\n");
        return out;
    };

    let _ = writeln!(out, "{}", view.theme.title());
    let _ = writeln!(
        out,
        "Confidence Score: {}",
        format_percent(view.confidence_score_percent)
    );
    if let Some(file_name) = &snapshot.file_name {
        let _ = writeln!(out, "Media: {file_name}");
    }
    if let Some(url) = &result.media_url {
        let _ = writeln!(out, "Served at: {url}");
    }

    out.push_str("\nForensic Signal Radar\n");
    for (axis, value) in view.radar_signals.iter() {
        let _ = writeln!(out, "  {:<20} {}", axis.label(), format_percent(value));
    }

    out.push_str("\nAnalysis Pipeline\n");
    for (i, stage) in PIPELINE_STAGES.iter().enumerate() {
        if i == PIPELINE_STAGES.len() - 1 {
            let _ = writeln!(out, "  * {stage} COMPLETED");
        } else {
            let _ = writeln!(out, "  * {stage}");
        }
    }

    out.push_str("\nEvidence Report\n");
    for paragraph in result.paragraphs() {
        let _ = writeln!(out, "  {paragraph}");
    }

    if snapshot.feedback() == Some(FeedbackState::Sent) {
        out.push_str("\nFeedback Logged. Thank you!\n");
    }

    out
}

pub fn evaluation(snapshot: &EvaluationSnapshot) -> String {
    let mut out = String::new();

    if let Some(notice) = &snapshot.notice {
        let _ = writeln!(out, "! {notice}");
    }

    let Some(metrics) = &snapshot.metrics else {
        out.push_str("No metrics found. Run an evaluation to benchmark the model.\n");
        return out;
    };

    out.push_str("Model Performance\n");
    for reading in metrics.kpis() {
        let _ = writeln!(
            out,
            "  {:<16} {}",
            reading.label,
            format_percent(reading.value * 100.0)
        );
    }

    out.push_str("\nRobustness & Explainability\n");
    for reading in metrics.quality() {
        let _ = writeln!(
            out,
            "  {:<16} {}",
            reading.label,
            format_percent(reading.value * 100.0)
        );
    }

    out
}

pub fn health(health: &ServiceHealth) -> String {
    format!("{} ({})\n", health.status, health.model)
}
