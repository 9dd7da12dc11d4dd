//! `shieldai` -- terminal client for the ShieldAI forensic service.
//!
//! Submits media plus a claim for analysis, reports incorrect verdicts,
//! and shows or re-runs the model benchmark.
//!
//! # Environment variables
//!
//! | Variable                          | Required | Default                 | Description                     |
//! |-----------------------------------|----------|-------------------------|---------------------------------|
//! | `SHIELDAI_API_URL`                | no       | `http://localhost:8000` | Analysis service base URL       |
//! | `SHIELDAI_REQUEST_TIMEOUT_SECS`   | no       | `120`                   | Per-request timeout             |
//! | `SHIELDAI_BENCHMARK_TIMEOUT_SECS` | no       | `1800`                  | Timeout for a benchmark run     |
//! | `SHIELDAI_LOG_FORMAT`             | no       | `text`                  | `json` for structured log lines |

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shieldai_client::analysis::{AnalysisSession, FeedbackOutcome};
use shieldai_client::api::ShieldApi;
use shieldai_client::config::{ClientConfig, ConfigOverrides};
use shieldai_client::evaluation::EvaluationSession;
use shieldai_client::media::read_media_file;
use shieldai_client::view::{View, ViewRouter};
use shieldai_core::feedback::FeedbackKind;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shieldai", version, about = "ShieldAI forensic analysis client")]
struct Cli {
    /// Service base URL (overrides `SHIELDAI_API_URL`).
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds (overrides `SHIELDAI_REQUEST_TIMEOUT_SECS`).
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Analyze a media file against a claim.
    Analyze {
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        claim: String,
        /// Flag the verdict as wrong: `false_positive` or `false_negative`.
        #[arg(long)]
        feedback: Option<FeedbackKind>,
        /// Free-text notes sent with the feedback.
        #[arg(long, requires = "feedback")]
        notes: Option<String>,
    },
    /// Show cached benchmark metrics, optionally re-running the benchmark.
    Evaluate {
        #[arg(long)]
        rerun: bool,
    },
    /// Check the service is online.
    Health,
}

impl Cmd {
    fn view(&self) -> View {
        match self {
            Cmd::Evaluate { .. } => View::Evaluation,
            Cmd::Analyze { .. } | Cmd::Health => View::Analysis,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = ClientConfig::from_env()?.with_overrides(&ConfigOverrides {
        api_url: cli.api_url.clone(),
        request_timeout_secs: cli.timeout_secs,
    })?;

    let mut router = ViewRouter::new();
    router.select(cli.cmd.view());
    tracing::info!(
        api_url = %config.api_url,
        view = %router.current(),
        "Starting shieldai",
    );

    let api = Arc::new(ShieldApi::new(&config).context("Failed to build HTTP client")?);

    match cli.cmd {
        Cmd::Analyze {
            file,
            claim,
            feedback,
            notes,
        } => analyze(api, file, claim, feedback, notes).await,
        Cmd::Evaluate { rerun } => evaluate(api, rerun).await,
        Cmd::Health => {
            let health = api.health().await.context("Service health check failed")?;
            print!("{}", render::health(&health));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shieldai=info,shieldai_client=info".into());

    let json = std::env::var("SHIELDAI_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn analyze(
    api: Arc<ShieldApi>,
    file: PathBuf,
    claim: String,
    feedback: Option<FeedbackKind>,
    notes: Option<String>,
) -> anyhow::Result<()> {
    let media = read_media_file(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let session = AnalysisSession::new(api);
    if let Err(e) = session.analyze(media, claim).await {
        anyhow::bail!(e.user_message());
    }

    if let Some(kind) = feedback {
        match session.submit_feedback(kind, notes).await {
            Ok(FeedbackOutcome::Sent) => {}
            Ok(outcome) => tracing::warn!(?outcome, "Feedback not sent"),
            Err(e) => eprintln!("{}", e.user_message()),
        }
    }

    print!("{}", render::verdict_card(&session.snapshot().await));
    Ok(())
}

async fn evaluate(api: Arc<ShieldApi>, rerun: bool) -> anyhow::Result<()> {
    let session = EvaluationSession::new(api);

    // A failed cache load is already logged; the view falls back to empty.
    let _ = session.load_cached().await;

    if rerun {
        println!("Benchmarking...");
        // Failure is reported through the snapshot notice.
        let _ = session.run_benchmark().await;
    }

    print!("{}", render::evaluation(&session.snapshot().await));
    Ok(())
}
