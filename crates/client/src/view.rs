//! Top-level switch between the analysis and evaluation views.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Analysis,
    Evaluation,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Analysis => "analysis",
            View::Evaluation => "evaluation",
        }
    }

    /// Tab label.
    pub fn label(&self) -> &'static str {
        match self {
            View::Analysis => "Live Analysis",
            View::Evaluation => "Model Evaluation",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown view '{0}', expected 'analysis' or 'evaluation'")]
pub struct UnknownView(String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "analysis" => Ok(View::Analysis),
            "evaluation" => Ok(View::Evaluation),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}

/// Holds the active view. Starts on [`View::Analysis`].
#[derive(Debug, Default)]
pub struct ViewRouter {
    current: View,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Switch views. Returns the previous view.
    pub fn select(&mut self, view: View) -> View {
        let previous = self.current;
        if previous != view {
            tracing::debug!(from = %previous, to = %view, "Switching view");
        }
        self.current = view;
        previous
    }
}
