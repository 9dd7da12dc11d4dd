//! Client configuration.
//!
//! Settings come from `SHIELDAI_*` environment variables, optionally
//! overridden by command-line flags. Both sources pass the same checks.

use std::time::Duration;

/// Default analysis service base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Default timeout for analysis, feedback, cache, and health calls.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default timeout for a full benchmark run.
pub const DEFAULT_BENCHMARK_TIMEOUT_SECS: u64 = 1800;

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a service running locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the analysis and evaluation service.
    pub api_url: String,
    /// Timeout applied to every request except benchmark runs.
    pub request_timeout: Duration,
    /// Timeout applied to `POST /evaluate`.
    pub benchmark_timeout: Duration,
}

/// An environment variable holds a value that cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Values supplied on the command line. Each one, when present, replaces the
/// value read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            benchmark_timeout: Duration::from_secs(DEFAULT_BENCHMARK_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                           | Default                 |
    /// |-----------------------------------|-------------------------|
    /// | `SHIELDAI_API_URL`                | `http://localhost:8000` |
    /// | `SHIELDAI_REQUEST_TIMEOUT_SECS`   | `120`                   |
    /// | `SHIELDAI_BENCHMARK_TIMEOUT_SECS` | `1800`                  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = match lookup("SHIELDAI_API_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => parse_api_url("SHIELDAI_API_URL", &url)?,
            None => DEFAULT_API_URL.to_string(),
        };

        let request_timeout = parse_secs(
            &lookup,
            "SHIELDAI_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let benchmark_timeout = parse_secs(
            &lookup,
            "SHIELDAI_BENCHMARK_TIMEOUT_SECS",
            DEFAULT_BENCHMARK_TIMEOUT_SECS,
        )?;

        Ok(Self {
            api_url,
            request_timeout,
            benchmark_timeout,
        })
    }

    /// Apply command-line overrides, validating them like their
    /// environment counterparts.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        if let Some(url) = &overrides.api_url {
            self.api_url = parse_api_url("--api-url", url)?;
        }
        if let Some(secs) = overrides.request_timeout_secs {
            self.request_timeout = timeout_from_secs("--timeout-secs", secs)?;
        }
        Ok(self)
    }
}

fn parse_api_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            reason: "must start with http:// or https://".to_string(),
        });
    }
    Ok(url.to_string())
}

fn timeout_from_secs(var: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::Invalid {
            var,
            value: secs.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

fn parse_secs<F>(lookup: &F, var: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) => timeout_from_secs(var, secs),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: e.to_string(),
        }),
    }
}
