//! Score range checks.
//!
//! Forensic scores and benchmark metrics are both fractions in `[0.0, 1.0]`.
//! A value outside that range coming back from the service means the
//! response cannot be trusted.

use crate::error::CoreError;

/// Check that a score lies within `[0.0, 1.0]`. `NaN` never does.
pub fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{name} must be a fraction in [0, 1], got {value}"
        )))
    }
}

/// Re-tag a validation failure on service-provided data as a malformed
/// response.
pub(crate) fn into_malformed(err: CoreError) -> CoreError {
    match err {
        CoreError::Validation(msg) => CoreError::MalformedResponse(msg),
        other => other,
    }
}
