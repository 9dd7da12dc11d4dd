//! User corrections sent to `POST /feedback`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire value for a verdict that flagged authentic media.
pub const FALSE_POSITIVE: &str = "false_positive";

/// Wire value for a verdict that missed misinformation.
pub const FALSE_NEGATIVE: &str = "false_negative";

/// Which way the verdict was wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    FalsePositive,
    FalseNegative,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::FalsePositive => FALSE_POSITIVE,
            FeedbackKind::FalseNegative => FALSE_NEGATIVE,
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FALSE_POSITIVE => Ok(FeedbackKind::FalsePositive),
            FALSE_NEGATIVE => Ok(FeedbackKind::FalseNegative),
            other => Err(CoreError::Validation(format!(
                "feedback type must be '{FALSE_POSITIVE}' or '{FALSE_NEGATIVE}', got '{other}'"
            ))),
        }
    }
}

/// A correction tied to the file that was analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub file_name: String,
    pub feedback_type: FeedbackKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values() {
        assert_eq!(
            "false_positive".parse::<FeedbackKind>().unwrap(),
            FeedbackKind::FalsePositive
        );
        assert_eq!(
            "false_negative".parse::<FeedbackKind>().unwrap(),
            FeedbackKind::FalseNegative
        );
        assert!("wrong".parse::<FeedbackKind>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&FeedbackKind::FalseNegative).unwrap();
        assert_eq!(json, r#""false_negative""#);
    }

    #[test]
    fn display_matches_wire_value() {
        assert_eq!(FeedbackKind::FalsePositive.to_string(), FALSE_POSITIVE);
    }
}
