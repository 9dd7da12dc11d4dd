//! Verdict derivation: turns an [`AnalysisResult`] into display-ready data.
//!
//! [`VerdictDeriver::derive`] is a pure function of its input and the
//! configured [`FactualGroundingPolicy`]. It picks the risk theme, the
//! confidence score that supports the rendered verdict, and the three-axis
//! radar vector fed to the confidence chart.

use std::fmt;

use serde::Serialize;

use crate::analysis::AnalysisResult;

/// Factual-grounding radar value shown for a misinformation verdict.
pub const FACTUAL_GROUNDING_MISINFO: f64 = 20.0;

/// Factual-grounding radar value shown for an authentic verdict.
pub const FACTUAL_GROUNDING_AUTHENTIC: f64 = 90.0;

/// Visual risk theme of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VerdictTheme {
    HighRisk,
    LikelyAuthentic,
}

impl VerdictTheme {
    pub fn from_verdict(is_misinfo: bool) -> Self {
        if is_misinfo {
            VerdictTheme::HighRisk
        } else {
            VerdictTheme::LikelyAuthentic
        }
    }

    /// Headline shown on the verdict card.
    pub fn title(&self) -> &'static str {
        match self {
            VerdictTheme::HighRisk => "HIGH RISK DETECTED",
            VerdictTheme::LikelyAuthentic => "LIKELY AUTHENTIC",
        }
    }
}

impl fmt::Display for VerdictTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Radar chart axes, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RadarAxis {
    DigitalDna,
    SemanticAlignment,
    FactualGrounding,
}

impl RadarAxis {
    pub const ALL: [RadarAxis; 3] = [
        RadarAxis::DigitalDna,
        RadarAxis::SemanticAlignment,
        RadarAxis::FactualGrounding,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RadarAxis::DigitalDna => "Digital DNA",
            RadarAxis::SemanticAlignment => "Semantic Alignment",
            RadarAxis::FactualGrounding => "Factual Grounding",
        }
    }

    fn index(&self) -> usize {
        match self {
            RadarAxis::DigitalDna => 0,
            RadarAxis::SemanticAlignment => 1,
            RadarAxis::FactualGrounding => 2,
        }
    }
}

/// Radar values on a 0-100 scale, ordered as [`RadarAxis::ALL`].
///
/// The order cannot be changed by consumers; values are read by axis or
/// iterated in axis order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadarSignals([f64; 3]);

impl RadarSignals {
    pub fn values(&self) -> [f64; 3] {
        self.0
    }

    pub fn get(&self, axis: RadarAxis) -> f64 {
        self.0[axis.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (RadarAxis, f64)> + '_ {
        RadarAxis::ALL.into_iter().zip(self.0.iter().copied())
    }
}

/// Source of the factual-grounding radar value.
///
/// The service does not measure factual grounding, so the value is a fixed
/// constant keyed on the verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactualGroundingPolicy {
    pub when_misinfo: f64,
    pub when_authentic: f64,
}

impl Default for FactualGroundingPolicy {
    fn default() -> Self {
        Self {
            when_misinfo: FACTUAL_GROUNDING_MISINFO,
            when_authentic: FACTUAL_GROUNDING_AUTHENTIC,
        }
    }
}

impl FactualGroundingPolicy {
    pub fn score(&self, is_misinfo: bool) -> f64 {
        if is_misinfo {
            self.when_misinfo
        } else {
            self.when_authentic
        }
    }
}

/// Display-ready verdict. Computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedVerdictView {
    pub theme: VerdictTheme,
    /// Statistic supporting the verdict, as a percentage.
    pub confidence_score_percent: f64,
    pub radar_signals: RadarSignals,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VerdictDeriver {
    policy: FactualGroundingPolicy,
}

impl VerdictDeriver {
    pub fn new(policy: FactualGroundingPolicy) -> Self {
        Self { policy }
    }

    pub fn derive(&self, result: &AnalysisResult) -> DerivedVerdictView {
        let stats = &result.technical_stats;
        let theme = VerdictTheme::from_verdict(result.is_misinfo);

        let supporting = match theme {
            VerdictTheme::HighRisk => stats.ai_prob,
            VerdictTheme::LikelyAuthentic => stats.consistency,
        };

        DerivedVerdictView {
            theme,
            confidence_score_percent: supporting * 100.0,
            radar_signals: RadarSignals([
                stats.ai_prob * 100.0,
                stats.consistency * 100.0,
                self.policy.score(result.is_misinfo),
            ]),
        }
    }
}

/// Derive a verdict view with the default factual-grounding policy.
pub fn derive_verdict(result: &AnalysisResult) -> DerivedVerdictView {
    VerdictDeriver::default().derive(result)
}

/// Format a 0-100 value as a percentage with one decimal place.
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TechnicalStats;

    fn result(is_misinfo: bool, ai_prob: f64, consistency: f64) -> AnalysisResult {
        AnalysisResult {
            is_misinfo,
            technical_stats: TechnicalStats {
                ai_prob,
                consistency,
                verdict_type: None,
            },
            explanation: String::new(),
            media_url: None,
        }
    }

    #[test]
    fn misinfo_verdict_uses_ai_probability() {
        let view = derive_verdict(&result(true, 0.87, 0.40));
        assert_eq!(view.theme, VerdictTheme::HighRisk);
        assert_eq!(view.confidence_score_percent, 87.0);
        assert_eq!(view.radar_signals.values(), [87.0, 40.0, 20.0]);
    }

    #[test]
    fn authentic_verdict_uses_consistency() {
        let view = derive_verdict(&result(false, 0.10, 0.92));
        assert_eq!(view.theme, VerdictTheme::LikelyAuthentic);
        assert_eq!(view.confidence_score_percent, 92.0);
        assert_eq!(view.radar_signals.values(), [10.0, 92.0, 90.0]);
    }

    #[test]
    fn derivation_is_deterministic() {
        let input = result(true, 0.55, 0.31);
        let deriver = VerdictDeriver::default();
        let first = deriver.derive(&input);
        for _ in 0..10 {
            assert_eq!(deriver.derive(&input), first);
        }
    }

    #[test]
    fn radar_iterates_in_fixed_order() {
        let view = derive_verdict(&result(false, 0.2, 0.7));
        let labels: Vec<&str> = view.radar_signals.iter().map(|(axis, _)| axis.label()).collect();
        assert_eq!(labels, ["Digital DNA", "Semantic Alignment", "Factual Grounding"]);
        assert_eq!(view.radar_signals.get(RadarAxis::SemanticAlignment), 70.0);
    }

    #[test]
    fn custom_policy_replaces_factual_grounding() {
        let deriver = VerdictDeriver::new(FactualGroundingPolicy {
            when_misinfo: 5.0,
            when_authentic: 75.0,
        });
        assert_eq!(
            deriver.derive(&result(true, 0.9, 0.1)).radar_signals.get(RadarAxis::FactualGrounding),
            5.0
        );
        assert_eq!(
            deriver.derive(&result(false, 0.1, 0.9)).radar_signals.get(RadarAxis::FactualGrounding),
            75.0
        );
    }

    #[test]
    fn titles_and_percent_format() {
        assert_eq!(VerdictTheme::HighRisk.title(), "HIGH RISK DETECTED");
        assert_eq!(VerdictTheme::LikelyAuthentic.to_string(), "LIKELY AUTHENTIC");
        assert_eq!(format_percent(87.0), "87.0%");
        assert_eq!(format_percent(84.71), "84.7%");
    }
}
