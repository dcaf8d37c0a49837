//! Score, verdict, and risk tier classification
//!
//! Global invariants enforced:
//! - Thresholds are fixed and inclusive on the lower bound
//! - Classification is total: every input maps to exactly one tier

use crate::report::Verdict;
use serde::Serialize;

/// Tier for a 0-100 score (overall or per metric)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Excellent, // >= 90
    Good,      // 80-90
    Warning,   // 70-80
    Poor,      // < 70
}

impl ScoreTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Warning => "warning",
            ScoreTier::Poor => "poor",
        }
    }
}

/// Tier for the report's verdict token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictTier {
    Excellent,
    Pass,
    Warning,
    Fail,
}

impl VerdictTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictTier::Excellent => "excellent",
            VerdictTier::Pass => "pass",
            VerdictTier::Warning => "warning",
            VerdictTier::Fail => "fail",
        }
    }
}

/// Tier for the AI risk score (0-1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,    // < 0.3
    Medium, // 0.3-0.7
    High,   // >= 0.7
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }

    /// Uppercase badge text
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        }
    }
}

pub const EXCELLENT_THRESHOLD: f64 = 90.0;
pub const GOOD_THRESHOLD: f64 = 80.0;
pub const WARNING_THRESHOLD: f64 = 70.0;

pub const MEDIUM_RISK_THRESHOLD: f64 = 0.3;
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Label shown when a report carries no verdict
pub const DEFAULT_VERDICT_LABEL: &str = "PASS";

pub fn score_tier(score: f64) -> ScoreTier {
    if score >= EXCELLENT_THRESHOLD {
        ScoreTier::Excellent
    } else if score >= GOOD_THRESHOLD {
        ScoreTier::Good
    } else if score >= WARNING_THRESHOLD {
        ScoreTier::Warning
    } else {
        ScoreTier::Poor
    }
}

/// Classify a verdict
///
/// An absent (or empty) verdict is `Pass`, while any unrecognized token is
/// `Fail`. The asymmetry matches what reviewers have always been shown.
pub fn verdict_tier(verdict: Option<&Verdict>) -> VerdictTier {
    match verdict {
        None => VerdictTier::Pass,
        Some(Verdict::Excellent) | Some(Verdict::Approved) => VerdictTier::Excellent,
        Some(Verdict::Pass) => VerdictTier::Pass,
        Some(Verdict::Warning) => VerdictTier::Warning,
        Some(Verdict::Other(token)) if token.is_empty() => VerdictTier::Pass,
        Some(Verdict::Other(_)) => VerdictTier::Fail,
    }
}

/// Display label for a verdict, `PASS` when absent or empty
pub fn verdict_label(verdict: Option<&Verdict>) -> String {
    match verdict {
        Some(v) if !v.label().is_empty() => v.label().to_string(),
        _ => DEFAULT_VERDICT_LABEL.to_string(),
    }
}

pub fn risk_tier(risk_score: f64) -> RiskTier {
    if risk_score < MEDIUM_RISK_THRESHOLD {
        RiskTier::Low
    } else if risk_score < HIGH_RISK_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_tier_boundaries() {
        assert_eq!(score_tier(100.0), ScoreTier::Excellent);
        assert_eq!(score_tier(90.0), ScoreTier::Excellent);
        assert_eq!(score_tier(89.99), ScoreTier::Good);
        assert_eq!(score_tier(80.0), ScoreTier::Good);
        assert_eq!(score_tier(79.9), ScoreTier::Warning);
        assert_eq!(score_tier(70.0), ScoreTier::Warning);
        assert_eq!(score_tier(69.99), ScoreTier::Poor);
        assert_eq!(score_tier(0.0), ScoreTier::Poor);
    }

    #[test]
    fn test_score_tier_sweep() {
        for tenth in 0..=1200 {
            let s = tenth as f64 / 10.0;
            let expected = if s >= 90.0 {
                ScoreTier::Excellent
            } else if s >= 80.0 {
                ScoreTier::Good
            } else if s >= 70.0 {
                ScoreTier::Warning
            } else {
                ScoreTier::Poor
            };
            assert_eq!(score_tier(s), expected, "score {}", s);
        }
    }

    #[test]
    fn test_verdict_tier_known_tokens() {
        assert_eq!(
            verdict_tier(Some(&Verdict::parse("EXCELLENT"))),
            VerdictTier::Excellent
        );
        assert_eq!(
            verdict_tier(Some(&Verdict::parse("approved"))),
            VerdictTier::Excellent
        );
        assert_eq!(verdict_tier(Some(&Verdict::parse("Pass"))), VerdictTier::Pass);
        assert_eq!(
            verdict_tier(Some(&Verdict::parse("WARNING"))),
            VerdictTier::Warning
        );
    }

    #[test]
    fn test_absent_verdict_passes_but_unknown_fails() {
        assert_eq!(verdict_tier(None), VerdictTier::Pass);
        assert_eq!(verdict_tier(Some(&Verdict::parse(""))), VerdictTier::Pass);
        assert_eq!(
            verdict_tier(Some(&Verdict::parse("BLOCKED"))),
            VerdictTier::Fail
        );
        assert_eq!(verdict_tier(Some(&Verdict::parse("ERROR"))), VerdictTier::Fail);
    }

    #[test]
    fn test_verdict_label() {
        assert_eq!(verdict_label(None), "PASS");
        assert_eq!(verdict_label(Some(&Verdict::parse(""))), "PASS");
        assert_eq!(verdict_label(Some(&Verdict::parse("blocked"))), "blocked");
        assert_eq!(verdict_label(Some(&Verdict::parse("warning"))), "WARNING");
    }

    #[test]
    fn test_risk_tier_boundaries() {
        assert_eq!(risk_tier(0.0), RiskTier::Low);
        assert_eq!(risk_tier(0.29), RiskTier::Low);
        assert_eq!(risk_tier(0.3), RiskTier::Medium);
        assert_eq!(risk_tier(0.5), RiskTier::Medium);
        assert_eq!(risk_tier(0.69), RiskTier::Medium);
        assert_eq!(risk_tier(0.7), RiskTier::High);
        assert_eq!(risk_tier(1.0), RiskTier::High);
    }
}
