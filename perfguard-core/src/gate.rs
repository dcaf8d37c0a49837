//! Merge gate for CI enforcement
//!
//! Global invariants enforced:
//! - The gate depends only on the overall score and the configured minimum
//! - No IO, no CLI logic

use crate::report::PerformanceReport;
use serde::Serialize;

/// Minimum overall score a change needs to merge
pub const DEFAULT_MIN_PASSING_SCORE: f64 = 80.0;

/// Gate decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GateStatus {
    Approved,
    MergeBlocked,
}

impl GateStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GateStatus::Approved => "APPROVED",
            GateStatus::MergeBlocked => "MERGE BLOCKED",
        }
    }
}

/// Gate evaluation result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GateResult {
    pub status: GateStatus,
    pub score: f64,
    pub min_passing_score: f64,
}

impl GateResult {
    pub fn is_blocked(&self) -> bool {
        self.status == GateStatus::MergeBlocked
    }

    /// Points still missing to pass; zero when approved
    pub fn shortfall(&self) -> f64 {
        (self.min_passing_score - self.score).max(0.0)
    }
}

/// Evaluate the merge gate for a report
pub fn evaluate(report: &PerformanceReport, min_passing_score: f64) -> GateResult {
    let status = if report.performance_score < min_passing_score {
        GateStatus::MergeBlocked
    } else {
        GateStatus::Approved
    };

    tracing::debug!(
        score = report.performance_score,
        min_passing_score,
        status = status.label(),
        "evaluated merge gate"
    );

    GateResult {
        status,
        score: report.performance_score,
        min_passing_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: f64) -> PerformanceReport {
        PerformanceReport {
            performance_score: score,
            ..Default::default()
        }
    }

    #[test]
    fn test_gate_blocks_below_minimum() {
        let result = evaluate(&report(79.9), DEFAULT_MIN_PASSING_SCORE);
        assert!(result.is_blocked());
        assert_eq!(result.status.label(), "MERGE BLOCKED");
        assert!((result.shortfall() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_gate_approves_at_minimum() {
        let result = evaluate(&report(80.0), DEFAULT_MIN_PASSING_SCORE);
        assert!(!result.is_blocked());
        assert_eq!(result.status.label(), "APPROVED");
        assert_eq!(result.shortfall(), 0.0);
    }

    #[test]
    fn test_gate_respects_custom_minimum() {
        assert!(!evaluate(&report(72.0), 70.0).is_blocked());
        assert!(evaluate(&report(84.0), 85.0).is_blocked());
    }
}
