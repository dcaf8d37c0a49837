//! Recommendation engine
//!
//! Turns a report's metric scores into a ranked list of remediation records.
//!
//! Global invariants enforced:
//! - Metrics are visited in report order; output order follows it
//! - At most one record per metric
//! - The overall record, when present, is always last
//! - Records are rebuilt on every call (no state carried between calls)

use crate::metrics::{format_label, round_half_up};
use crate::report::{MetricKind, PerformanceReport};
use crate::tier::{GOOD_THRESHOLD, WARNING_THRESHOLD};
use serde::Serialize;
use std::fmt;

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_ascii_uppercase())
    }
}

/// One generated recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Recommendation {
    pub metric: String,
    pub severity: Severity,
    pub impact: String,
    pub fixes: Vec<String>,
}

/// Fixed remediation entry for a known metric kind
#[derive(Debug)]
pub struct Rule {
    pub metric: &'static str,
    pub severity: Severity,
    pub impact: &'static str,
    pub fixes: [&'static str; 5],
}

impl Rule {
    fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            metric: self.metric.to_string(),
            severity: self.severity,
            impact: self.impact.to_string(),
            fixes: self.fixes.iter().map(|f| f.to_string()).collect(),
        }
    }
}

const EXECUTION_TIME_RULE: Rule = Rule {
    metric: "Execution Time",
    severity: Severity::High,
    impact: "+30 points",
    fixes: [
        "Profile the benchmarks to identify the slowest functions",
        "Optimize nested loops and reduce time complexity",
        "Cache the results of repeated calculations",
        "Use asynchronous I/O where the workload waits on I/O",
        "Iterate lazily instead of materializing large datasets",
    ],
};

const MEMORY_RSS_RULE: Rule = Rule {
    metric: "Memory Usage",
    severity: Severity::High,
    impact: "+20 points",
    fixes: [
        "Profile heap usage to identify leaks",
        "Release large objects as soon as they are no longer needed",
        "Stream or iterate lazily instead of building large collections",
        "Avoid long-lived global references to large datasets",
        "Reduce per-instance memory overhead in frequently allocated types",
    ],
};

const CPU_UTILIZATION_RULE: Rule = Rule {
    metric: "CPU Utilization",
    severity: Severity::Medium,
    impact: "+15 points",
    fixes: [
        "Profile CPU time to find the most expensive operations",
        "Move expensive computations outside loops",
        "Parallelize CPU-bound work across cores",
        "Use optimized numeric routines for heavy math",
        "Reduce recursion depth and repeated recursive calls",
    ],
};

const IO_LATENCY_RULE: Rule = Rule {
    metric: "I/O Latency",
    severity: Severity::Medium,
    impact: "+15 points",
    fixes: [
        "Batch file I/O instead of many small reads and writes",
        "Use connection pooling for database operations",
        "Cache frequently accessed data",
        "Use asynchronous I/O for network operations",
        "Reduce the number of API calls by batching requests",
    ],
};

const COMPLEXITY_RULE: Rule = Rule {
    metric: "Code Complexity",
    severity: Severity::Low,
    impact: "+10 points",
    fixes: [
        "Split complex functions into smaller, simpler functions",
        "Keep cyclomatic complexity at or below 10 per function",
        "Extract nested conditionals into separate functions",
        "Use early returns to reduce nesting depth",
        "Apply design patterns that simplify the control flow",
    ],
};

const AI_RISK_RULE: Rule = Rule {
    metric: "AI Risk Assessment",
    severity: Severity::Medium,
    impact: "+10 points",
    fixes: [
        "Review and optimize the code paths flagged by the AI analysis",
        "Address the performance concerns cited in the AI reasoning",
        "Refactor code patterns flagged as risky",
        "Add benchmarks for critical code paths",
        "Document performance-critical sections",
    ],
};

/// Label of the record appended when the overall score fails
pub const OVERALL_METRIC: &str = "Overall Performance";

const OVERALL_IMPACT: &str = "Major improvement needed";

const OVERALL_FIXES: [&str; 5] = [
    "Run the performance benchmarks to identify bottlenecks",
    "Profile CPU time, memory, and line-level hot paths",
    "Review recent commits for performance regressions",
    "Compare against baseline metrics to see what changed",
    "Run performance tests locally before committing",
];

const MINOR_IMPACT: &str = "+5 points";

/// Look up the fixed rule for a kind; unknown kinds have none
pub fn rule_for(kind: &MetricKind) -> Option<&'static Rule> {
    match kind {
        MetricKind::ExecutionTime => Some(&EXECUTION_TIME_RULE),
        MetricKind::MemoryRss => Some(&MEMORY_RSS_RULE),
        MetricKind::CpuUtilization => Some(&CPU_UTILIZATION_RULE),
        MetricKind::IoLatency => Some(&IO_LATENCY_RULE),
        MetricKind::Complexity => Some(&COMPLEXITY_RULE),
        MetricKind::AiRisk => Some(&AI_RISK_RULE),
        MetricKind::Other(_) => None,
    }
}

fn minor_recommendation(kind: &MetricKind, score: f64) -> Recommendation {
    Recommendation {
        metric: format_label(kind),
        severity: Severity::Low,
        impact: MINOR_IMPACT.to_string(),
        fixes: vec![
            format!(
                "Minor optimization needed - currently at {}/100",
                round_half_up(score)
            ),
            "Review recent changes for potential improvements".to_string(),
            "Consider adding more test coverage".to_string(),
        ],
    }
}

fn overall_recommendation() -> Recommendation {
    Recommendation {
        metric: OVERALL_METRIC.to_string(),
        severity: Severity::Critical,
        impact: OVERALL_IMPACT.to_string(),
        fixes: OVERALL_FIXES.iter().map(|f| f.to_string()).collect(),
    }
}

/// Recommendation for a single metric, if its score warrants one
pub fn recommend_metric(kind: &MetricKind, score: f64) -> Option<Recommendation> {
    if score < WARNING_THRESHOLD {
        rule_for(kind).map(Rule::to_recommendation)
    } else if score < GOOD_THRESHOLD {
        Some(minor_recommendation(kind, score))
    } else {
        None
    }
}

/// Generate the ordered recommendation list for a report
pub fn generate(report: &PerformanceReport) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = report
        .metrics
        .iter()
        .filter_map(|(kind, result)| recommend_metric(kind, result.score_or_zero()))
        .collect();

    if report.performance_score < WARNING_THRESHOLD {
        recommendations.push(overall_recommendation());
    }

    tracing::debug!(
        count = recommendations.len(),
        "generated recommendations"
    );
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MetricResult;

    fn report_with(score: f64, metrics: &[(MetricKind, Option<f64>)]) -> PerformanceReport {
        PerformanceReport {
            performance_score: score,
            metrics: metrics
                .iter()
                .map(|(kind, s)| {
                    (
                        kind.clone(),
                        MetricResult {
                            score: *s,
                            ..Default::default()
                        },
                    )
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_rule_table_per_kind() {
        let expected = [
            (MetricKind::ExecutionTime, "Execution Time", Severity::High, "+30 points"),
            (MetricKind::MemoryRss, "Memory Usage", Severity::High, "+20 points"),
            (MetricKind::CpuUtilization, "CPU Utilization", Severity::Medium, "+15 points"),
            (MetricKind::IoLatency, "I/O Latency", Severity::Medium, "+15 points"),
            (MetricKind::Complexity, "Code Complexity", Severity::Low, "+10 points"),
            (MetricKind::AiRisk, "AI Risk Assessment", Severity::Medium, "+10 points"),
        ];

        for (kind, metric, severity, impact) in expected {
            let recs = generate(&report_with(95.0, &[(kind.clone(), Some(50.0))]));
            assert_eq!(recs.len(), 1, "kind {}", kind);
            assert_eq!(recs[0].metric, metric);
            assert_eq!(recs[0].severity, severity);
            assert_eq!(recs[0].impact, impact);
            assert_eq!(recs[0].fixes.len(), 5);
        }
    }

    #[test]
    fn test_minor_record_rounds_half_up_like_row_display() {
        let recs = generate(&report_with(95.0, &[(MetricKind::MemoryRss, Some(72.5))]));
        assert_eq!(
            recs[0].fixes[0],
            "Minor optimization needed - currently at 73/100"
        );

        let recs = generate(&report_with(95.0, &[(MetricKind::MemoryRss, Some(74.5))]));
        assert_eq!(
            recs[0].fixes[0],
            "Minor optimization needed - currently at 75/100"
        );
        assert_eq!(crate::metrics::round_half_up(74.5), 75);
    }

    #[test]
    fn test_minor_record_boundaries() {
        let recs = generate(&report_with(95.0, &[(MetricKind::CpuUtilization, Some(75.0))]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metric, "Cpu Utilization");
        assert_eq!(recs[0].severity, Severity::Low);
        assert_eq!(recs[0].impact, "+5 points");
        assert_eq!(
            recs[0].fixes[0],
            "Minor optimization needed - currently at 75/100"
        );
        assert_eq!(recs[0].fixes.len(), 3);

        let recs = generate(&report_with(95.0, &[(MetricKind::CpuUtilization, Some(80.0))]));
        assert!(recs.is_empty());

        let recs = generate(&report_with(95.0, &[(MetricKind::CpuUtilization, Some(69.0))]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metric, "CPU Utilization");
        assert_eq!(recs[0].severity, Severity::Medium);
    }

    #[test]
    fn test_minor_record_applies_to_unknown_kinds() {
        let kind = MetricKind::Other("gc_pauses".to_string());
        let recs = generate(&report_with(95.0, &[(kind, Some(72.0))]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metric, "Gc Pauses");
        assert_eq!(recs[0].severity, Severity::Low);
    }

    #[test]
    fn test_unknown_kind_below_70_has_no_record() {
        let kind = MetricKind::Other("gc_pauses".to_string());
        let recs = generate(&report_with(95.0, &[(kind, Some(10.0))]));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_missing_score_counts_as_zero() {
        let recs = generate(&report_with(95.0, &[(MetricKind::IoLatency, None)]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metric, "I/O Latency");
    }

    #[test]
    fn test_overall_record_threshold() {
        let recs = generate(&report_with(65.0, &[(MetricKind::ExecutionTime, Some(95.0))]));
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metric, "Overall Performance");
        assert_eq!(recs[0].severity, Severity::Critical);
        assert_eq!(recs[0].impact, "Major improvement needed");
        assert_eq!(recs[0].fixes.len(), 5);

        let recs = generate(&report_with(70.0, &[(MetricKind::ExecutionTime, Some(95.0))]));
        assert!(recs.is_empty());
    }

    #[test]
    fn test_order_follows_report_then_overall() {
        let recs = generate(&report_with(
            40.0,
            &[
                (MetricKind::Complexity, Some(20.0)),
                (MetricKind::ExecutionTime, Some(90.0)),
                (MetricKind::MemoryRss, Some(74.0)),
                (MetricKind::ExecutionTime, Some(10.0)),
            ],
        ));
        // Duplicate keys collapse in the map; the later value wins in place.
        let metrics: Vec<&str> = recs.iter().map(|r| r.metric.as_str()).collect();
        assert_eq!(
            metrics,
            vec!["Code Complexity", "Execution Time", "Memory Rss", "Overall Performance"]
        );
    }

    #[test]
    fn test_generate_is_idempotent() {
        let report = report_with(
            55.0,
            &[
                (MetricKind::MemoryRss, Some(40.0)),
                (MetricKind::AiRisk, Some(71.0)),
            ],
        );
        assert_eq!(generate(&report), generate(&report));
    }

    #[test]
    fn test_severity_display_is_uppercase() {
        assert_eq!(Severity::Critical.to_string(), "CRITICAL");
        assert_eq!(Severity::Low.to_string(), "LOW");
    }
}
