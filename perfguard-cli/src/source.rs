//! Report loading with fallback substitution
//!
//! The fallback report is owned here, not by the core: the engine only ever
//! sees a report, whether it was read from disk or substituted.

use anyhow::Result;
use perfguard_core::load_report;
use perfguard_core::report::{AiAnalysis, MetricKind, MetricResult, PerformanceReport, Verdict};
use std::path::Path;

/// Where the rendered report came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOrigin {
    File,
    Fallback,
}

fn metric(score: f64, current: f64, baseline: f64, change: f64) -> MetricResult {
    MetricResult {
        score: Some(score),
        current: Some(current),
        baseline: Some(baseline),
        change: Some(change),
        risk_score: None,
    }
}

/// Report substituted when the real one cannot be loaded
pub fn fallback_report() -> PerformanceReport {
    let mut report = PerformanceReport {
        performance_score: 85.0,
        verdict: Some(Verdict::Pass),
        ai_analysis: Some(AiAnalysis {
            risk_score: Some(0.3),
            reasoning: Some("Report unavailable; showing default metrics.".to_string()),
            hotspots: Vec::new(),
            recommendations: Vec::new(),
            critical_paths: Vec::new(),
        }),
        ..Default::default()
    };

    let metrics = [
        (MetricKind::ExecutionTime, metric(88.0, 0.1234, 0.12, 2.83)),
        (MetricKind::MemoryRss, metric(90.0, 45.2, 44.8, 0.89)),
        (MetricKind::CpuUtilization, metric(85.0, 32.5, 31.0, 4.84)),
        (MetricKind::IoLatency, metric(82.0, 1.25, 1.2, 4.17)),
        (MetricKind::Complexity, metric(95.0, 8.0, 8.0, 0.0)),
        (
            MetricKind::AiRisk,
            MetricResult {
                score: Some(70.0),
                risk_score: Some(0.3),
                ..Default::default()
            },
        ),
    ];
    report.metrics.extend(metrics);
    report
}

/// Load the report at `path`, substituting the fallback on failure when allowed
pub fn load_or_fallback(
    path: &Path,
    allow_fallback: bool,
) -> Result<(PerformanceReport, ReportOrigin)> {
    match load_report(path) {
        Ok(report) => Ok((report, ReportOrigin::File)),
        Err(e) if allow_fallback => {
            tracing::warn!("{:#}; using fallback report", e);
            Ok((fallback_report(), ReportOrigin::Fallback))
        }
        Err(e) => Err(e),
    }
}
