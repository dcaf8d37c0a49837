//! View-model assembly
//!
//! Composes formatting, tier classification, and recommendations into the
//! structure consumed by renderers. No decisions are made here.

use crate::metrics::{self, ChangeTrend};
use crate::recommend::{self, Recommendation};
use crate::report::{
    AiAnalysis, Hotspot, MetricKind, MetricResult, PerformanceReport, DEFAULT_RISK_SCORE,
};
use crate::tier::{self, RiskTier, ScoreTier, VerdictTier};
use serde::Serialize;

/// Tips shown when there is nothing to recommend
pub const MAINTENANCE_TIPS: [&str; 4] = [
    "Run performance tests before committing changes",
    "Monitor metrics after each deployment",
    "Keep dependencies updated and optimized",
    "Document performance-critical code sections",
];

/// Overall score and verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ScoreSummary {
    pub score: f64,
    pub display_score: i64,
    pub tier: ScoreTier,
    pub verdict: String,
    pub verdict_tier: VerdictTier,
}

/// One presentation row per metric, in report order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricRow {
    pub kind: MetricKind,
    pub label: String,
    pub icon: String,
    pub score: f64,
    pub display_score: i64,
    pub score_tier: ScoreTier,
    /// Progress-bar width, capped at 100
    pub bar_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_current: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_baseline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_change: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_trend: Option<ChangeTrend>,
}

/// AI analysis as shown to reviewers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AiSummary {
    pub risk_score: f64,
    pub risk_tier: RiskTier,
    pub risk_percent: i64,
    pub reasoning: String,
    pub hotspots: Vec<Hotspot>,
    pub recommendations: Vec<String>,
    pub critical_paths: Vec<String>,
}

/// Presentation-ready derivation of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ViewModel {
    pub score: ScoreSummary,
    pub score_tier: ScoreTier,
    pub verdict_tier: VerdictTier,
    pub metric_rows: Vec<MetricRow>,
    pub risk_tier: RiskTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiSummary>,
    pub recommendations: Vec<Recommendation>,
}

impl ViewModel {
    pub fn needs_attention(&self) -> bool {
        !self.recommendations.is_empty()
    }
}

pub fn metric_row(kind: &MetricKind, result: &MetricResult) -> MetricRow {
    let score = result.score_or_zero();
    MetricRow {
        kind: kind.clone(),
        label: metrics::format_label(kind),
        icon: metrics::icon_for(kind).to_string(),
        score,
        display_score: metrics::round_half_up(score),
        score_tier: tier::score_tier(score),
        bar_percent: score.min(100.0),
        formatted_current: result.current_value().map(|v| metrics::format_value(kind, v)),
        formatted_baseline: result.baseline.map(|v| metrics::format_value(kind, v)),
        formatted_change: result.change.map(metrics::format_change),
        change_trend: result.change.map(ChangeTrend::classify),
    }
}

pub fn ai_summary(analysis: &AiAnalysis) -> AiSummary {
    let risk_score = analysis.risk_score_or_default();
    AiSummary {
        risk_score,
        risk_tier: tier::risk_tier(risk_score),
        risk_percent: metrics::round_half_up(risk_score * 100.0),
        reasoning: analysis.reasoning_or_default().to_string(),
        hotspots: analysis.hotspots.clone(),
        recommendations: analysis.recommendations.clone(),
        critical_paths: analysis.critical_paths.clone(),
    }
}

/// Derive the full view model from a report
pub fn assemble(report: &PerformanceReport) -> ViewModel {
    let verdict = report.verdict.as_ref();
    let score = ScoreSummary {
        score: report.performance_score,
        display_score: metrics::round_half_up(report.performance_score),
        tier: tier::score_tier(report.performance_score),
        verdict: tier::verdict_label(verdict),
        verdict_tier: tier::verdict_tier(verdict),
    };

    let metric_rows = report
        .metrics
        .iter()
        .map(|(kind, result)| metric_row(kind, result))
        .collect();

    let ai = report.ai_analysis.as_ref().map(ai_summary);
    let risk_tier = ai
        .as_ref()
        .map(|a| a.risk_tier)
        .unwrap_or_else(|| tier::risk_tier(DEFAULT_RISK_SCORE));

    ViewModel {
        score_tier: score.tier,
        verdict_tier: score.verdict_tier,
        score,
        metric_rows,
        risk_tier,
        ai,
        recommendations: recommend::generate(report),
    }
}
