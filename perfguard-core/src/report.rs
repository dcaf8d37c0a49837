//! Performance report input model
//!
//! Global invariants enforced:
//! - Reports are immutable once parsed
//! - Metric order is the order of the source document
//! - Unknown metric kinds and verdicts are preserved, never rejected

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

/// Default risk score when the AI analysis omits one
pub const DEFAULT_RISK_SCORE: f64 = 0.5;

/// Placeholder reasoning when the AI analysis omits one
pub const DEFAULT_REASONING: &str = "No reasoning provided";

/// Treats an explicit `null` the same as an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Measured dimension of a performance report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetricKind {
    ExecutionTime,
    MemoryRss,
    CpuUtilization,
    IoLatency,
    Complexity,
    AiRisk,
    Other(String),
}

impl MetricKind {
    /// Token used in report documents
    pub fn as_str(&self) -> &str {
        match self {
            MetricKind::ExecutionTime => "execution_time",
            MetricKind::MemoryRss => "memory_rss",
            MetricKind::CpuUtilization => "cpu_utilization",
            MetricKind::IoLatency => "io_latency",
            MetricKind::Complexity => "complexity",
            MetricKind::AiRisk => "ai_risk",
            MetricKind::Other(token) => token,
        }
    }

    /// The six kinds the analysis tool emits
    pub fn known() -> [MetricKind; 6] {
        [
            MetricKind::ExecutionTime,
            MetricKind::MemoryRss,
            MetricKind::CpuUtilization,
            MetricKind::IoLatency,
            MetricKind::Complexity,
            MetricKind::AiRisk,
        ]
    }
}

impl From<&str> for MetricKind {
    fn from(token: &str) -> Self {
        match token {
            "execution_time" => MetricKind::ExecutionTime,
            "memory_rss" => MetricKind::MemoryRss,
            "cpu_utilization" => MetricKind::CpuUtilization,
            "io_latency" => MetricKind::IoLatency,
            "complexity" => MetricKind::Complexity,
            "ai_risk" => MetricKind::AiRisk,
            other => MetricKind::Other(other.to_string()),
        }
    }
}

impl From<String> for MetricKind {
    fn from(token: String) -> Self {
        match MetricKind::from(token.as_str()) {
            MetricKind::Other(_) => MetricKind::Other(token),
            known => known,
        }
    }
}

impl From<MetricKind> for String {
    fn from(kind: MetricKind) -> Self {
        match kind {
            MetricKind::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall verdict token written by the analysis tool
///
/// Matching is case-insensitive. Unrecognized tokens (`BLOCKED`, `ERROR`, ...)
/// are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    Excellent,
    Approved,
    Pass,
    Warning,
    Other(String),
}

impl Verdict {
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "EXCELLENT" => Verdict::Excellent,
            "APPROVED" => Verdict::Approved,
            "PASS" => Verdict::Pass,
            "WARNING" => Verdict::Warning,
            _ => Verdict::Other(token.to_string()),
        }
    }

    /// Label shown to reviewers
    pub fn label(&self) -> &str {
        match self {
            Verdict::Excellent => "EXCELLENT",
            Verdict::Approved => "APPROVED",
            Verdict::Pass => "PASS",
            Verdict::Warning => "WARNING",
            Verdict::Other(token) => token,
        }
    }
}

impl From<String> for Verdict {
    fn from(token: String) -> Self {
        Verdict::parse(&token)
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> Self {
        verdict.label().to_string()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Score and raw values for one metric
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MetricResult {
    /// Normalized 0-100 score; absent is treated as 0
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<f64>,
    /// Signed percent delta of current against baseline
    #[serde(default, alias = "change_percent", skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    /// Raw risk (0-1) written for `ai_risk` in place of `current`
    #[serde(default, alias = "riskScore", skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
}

impl MetricResult {
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }

    /// Value displayed as "current", falling back to the raw risk score
    pub fn current_value(&self) -> Option<f64> {
        self.current.or(self.risk_score)
    }
}

/// Code location flagged by the AI analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub file: String,
    pub line: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// AI-derived risk assessment attached to a report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AiAnalysis {
    #[serde(default, alias = "riskScore", skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hotspots: Vec<Hotspot>,
    #[serde(default, alias = "suggestions", deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    /// Call paths the analysis considers performance-critical
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_paths: Vec<String>,
}

impl AiAnalysis {
    pub fn risk_score_or_default(&self) -> f64 {
        self.risk_score.unwrap_or(DEFAULT_RISK_SCORE)
    }

    pub fn reasoning_or_default(&self) -> &str {
        match self.reasoning.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_REASONING,
        }
    }
}

/// Performance report for one code change
///
/// Preconditions: values are numeric where the schema says so. Shape
/// validation happens at parse time; the engine does not coerce.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PerformanceReport {
    #[serde(default, alias = "performanceScore", deserialize_with = "null_as_default")]
    pub performance_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metrics: IndexMap<MetricKind, MetricResult>,
    #[serde(default, alias = "aiAnalysis", skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<AiAnalysis>,
}

impl PerformanceReport {
    /// Parse a report document
    pub fn from_json(json: &str) -> Result<Self> {
        let report: PerformanceReport =
            serde_json::from_str(json).context("failed to parse performance report")?;
        tracing::debug!(
            score = report.performance_score,
            metrics = report.metrics.len(),
            "parsed performance report"
        );
        Ok(report)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize performance report")
    }
}

/// Read and parse a report document from disk
pub fn load_report(path: &Path) -> Result<PerformanceReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read report: {}", path.display()))?;
    PerformanceReport::from_json(&content)
        .with_context(|| format!("invalid report: {}", path.display()))
}
