//! Rendering of view models
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs
//! - AI-sourced free text is sanitized before it is embedded in Markdown

use crate::config::ResolvedConfig;
use crate::gate::GateResult;
use crate::tier::ScoreTier;
use crate::view::{AiSummary, MetricRow, ViewModel, MAINTENANCE_TIPS};
use regex::Regex;
use std::sync::OnceLock;

/// List limits applied while rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub max_hotspots: usize,
    pub max_suggestions: usize,
}

impl From<&ResolvedConfig> for RenderOptions {
    fn from(config: &ResolvedConfig) -> Self {
        RenderOptions {
            max_hotspots: config.max_hotspots,
            max_suggestions: config.max_suggestions,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::from(&ResolvedConfig::defaults())
    }
}

/// Replace script-injection patterns in untrusted text
pub fn sanitize(text: &str) -> String {
    static DANGEROUS_RE: OnceLock<Regex> = OnceLock::new();
    let re = DANGEROUS_RE
        .get_or_init(|| Regex::new(r"(?i)<script|javascript:|onerror=|onclick=").unwrap());

    if re.is_match(text) {
        tracing::warn!("removed potentially dangerous pattern from report text");
    }
    re.replace_all(text, "[REMOVED]").into_owned()
}

fn header_emoji(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Excellent => "🌟",
        ScoreTier::Good => "✅",
        ScoreTier::Warning => "⚠️",
        ScoreTier::Poor => "🚫",
    }
}

fn status_icon(tier: ScoreTier) -> &'static str {
    match tier {
        ScoreTier::Excellent | ScoreTier::Good => "✅",
        ScoreTier::Warning => "⚠️",
        ScoreTier::Poor => "❌",
    }
}

/// "2 areas need attention", "1 area needs attention"
fn attention_summary(count: usize) -> String {
    if count == 1 {
        "1 area needs attention".to_string()
    } else {
        format!("{} areas need attention", count)
    }
}

/// Current/baseline/change details present on a row
fn row_details(row: &MetricRow) -> Vec<(&'static str, &str)> {
    let mut details = Vec::new();
    if let Some(current) = &row.formatted_current {
        details.push(("Current", current.as_str()));
    }
    if let Some(baseline) = &row.formatted_baseline {
        details.push(("Baseline", baseline.as_str()));
    }
    if let Some(change) = &row.formatted_change {
        details.push(("Change", change.as_str()));
    }
    details
}

/// Render a view model as terminal text
pub fn render_text(view: &ViewModel, options: &RenderOptions) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Performance Score: {} ({})\n",
        view.score.display_score,
        view.score_tier.as_str()
    ));
    output.push_str(&format!(
        "Verdict: {} ({})\n",
        view.score.verdict,
        view.verdict_tier.as_str()
    ));
    output.push_str(&format!("AI Risk: {}\n", view.risk_tier.label()));

    if !view.metric_rows.is_empty() {
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:<6} {:<10} {:<14} {:<14} {}\n",
            "METRIC", "SCORE", "TIER", "CURRENT", "BASELINE", "CHANGE"
        ));
        for row in &view.metric_rows {
            output.push_str(&format!(
                "{:<20} {:<6} {:<10} {:<14} {:<14} {}\n",
                truncate_or_pad(&row.label, 20),
                row.display_score,
                row.score_tier.as_str(),
                row.formatted_current.as_deref().unwrap_or("-"),
                row.formatted_baseline.as_deref().unwrap_or("-"),
                row.formatted_change.as_deref().unwrap_or("-"),
            ));
        }
    }

    if let Some(ai) = &view.ai {
        output.push('\n');
        output.push_str(&format!(
            "AI Analysis: {} ({}%)\n",
            ai.risk_tier.label(),
            ai.risk_percent
        ));
        output.push_str(&format!("  {}\n", ai.reasoning));
        for hotspot in ai.hotspots.iter().take(options.max_hotspots) {
            output.push_str(&format!(
                "  {}:{} {}\n",
                hotspot.file, hotspot.line, hotspot.description
            ));
        }
    }

    output.push('\n');
    if view.recommendations.is_empty() {
        output.push_str("All metrics are performing well.\n");
        output.push_str("Tips to maintain performance:\n");
        for tip in MAINTENANCE_TIPS {
            output.push_str(&format!("  - {}\n", tip));
        }
    } else {
        output.push_str(&format!(
            "Recommendations: {}\n",
            attention_summary(view.recommendations.len())
        ));
        for rec in &view.recommendations {
            output.push_str(&format!(
                "[{}] {} ({})\n",
                rec.severity, rec.metric, rec.impact
            ));
            for fix in &rec.fixes {
                output.push_str(&format!("  - {}\n", fix));
            }
        }
    }

    output
}

/// Render a view model as JSON output
pub fn render_json(view: &ViewModel) -> String {
    serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
}

/// Render the pull-request comment for a view model
pub fn render_markdown(view: &ViewModel, gate: &GateResult, options: &RenderOptions) -> String {
    let mut md = String::new();

    let status = if gate.is_blocked() {
        format!("❌ {}", gate.status.label())
    } else {
        format!("✅ {}", gate.status.label())
    };

    md.push_str(&format!(
        "## {} PerfGuard AI Report\n\n**Score: {:.1} / 100**\n**Verdict: {}**\n**Status: {}**\n\n---\n\n",
        header_emoji(view.score_tier),
        view.score.score,
        view.score.verdict,
        status
    ));

    md.push_str("### 📊 Performance Metrics Breakdown\n\n");
    if view.metric_rows.is_empty() {
        md.push_str("_No metrics reported._\n");
    }
    for row in &view.metric_rows {
        md.push_str(&format!(
            "- **{}**: {} {:.1}/100\n",
            sanitize(&row.label),
            status_icon(row.score_tier),
            row.score
        ));
        let details = row_details(row);
        if !details.is_empty() {
            let joined = details
                .iter()
                .map(|(name, value)| format!("{}: `{}`", name, value))
                .collect::<Vec<_>>()
                .join(" | ");
            md.push_str(&format!("  - {}\n", joined));
        }
    }

    if let Some(ai) = &view.ai {
        md.push('\n');
        md.push_str(&render_ai_section(ai, options));
    }

    md.push('\n');
    if view.recommendations.is_empty() {
        md.push_str("### 🎉 Excellent Performance!\n\n");
        md.push_str("All metrics are performing well. Tips to maintain performance:\n\n");
        for tip in MAINTENANCE_TIPS {
            md.push_str(&format!("- {}\n", tip));
        }
    } else {
        md.push_str("### 💡 How to Improve Score\n\n");
        md.push_str(&format!(
            "{}\n",
            attention_summary(view.recommendations.len())
        ));
        for rec in &view.recommendations {
            md.push_str(&format!(
                "\n#### {} ({}, {})\n\n",
                sanitize(&rec.metric),
                rec.severity,
                rec.impact
            ));
            for fix in &rec.fixes {
                md.push_str(&format!("- {}\n", fix));
            }
        }
    }

    md.push_str("\n---\n\n*Generated by PerfGuard AI*\n");
    md
}

fn render_ai_section(ai: &AiSummary, options: &RenderOptions) -> String {
    let mut md = String::new();
    md.push_str("### 🤖 AI Analysis\n\n");
    md.push_str(&format!(
        "**Risk Score**: {:.2}/1.00 ({})\n\n",
        ai.risk_score,
        ai.risk_tier.label()
    ));
    md.push_str(&format!("**Reasoning**: {}\n", sanitize(&ai.reasoning)));

    if !ai.critical_paths.is_empty() {
        md.push_str("\n**Critical Paths Identified**:\n");
        for path in ai.critical_paths.iter().take(options.max_hotspots) {
            md.push_str(&format!("- `{}`\n", sanitize(path)));
        }
    }

    if !ai.hotspots.is_empty() {
        md.push_str("\n**Performance Hotspots**:\n");
        for hotspot in ai.hotspots.iter().take(options.max_hotspots) {
            md.push_str(&format!(
                "- `{}:{}` {}\n",
                sanitize(&hotspot.file),
                hotspot.line,
                sanitize(&hotspot.description)
            ));
        }
    }

    if !ai.recommendations.is_empty() {
        md.push_str("\n**AI Suggestions**:\n");
        for (i, suggestion) in ai
            .recommendations
            .iter()
            .take(options.max_suggestions)
            .enumerate()
        {
            md.push_str(&format!("{}. {}\n", i + 1, sanitize(suggestion)));
        }
    }

    md
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
