//! Metric labels, icons, and value formatting
//!
//! Every known kind has one static entry; unknown kinds resolve to the
//! default entry and are formatted generically.

use crate::report::MetricKind;
use serde::Serialize;

/// Numeric formatting rule for a metric kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Fixed decimals followed by a suffix
    Fixed {
        decimals: usize,
        suffix: &'static str,
    },
    /// Rounded to the nearest integer
    Integer,
    /// Value shown as-is
    Raw,
}

/// Static presentation entry for a metric kind
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub icon: &'static str,
    pub format: ValueFormat,
}

const EXECUTION_TIME: MetricSpec = MetricSpec {
    icon: "⏱️",
    format: ValueFormat::Fixed {
        decimals: 4,
        suffix: "s",
    },
};

const MEMORY_RSS: MetricSpec = MetricSpec {
    icon: "💾",
    format: ValueFormat::Fixed {
        decimals: 2,
        suffix: " MB",
    },
};

const CPU_UTILIZATION: MetricSpec = MetricSpec {
    icon: "🖥️",
    format: ValueFormat::Fixed {
        decimals: 2,
        suffix: "%",
    },
};

const IO_LATENCY: MetricSpec = MetricSpec {
    icon: "📁",
    format: ValueFormat::Fixed {
        decimals: 4,
        suffix: "ms",
    },
};

const COMPLEXITY: MetricSpec = MetricSpec {
    icon: "🔢",
    format: ValueFormat::Integer,
};

const AI_RISK: MetricSpec = MetricSpec {
    icon: "🤖",
    format: ValueFormat::Fixed {
        decimals: 2,
        suffix: "",
    },
};

const DEFAULT_SPEC: MetricSpec = MetricSpec {
    icon: "📊",
    format: ValueFormat::Raw,
};

/// Look up the presentation entry for a kind
pub fn spec_for(kind: &MetricKind) -> &'static MetricSpec {
    match kind {
        MetricKind::ExecutionTime => &EXECUTION_TIME,
        MetricKind::MemoryRss => &MEMORY_RSS,
        MetricKind::CpuUtilization => &CPU_UTILIZATION,
        MetricKind::IoLatency => &IO_LATENCY,
        MetricKind::Complexity => &COMPLEXITY,
        MetricKind::AiRisk => &AI_RISK,
        MetricKind::Other(_) => &DEFAULT_SPEC,
    }
}

/// Title-case the underscore-delimited kind token
///
/// `execution_time` becomes `Execution Time`. Only the first letter of each
/// word is changed; the rest is kept as written.
pub fn format_label(kind: &MetricKind) -> String {
    kind.as_str()
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn icon_for(kind: &MetricKind) -> &'static str {
    spec_for(kind).icon
}

/// Format a raw metric value using the kind's rule
pub fn format_value(kind: &MetricKind, value: f64) -> String {
    match spec_for(kind).format {
        ValueFormat::Fixed { decimals, suffix } => {
            format!("{:.*}{}", decimals, value, suffix)
        }
        ValueFormat::Integer => format!("{}", round_half_up(value)),
        ValueFormat::Raw => format!("{}", value),
    }
}

/// Signed percent with two decimals, `+` on positive values
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

/// Round toward positive infinity on ties (2.5 -> 3, -2.5 -> -2)
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Direction of a metric's change against baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeTrend {
    Improved,
    Neutral,
    Regressed,
}

/// Regressions above this percentage are highlighted
pub const REGRESSION_HIGHLIGHT_PERCENT: f64 = 10.0;

impl ChangeTrend {
    pub fn classify(change: f64) -> Self {
        if change < 0.0 {
            ChangeTrend::Improved
        } else if change > REGRESSION_HIGHLIGHT_PERCENT {
            ChangeTrend::Regressed
        } else {
            ChangeTrend::Neutral
        }
    }
}
