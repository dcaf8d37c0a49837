//! PerfGuard core library - interpretation of pull-request performance reports

#![deny(warnings)]

// Global invariants enforced in this crate:
// - The engine is a pure function from a report to a view model
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Metric order is the report's order and is never re-sorted
// - Identical input yields byte-for-byte identical output

pub mod config;
pub mod gate;
pub mod metrics;
pub mod recommend;
pub mod render;
pub mod report;
pub mod tier;
pub mod view;

pub use config::ResolvedConfig;
pub use gate::GateResult;
pub use recommend::{Recommendation, Severity};
pub use render::{render_json, render_markdown, render_text, RenderOptions};
pub use report::{load_report, MetricKind, MetricResult, PerformanceReport, Verdict};
pub use view::{assemble, ViewModel};
