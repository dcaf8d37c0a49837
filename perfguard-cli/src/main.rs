//! PerfGuard CLI - renders pull-request performance reports

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical input yields byte-for-byte identical output

mod source;

use anyhow::Context;
use clap::{Parser, Subcommand};
use perfguard_core::config::{self, ResolvedConfig};
use perfguard_core::{assemble, gate, render_json, render_markdown, render_text, RenderOptions};
use source::{load_or_fallback, ReportOrigin};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "perfguard")]
#[command(about = "Render pull-request performance reports and enforce the merge gate")]
#[command(version = env!("PERFGUARD_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a performance report with tiers and recommendations
    Render {
        /// Path to the report JSON written by the analysis tool
        #[arg(default_value = "perfguard_score.json")]
        report: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Minimum passing score for the merge status (overrides config file)
        #[arg(long)]
        min_score: Option<f64>,

        /// Fail instead of substituting the fallback report (overrides config file)
        #[arg(long)]
        no_fallback: bool,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Exit non-zero when the overall score is below the passing minimum
    Gate {
        /// Path to the report JSON written by the analysis tool
        #[arg(default_value = "perfguard_score.json")]
        report: PathBuf,

        /// Minimum passing score (overrides config file)
        #[arg(long)]
        min_score: Option<f64>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without rendering
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            report,
            format,
            output,
            min_score,
            no_fallback,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let min_passing_score = effective_min_score(min_score, &resolved)?;
            let allow_fallback = resolved.fallback && !no_fallback;

            let (report, origin) = load_or_fallback(&report, allow_fallback)?;
            if origin == ReportOrigin::Fallback {
                eprintln!("Warning: report unavailable, rendering fallback report");
            }

            let view = assemble(&report);
            let options = RenderOptions::from(&resolved);
            let rendered = match format {
                OutputFormat::Text => render_text(&view, &options),
                OutputFormat::Json => render_json(&view),
                OutputFormat::Markdown => {
                    let gate_result = gate::evaluate(&report, min_passing_score);
                    render_markdown(&view, &gate_result, &options)
                }
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, &rendered)
                        .with_context(|| format!("failed to write output: {}", path.display()))?;
                    eprintln!("Report written to: {}", path.display());
                }
                None => print!("{}", rendered),
            }
        }
        Commands::Gate {
            report,
            min_score,
            config: config_path,
        } => {
            let resolved = load_config(config_path.as_deref())?;
            let min_passing_score = effective_min_score(min_score, &resolved)?;

            // The gate never runs on substituted data
            let (report, _) = load_or_fallback(&report, false)?;
            let result = gate::evaluate(&report, min_passing_score);

            println!("Score: {:.1} / 100", result.score);
            println!("Minimum: {:.1}", result.min_passing_score);
            println!("Status: {}", result.status.label());

            if result.is_blocked() {
                eprintln!(
                    "Performance score is {:.1} points below the passing minimum",
                    result.shortfall()
                );
                std::process::exit(1);
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                match config::load_and_resolve(&project_root, path.as_deref()) {
                    Ok(resolved) => match &resolved.config_path {
                        Some(p) => println!("Config valid: {}", p.display()),
                        None => println!("No config file found. Using defaults."),
                    },
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                match &resolved.config_path {
                    Some(p) => println!("  Source: {}", p.display()),
                    None => println!("  Source: defaults (no config file found)"),
                }
                println!();
                println!("Gate:");
                println!("  min_passing_score: {}", resolved.min_passing_score);
                println!();
                println!("Rendering:");
                println!("  max_hotspots: {}", resolved.max_hotspots);
                println!("  max_suggestions: {}", resolved.max_suggestions);
                println!();
                println!("Loading:");
                println!("  fallback: {}", resolved.fallback);
            }
        },
    }

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> anyhow::Result<ResolvedConfig> {
    let project_root = std::env::current_dir()?;
    let resolved = config::load_and_resolve(&project_root, config_path)
        .context("failed to load configuration")?;

    if let Some(path) = &resolved.config_path {
        eprintln!("Using config: {}", path.display());
    }
    Ok(resolved)
}

/// CLI flag overrides the config file value
fn effective_min_score(flag: Option<f64>, resolved: &ResolvedConfig) -> anyhow::Result<f64> {
    match flag {
        Some(score) if !(0.0..=100.0).contains(&score) => {
            anyhow::bail!("--min-score must be between 0 and 100 (got {})", score)
        }
        Some(score) => Ok(score),
        None => Ok(resolved.min_passing_score),
    }
}
