//! Configuration file support for PerfGuard
//!
//! Loads project-specific configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.perfguardrc.json` in project root
//! 3. `perfguard.config.json` in project root
//! 4. `"perfguard"` key in `package.json`
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::gate::DEFAULT_MIN_PASSING_SCORE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default number of AI hotspots listed in rendered reports
pub const DEFAULT_MAX_HOTSPOTS: usize = 5;

/// Default number of AI suggestions listed in rendered reports
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// PerfGuard configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerfguardConfig {
    /// Minimum overall score required to merge (default: 80)
    #[serde(default)]
    pub min_passing_score: Option<f64>,

    /// Maximum AI hotspots listed per report (default: 5)
    #[serde(default)]
    pub max_hotspots: Option<usize>,

    /// Maximum AI suggestions listed per report (default: 5)
    #[serde(default)]
    pub max_suggestions: Option<usize>,

    /// Substitute the fallback report when the report cannot be loaded (default: true)
    #[serde(default)]
    pub fallback: Option<bool>,
}

/// Configuration with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub min_passing_score: f64,
    pub max_hotspots: usize,
    pub max_suggestions: usize,
    pub fallback: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl PerfguardConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(min) = self.min_passing_score {
            if !(0.0..=100.0).contains(&min) {
                anyhow::bail!("min_passing_score must be between 0 and 100 (got {})", min);
            }
        }

        if self.max_hotspots == Some(0) {
            anyhow::bail!("max_hotspots must be at least 1");
        }
        if self.max_suggestions == Some(0) {
            anyhow::bail!("max_suggestions must be at least 1");
        }

        Ok(())
    }

    /// Resolve config into its effective form
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        Ok(ResolvedConfig {
            min_passing_score: self.min_passing_score.unwrap_or(DEFAULT_MIN_PASSING_SCORE),
            max_hotspots: self.max_hotspots.unwrap_or(DEFAULT_MAX_HOTSPOTS),
            max_suggestions: self.max_suggestions.unwrap_or(DEFAULT_MAX_SUGGESTIONS),
            fallback: self.fallback.unwrap_or(true),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Self {
        ResolvedConfig {
            min_passing_score: DEFAULT_MIN_PASSING_SCORE,
            max_hotspots: DEFAULT_MAX_HOTSPOTS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            fallback: true,
            config_path: None,
        }
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Discover and load a config file from the project root
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(project_root: &Path) -> Result<Option<(PerfguardConfig, PathBuf)>> {
    // 1. .perfguardrc.json
    let rc_path = project_root.join(".perfguardrc.json");
    if rc_path.exists() {
        let config = load_config_file(&rc_path)?;
        return Ok(Some((config, rc_path)));
    }

    // 2. perfguard.config.json
    let config_path = project_root.join("perfguard.config.json");
    if config_path.exists() {
        let config = load_config_file(&config_path)?;
        return Ok(Some((config, config_path)));
    }

    // 3. package.json "perfguard" key
    let pkg_path = project_root.join("package.json");
    if pkg_path.exists() {
        if let Some(config) = load_from_package_json(&pkg_path)? {
            return Ok(Some((config, pkg_path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<PerfguardConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: PerfguardConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load perfguard config from the "perfguard" key in package.json
fn load_from_package_json(path: &Path) -> Result<Option<PerfguardConfig>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let pkg: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;

    match pkg.get("perfguard") {
        Some(value) => {
            let config: PerfguardConfig = serde_json::from_value(value.clone())
                .with_context(|| format!("invalid \"perfguard\" config in {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("invalid config in: {}", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

/// Load and resolve configuration
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config from the project root.
/// Returns default config if nothing is found.
pub fn load_and_resolve(project_root: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(project_root)? {
            Some((config, path)) => (config, Some(path)),
            None => (PerfguardConfig::default(), None),
        }
    };

    if let Some(path) = &source_path {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_default_config_is_valid() {
        let config = PerfguardConfig::default();
        config.validate().expect("default config should be valid");
        let resolved = config.resolve().expect("default config should resolve");
        assert_eq!(resolved, ResolvedConfig::defaults());
        assert_eq!(resolved.min_passing_score, 80.0);
        assert_eq!(resolved.max_hotspots, 5);
        assert_eq!(resolved.max_suggestions, 5);
        assert!(resolved.fallback);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "min_passing_score": 85,
            "max_hotspots": 3,
            "max_suggestions": 10,
            "fallback": false
        }"#;
        let config: PerfguardConfig = serde_json::from_str(json).unwrap();
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.min_passing_score, 85.0);
        assert_eq!(resolved.max_hotspots, 3);
        assert_eq!(resolved.max_suggestions, 10);
        assert!(!resolved.fallback);
    }

    #[test]
    fn test_reject_unknown_fields() {
        let json = r#"{"unknown_field": true}"#;
        let result: Result<PerfguardConfig, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_reject_out_of_range_min_score() {
        let config: PerfguardConfig = serde_json::from_str(r#"{"min_passing_score": 120}"#).unwrap();
        assert!(config.validate().is_err());
        let config: PerfguardConfig = serde_json::from_str(r#"{"min_passing_score": -1}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reject_zero_limits() {
        let config: PerfguardConfig = serde_json::from_str(r#"{"max_hotspots": 0}"#).unwrap();
        assert!(config.validate().is_err());
        let config: PerfguardConfig = serde_json::from_str(r#"{"max_suggestions": 0}"#).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_discover_perfguardrc() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".perfguardrc.json");
        fs::write(&config_path, r#"{"min_passing_score": 70}"#).unwrap();

        let (config, path) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.min_passing_score, Some(70.0));
        assert_eq!(path, config_path);
    }

    #[test]
    fn test_discover_package_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "dashboard", "perfguard": {"max_hotspots": 2}}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.max_hotspots, Some(2));
    }

    #[test]
    fn test_discover_package_json_without_perfguard_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "dashboard"}"#).unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".perfguardrc.json"), r#"{"min_passing_score": 60}"#).unwrap();
        fs::write(
            dir.path().join("perfguard.config.json"),
            r#"{"min_passing_score": 90}"#,
        )
        .unwrap();

        let (config, _) = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.min_passing_score,
            Some(60.0),
            ".perfguardrc.json should take priority"
        );
    }

    #[test]
    fn test_load_and_resolve_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = load_and_resolve(dir.path(), None).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.min_passing_score, 80.0);
    }

    #[test]
    fn test_load_and_resolve_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("custom.json");
        fs::write(&config_path, r#"{"fallback": false}"#).unwrap();

        let resolved = load_and_resolve(dir.path(), Some(&config_path)).unwrap();
        assert!(!resolved.fallback);
        assert_eq!(resolved.config_path, Some(config_path));
    }

    #[test]
    fn test_invalid_config_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".perfguardrc.json");
        fs::write(&config_path, r#"{"min_passing_score": 500}"#).unwrap();

        let err = load_config_file(&config_path).unwrap_err();
        assert!(format!("{:#}", err).contains(".perfguardrc.json"));
    }
}
