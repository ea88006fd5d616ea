//! Project-level configuration support
//!
//! Loads per-project configuration from `gocheck.toml` or `.gocheck.json`
//! in the analysis root, or from an explicit path.
//!
//! # Configuration Format
//!
//! ```toml
//! # gocheck.toml
//! confidence = 0.8
//! severity = "warning"
//! enable_all_rules = true
//!
//! [rules.warning-comment]
//! severity = "error"
//! exclude = ["**/generated/**"]
//!
//! [rules.comments-density]
//! arguments = [60]
//!
//! [exclude]
//! paths = ["internal/legacy/**"]
//! ```

use crate::error::{Error, Result};
use crate::models::Severity;
use crate::rules::{all_rules, find_rule, Argument, ConfiguredRule, Linter, DEFAULT_MIN_CONFIDENCE};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Built-in exclusion patterns for vendored code and test fixtures.
/// These are applied automatically unless `skip_defaults = true` in config.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["**/vendor/**", "**/testdata/**"];

pub const TOML_CONFIG_FILE: &str = "gocheck.toml";
pub const JSON_CONFIG_FILE: &str = ".gocheck.json";

/// Written by `gocheck init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# gocheck configuration

# Failures reported with a lower confidence are dropped
confidence = 0.8

# Severity for rules that do not set their own: "warning" or "error"
severity = "warning"

# When false, only the rules listed under [rules] run
enable_all_rules = true

[rules.error-naming]
enabled = true

[rules.warning-comment]
enabled = true

[rules.comments-density]
enabled = true
arguments = [0]

[exclude]
paths = []
skip_defaults = false
"#;

/// Project-level configuration loaded from gocheck.toml or .gocheck.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Minimum confidence a failure needs to be reported
    #[serde(default = "default_confidence")]
    pub confidence: f64,

    /// Default severity for every rule
    #[serde(default)]
    pub severity: Severity,

    /// Run rules absent from `rules` (default: true)
    #[serde(default = "default_true")]
    pub enable_all_rules: bool,

    /// Per-rule overrides, keyed by rule name
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfigOverride>,

    /// Path exclusion patterns
    #[serde(default)]
    pub exclude: ExcludeConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            confidence: default_confidence(),
            severity: Severity::default(),
            enable_all_rules: true,
            rules: BTreeMap::new(),
            exclude: ExcludeConfig::default(),
        }
    }
}

fn default_confidence() -> f64 {
    DEFAULT_MIN_CONFIDENCE
}

fn default_true() -> bool {
    true
}

/// Configuration override for a specific rule
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuleConfigOverride {
    #[serde(default)]
    pub enabled: Option<bool>,

    #[serde(default)]
    pub severity: Option<Severity>,

    /// Positional rule arguments
    #[serde(default)]
    pub arguments: Vec<Argument>,

    /// Glob patterns of files this rule skips
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Path exclusion configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExcludeConfig {
    /// Paths/patterns to exclude from analysis
    #[serde(default)]
    pub paths: Vec<String>,

    /// If true, disable built-in default exclusion patterns
    #[serde(default)]
    pub skip_defaults: bool,
}

impl ExcludeConfig {
    /// Returns effective exclusion patterns (defaults + user patterns).
    /// If `skip_defaults` is true, only user patterns are returned.
    pub fn effective_patterns(&self) -> Vec<String> {
        let mut patterns = Vec::new();

        if !self.skip_defaults {
            patterns.extend(DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()));
        }

        for p in &self.paths {
            if !patterns.contains(p) {
                patterns.push(p.clone());
            }
        }

        patterns
    }

    pub fn matcher(&self) -> Result<GlobSet> {
        Ok(compile_globs(&self.effective_patterns())?.unwrap_or_else(GlobSet::empty))
    }
}

/// Compile patterns into one set; `None` when there are no patterns
pub fn compile_globs(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| Error::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }

    builder.build().map(Some).map_err(|source| Error::Glob {
        pattern: patterns.join(", "),
        source,
    })
}

/// Load project configuration from the analysis root.
///
/// Searches for configuration files in this order:
/// 1. `gocheck.toml`
/// 2. `.gocheck.json`
///
/// Returns default configuration if no usable config file is found.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    for name in [TOML_CONFIG_FILE, JSON_CONFIG_FILE] {
        let path = root.join(name);
        if !path.exists() {
            continue;
        }
        match load_config_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from an explicit file; `.json` files are read as JSON,
/// everything else as TOML
pub fn load_config_file(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_json = path.extension().and_then(|e| e.to_str()) == Some("json");
    if is_json {
        serde_json::from_str(&content).map_err(|source| Error::ConfigJson {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&content).map_err(|source| Error::ConfigToml {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ProjectConfig {
    /// Override for a rule, matching keys in any supported spelling
    pub fn rule_override(&self, name: &str) -> Option<&RuleConfigOverride> {
        let normalized = normalize_rule_name(name);

        self.rules.get(&normalized).or_else(|| {
            self.rules
                .iter()
                .find(|(key, _)| normalize_rule_name(key) == normalized)
                .map(|(_, value)| value)
        })
    }

    /// Check if a rule is enabled.
    ///
    /// A listed rule runs unless `enabled = false`; an unlisted one runs when
    /// `enable_all_rules` is set.
    pub fn is_rule_enabled(&self, name: &str) -> bool {
        match self.rule_override(name) {
            Some(o) => o.enabled.unwrap_or(true),
            None => self.enable_all_rules,
        }
    }

    /// Effective severity for a rule
    pub fn severity_for(&self, name: &str) -> Severity {
        self.rule_override(name)
            .and_then(|o| o.severity)
            .unwrap_or(self.severity)
    }

    /// Arguments configured for a rule (empty if none)
    pub fn arguments_for(&self, name: &str) -> &[Argument] {
        self.rule_override(name)
            .map(|o| o.arguments.as_slice())
            .unwrap_or(&[])
    }

    /// Reject rule sections that do not name a built-in rule
    pub fn validate(&self) -> Result<()> {
        for key in self.rules.keys() {
            if find_rule(&normalize_rule_name(key)).is_none() {
                return Err(Error::UnknownRule(key.clone()));
            }
        }
        Ok(())
    }

    /// Names of built-in rules that will not run
    pub fn disabled_rules(&self) -> Vec<&'static str> {
        all_rules()
            .iter()
            .map(|r| r.name())
            .filter(|name| !self.is_rule_enabled(name))
            .collect()
    }
}

/// Build a [`Linter`] running every enabled rule with its configured
/// arguments, severity and excludes
pub fn build_linter(config: &ProjectConfig) -> Result<Linter> {
    config.validate()?;

    if !(0.0..=1.0).contains(&config.confidence) {
        warn!(
            "confidence {} is outside 0..=1 and will be clamped",
            config.confidence
        );
    }

    let mut builder = Linter::builder().min_confidence(config.confidence);
    for rule in all_rules() {
        let name = rule.name();
        if !config.is_rule_enabled(name) {
            debug!("Rule {} disabled by config", name);
            continue;
        }

        let arguments = config.arguments_for(name).to_vec();
        rule.validate_arguments(&arguments)?;

        let mut configured = ConfiguredRule::new(rule)
            .with_arguments(arguments)
            .with_severity(config.severity_for(name));

        let excludes = config
            .rule_override(name)
            .map(|o| o.exclude.as_slice())
            .unwrap_or(&[]);
        if let Some(set) = compile_globs(excludes)? {
            configured = configured.with_exclude(set);
        }

        builder = builder.configured(configured);
    }

    Ok(builder.build())
}

/// Normalize rule name for config lookup
/// Converts various formats to kebab-case for matching
pub fn normalize_rule_name(name: &str) -> String {
    // ErrorNamingRule -> error-naming
    // error_naming -> error-naming
    // error-naming -> error-naming

    let mut result = String::new();
    let chars: Vec<char> = name.trim().chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev_is_lower = i > 0 && chars[i - 1].is_lowercase();
            let is_acronym_end = i > 0
                && chars[i - 1].is_uppercase()
                && i + 1 < chars.len()
                && chars[i + 1].is_lowercase();

            if prev_is_lower || is_acronym_end {
                result.push('-');
            }
            result.extend(c.to_lowercase());
        } else if *c == '_' {
            result.push('-');
        } else {
            result.push(*c);
        }
    }

    result.trim_end_matches("-rule").to_string()
}

#[cfg(test)]
mod tests;
