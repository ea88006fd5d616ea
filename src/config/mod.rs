//! Configuration module for gocheck
//!
//! This module handles:
//! - Project-level configuration (gocheck.toml, .gocheck.json)
//! - Per-rule enablement, severity, arguments and excludes
//! - Path exclusion patterns

mod project_config;

pub use project_config::{
    build_linter, compile_globs, load_config_file, load_project_config, normalize_rule_name,
    ExcludeConfig, ProjectConfig, RuleConfigOverride, DEFAULT_CONFIG_TEMPLATE,
    DEFAULT_EXCLUDE_PATTERNS, JSON_CONFIG_FILE, TOML_CONFIG_FILE,
};
