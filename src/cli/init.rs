//! Init command - write a default gocheck.toml

use anyhow::{Context, Result};
use console::style;
use gocheck::config::{DEFAULT_CONFIG_TEMPLATE, TOML_CONFIG_FILE};
use std::path::{Path, PathBuf};

/// Run the init command; never overwrites an existing config
pub fn run(path: &Path) -> Result<PathBuf> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(TOML_CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!(
            "{} already exists, remove it first to regenerate",
            config_path.display()
        );
    }

    std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    Ok(config_path)
}
