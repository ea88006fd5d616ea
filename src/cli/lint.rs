//! Lint command - discover Go files, run the rules, render the report

use anyhow::{Context, Result};
use globset::GlobSet;
use gocheck::config::{build_linter, load_config_file, load_project_config};
use gocheck::models::Severity;
use gocheck::parsers;
use gocheck::reporters::{report_with_format, OutputFormat, RenderOptions};
use gocheck::rules::LintReport;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info, warn};

/// Ignore file read next to `.gitignore` while walking
const IGNORE_FILE_NAME: &str = ".gocheckignore";

pub struct LintOptions<'a> {
    pub paths: &'a [PathBuf],
    pub config: Option<&'a Path>,
    pub format: OutputFormat,
    pub output: Option<&'a Path>,
    pub fail_on: Option<Severity>,
    pub color: bool,
}

/// Run the lint command; exit code 1 when the `--fail-on` threshold is met
pub fn run(options: LintOptions) -> Result<ExitCode> {
    let root = config_root(options.paths);
    let config = match options.config {
        Some(path) => load_config_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => load_project_config(&root),
    };

    let linter = build_linter(&config).context("Invalid configuration")?;
    let exclude = config
        .exclude
        .matcher()
        .context("Invalid exclude patterns")?;

    let files = collect_go_files(options.paths, &exclude)?;
    info!("Found {} Go files", files.len());

    let report = linter.lint_paths(&files);

    let render = RenderOptions {
        color: options.color && options.output.is_none() && console::colors_enabled(),
    };
    let rendered = report_with_format(&report, options.format, render)?;

    match options.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            debug!("Report written to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    let failed = options
        .fail_on
        .is_some_and(|threshold| threshold_met(&report, threshold));
    Ok(if failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

/// Directory the project config is discovered in: the first path, or its
/// parent when it is a file
fn config_root(paths: &[PathBuf]) -> PathBuf {
    match paths.first() {
        Some(p) if p.is_dir() => p.clone(),
        Some(p) => p
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        None => PathBuf::from("."),
    }
}

/// Whether the report contains anything at or above `threshold`.
/// Files that failed to parse count as errors.
pub fn threshold_met(report: &LintReport, threshold: Severity) -> bool {
    let has_errors = report.summary.errors > 0 || !report.parse_errors.is_empty();
    match threshold {
        Severity::Error => has_errors,
        Severity::Warning => has_errors || report.summary.total > 0,
    }
}

/// Collect Go files from files and directories, respecting .gitignore,
/// `.gocheckignore` and the configured excludes.
///
/// Files named explicitly are always linted; excludes apply while walking.
pub fn collect_go_files(paths: &[PathBuf], exclude: &GlobSet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if parsers::is_supported(path) {
                files.push(path.clone());
            } else {
                warn!("Skipping {}: not a Go file", path.display());
            }
            continue;
        }

        if !path.is_dir() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }

        let mut builder = WalkBuilder::new(path);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .require_git(false)
            .add_custom_ignore_filename(IGNORE_FILE_NAME);

        for entry in builder.build().flatten() {
            let file = entry.path();
            if !file.is_file() || !parsers::is_supported(file) {
                continue;
            }

            let relative = file.strip_prefix(path).unwrap_or(file);
            if exclude.is_match(relative) || exclude.is_match(file) {
                debug!("Excluded {}", file.display());
                continue;
            }

            files.push(file.to_path_buf());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}
