//! JSON reporter
//!
//! Outputs the full LintReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::rules::LintReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &LintReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
