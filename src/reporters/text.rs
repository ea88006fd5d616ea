//! Text (terminal) reporter with colors

use crate::models::Severity;
use crate::rules::LintReport;
use std::fmt::Write;

/// Severity colors
fn severity_color(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",   // Red
        Severity::Warning => "\x1b[33m", // Yellow
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Wraps text in an escape sequence only when colors are on
struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, code: &str, text: impl std::fmt::Display) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

/// Render report as text: `path:line:col: [severity] rule: message`
pub fn render(report: &LintReport, color: bool) -> String {
    let p = Painter { color };
    let mut out = String::new();

    for f in &report.failures {
        let _ = writeln!(
            out,
            "{}: {} {}: {}",
            p.paint(BOLD, &f.failure.position),
            p.paint(severity_color(f.severity), format!("[{}]", f.severity)),
            p.paint(DIM, &f.rule),
            f.failure.message
        );
    }

    for e in &report.parse_errors {
        let _ = writeln!(
            out,
            "{}: {}",
            p.paint(BOLD, &e.path),
            p.paint(severity_color(Severity::Error), format!("[parse] {}", e.message))
        );
    }

    if !report.failures.is_empty() || !report.parse_errors.is_empty() {
        out.push('\n');
    }

    let s = &report.summary;
    let _ = write!(
        out,
        "{} files analyzed: {} failures ({}, {})",
        report.files_analyzed,
        s.total,
        p.paint(severity_color(Severity::Error), format!("{} errors", s.errors)),
        p.paint(
            severity_color(Severity::Warning),
            format!("{} warnings", s.warnings)
        ),
    );
    if !report.parse_errors.is_empty() {
        let _ = write!(out, ", {} files could not be parsed", report.parse_errors.len());
    }
    out.push('\n');

    out
}
