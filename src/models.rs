//! Core data models for gocheck
//!
//! These models are shared by every rule and by the reporting layer:
//! source positions, failures, their categories and severities.

use serde::{Deserialize, Serialize};

/// A resolvable location inside one source file.
///
/// `line` and `column` are 1-based; `column` counts bytes, `offset` is the
/// 0-based byte offset from the start of the file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub filename: String,
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(filename: impl Into<String>, offset: usize, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            offset,
            line,
            column,
        }
    }

    /// Position of the first byte of `filename`
    pub fn start_of(filename: impl Into<String>) -> Self {
        Self::new(filename, 0, 1, 1)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

/// Category a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureCategory {
    BadPractice,
    Comments,
    Errors,
    Logic,
    Naming,
    Style,
}

impl std::fmt::Display for FailureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureCategory::BadPractice => write!(f, "bad-practice"),
            FailureCategory::Comments => write!(f, "comments"),
            FailureCategory::Errors => write!(f, "errors"),
            FailureCategory::Logic => write!(f, "logic"),
            FailureCategory::Naming => write!(f, "naming"),
            FailureCategory::Style => write!(f, "style"),
        }
    }
}

/// One finding emitted by a rule.
///
/// Failures are never mutated after a rule returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub position: Position,
    /// Fixed per rule, always within `0.0..=1.0`
    pub confidence: f64,
    pub category: FailureCategory,
    pub message: String,
}

/// Severity assigned to a failure by configuration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!(
                "unknown severity '{}', expected 'warning' or 'error'",
                other
            )),
        }
    }
}

/// A failure tagged with the rule that produced it and its effective severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleFailure {
    pub rule: String,
    pub severity: Severity,
    #[serde(flatten)]
    pub failure: Failure,
}

/// Count of failures per severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub errors: usize,
    pub warnings: usize,
    pub total: usize,
}

impl SeveritySummary {
    pub fn from_failures(failures: &[RuleFailure]) -> Self {
        let mut summary = Self::default();
        for f in failures {
            match f.severity {
                Severity::Error => summary.errors += 1,
                Severity::Warning => summary.warnings += 1,
            }
            summary.total += 1;
        }
        summary
    }
}
