//! Comment density
//!
//! Requires a minimum share of comment lines, in percent of all non-blank
//! lines. Takes one optional integer argument, the minimum (default 0).

use crate::ast::FileModel;
use crate::models::{Failure, FailureCategory, Position};
use crate::rules::base::{Argument, Rule, RuleError};
use std::collections::BTreeSet;

pub const DEFAULT_MIN_DENSITY: i64 = 0;

pub const COMMENTS_DENSITY_CONFIDENCE: f64 = 1.0;

const RULE_NAME: &str = "comments-density";

/// Line counts of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCounts {
    pub comment_lines: usize,
    pub code_lines: usize,
}

impl LineCounts {
    /// Percentage of comment lines; 0 for a file with neither kind
    pub fn density(&self) -> f64 {
        let total = self.comment_lines + self.code_lines;
        if total == 0 {
            return 0.0;
        }
        self.comment_lines as f64 * 100.0 / total as f64
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CommentsDensityRule;

impl CommentsDensityRule {
    pub fn new() -> Self {
        Self
    }

    fn minimum(arguments: &[Argument]) -> Result<i64, RuleError> {
        match arguments {
            [] => Ok(DEFAULT_MIN_DENSITY),
            [arg] => match arg.as_i64() {
                Some(v) if (0..=100).contains(&v) => Ok(v),
                Some(_) => Err(RuleError::InvalidArgument {
                    rule: RULE_NAME,
                    index: 0,
                    found: arg.to_string(),
                    reason: "minimum density must be between 0 and 100".into(),
                }),
                None => Err(RuleError::InvalidArgument {
                    rule: RULE_NAME,
                    index: 0,
                    found: arg.to_string(),
                    reason: "expected an integer percentage".into(),
                }),
            },
            _ => Err(RuleError::TooManyArguments {
                rule: RULE_NAME,
                max: 1,
                got: arguments.len(),
            }),
        }
    }

    /// Count comment lines and code lines.
    ///
    /// Code lines are lines with non-whitespace text once every comment
    /// token has been blanked out.
    pub fn count_lines(file: &FileModel) -> LineCounts {
        let mut comment_lines = BTreeSet::new();
        let mut masked = file.content().as_bytes().to_vec();

        for comment in file.comments().iter().flat_map(|g| g.list.iter()) {
            comment_lines.extend(comment.pos.line..=comment.end.line.max(comment.pos.line));

            let start = comment.pos.offset.min(masked.len());
            let end = comment.end.offset.clamp(start, masked.len());
            for byte in &mut masked[start..end] {
                if *byte != b'\n' {
                    *byte = b' ';
                }
            }
        }

        let code_lines = masked
            .split(|b| *b == b'\n')
            .filter(|line| line.iter().any(|b| !b.is_ascii_whitespace()))
            .count();

        LineCounts {
            comment_lines: comment_lines.len(),
            code_lines,
        }
    }
}

impl Rule for CommentsDensityRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Requires a minimum percentage of comment lines per file"
    }

    fn apply(&self, file: &FileModel, arguments: &[Argument]) -> Vec<Failure> {
        let minimum = Self::minimum(arguments).unwrap_or(DEFAULT_MIN_DENSITY);
        let counts = Self::count_lines(file);
        let density = counts.density();

        if density >= minimum as f64 {
            return vec![];
        }

        vec![Failure {
            position: Position::start_of(file.name()),
            confidence: COMMENTS_DENSITY_CONFIDENCE,
            category: FailureCategory::Style,
            message: format!(
                "the file has a comment density of {:.0}% ({} comment lines for {} code lines) but expected a minimum of {}%",
                density, counts.comment_lines, counts.code_lines, minimum
            ),
        }]
    }

    fn validate_arguments(&self, arguments: &[Argument]) -> Result<(), RuleError> {
        Self::minimum(arguments).map(|_| ())
    }
}
