//! Warning comments
//!
//! Flags comments that open with a work marker (TODO, FIXME, XXX) so that
//! unresolved work shows up next to other lint findings.

use crate::ast::{Comment, FileModel};
use crate::models::{Failure, FailureCategory};
use crate::rules::base::{Argument, Rule};
use regex::Regex;

/// Case-insensitive marker at the start of the comment body
pub const WARNING_PATTERN: &str = r"(?i)^[\s*]*(TODO|FIXME|XXX)";

pub const WARNING_COMMENT_CONFIDENCE: f64 = 1.0;

pub const WARNING_COMMENT_MESSAGE: &str = "warning comment detected, consider resolving the issue";

/// `//go:generate`, `//go:build` and friends
const DIRECTIVE_PREFIX: &str = "//go:";

const LINE_OPEN: &str = "//";
const BLOCK_OPEN: &str = "/*";
const BLOCK_CLOSE: &str = "*/";

/// Delimiter shape of a comment token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommentKind<'a> {
    Directive,
    /// Text after `//`
    Line(&'a str),
    /// Text between `/*` and `*/`
    Block(&'a str),
    Unknown,
}

impl<'a> CommentKind<'a> {
    fn classify(text: &'a str) -> Self {
        if text.starts_with(DIRECTIVE_PREFIX) {
            return CommentKind::Directive;
        }
        if let Some(body) = text.strip_prefix(LINE_OPEN) {
            return CommentKind::Line(body);
        }
        if let Some(body) = text.strip_prefix(BLOCK_OPEN) {
            return CommentKind::Block(body.strip_suffix(BLOCK_CLOSE).unwrap_or(body));
        }
        CommentKind::Unknown
    }
}

#[derive(Debug, Clone)]
pub struct WarningCommentRule {
    pattern: Regex,
}

impl WarningCommentRule {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(WARNING_PATTERN).expect("valid regex"),
        }
    }

    /// Use a caller-supplied marker pattern instead of [`WARNING_PATTERN`]
    pub fn with_pattern(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn is_warning(&self, comment: &Comment) -> bool {
        match CommentKind::classify(&comment.text) {
            CommentKind::Line(body) => self.pattern.is_match(body),
            // Only the line right after `/*` names the comment's topic
            CommentKind::Block(body) => body
                .split('\n')
                .next()
                .is_some_and(|first| self.pattern.is_match(first)),
            CommentKind::Directive | CommentKind::Unknown => false,
        }
    }
}

impl Default for WarningCommentRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for WarningCommentRule {
    fn name(&self) -> &'static str {
        "warning-comment"
    }

    fn description(&self) -> &'static str {
        "Finds comments starting with TODO, FIXME or XXX"
    }

    fn apply(&self, file: &FileModel, _arguments: &[Argument]) -> Vec<Failure> {
        file.comments()
            .iter()
            .flat_map(|group| group.list.iter())
            .filter(|comment| self.is_warning(comment))
            .map(|comment| Failure {
                position: comment.pos.clone(),
                confidence: WARNING_COMMENT_CONFIDENCE,
                category: FailureCategory::Style,
                message: WARNING_COMMENT_MESSAGE.to_string(),
            })
            .collect()
    }
}
