//! Lint rules
//!
//! This module provides the rule framework and the built-in rules.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Linter                              │
//! │  - Holds configured rules (arguments, severity, excludes)   │
//! │  - Parses files in parallel (rayon)                         │
//! │  - Tags, filters and sorts failures                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Rule Trait                           │
//! │  - name(): Unique identifier, used as config key            │
//! │  - apply(file, arguments): pure, returns failures           │
//! │  - validate_arguments(): checked once at configuration      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Built-in rules
//!
//! - `error-naming` - `ErrFoo` / `errFoo` names for package-level error values
//! - `warning-comment` - comments opening with TODO, FIXME or XXX
//! - `comments-density` - minimum percentage of comment lines
//!
//! # Usage
//!
//! ```ignore
//! use gocheck::rules::{all_rules, Linter};
//!
//! let linter = Linter::builder().rules(all_rules()).build();
//! let report = linter.lint_paths(&paths);
//! ```

mod base;
mod engine;

mod comments_density;
mod error_naming;
mod warning_comment;

// Re-export base types
pub use base::{Argument, Rule, RuleError};

// Re-export engine
pub use engine::{
    ConfiguredRule, LintReport, Linter, LinterBuilder, ParseFailure, DEFAULT_MIN_CONFIDENCE,
};

pub use comments_density::{
    CommentsDensityRule, LineCounts, COMMENTS_DENSITY_CONFIDENCE, DEFAULT_MIN_DENSITY,
};
pub use error_naming::{
    ErrorNamingRule, CONSTRUCTOR_CALLS, DISCARD_IDENT, ERROR_NAMING_CONFIDENCE,
};
pub use warning_comment::{
    WarningCommentRule, WARNING_COMMENT_CONFIDENCE, WARNING_COMMENT_MESSAGE, WARNING_PATTERN,
};

use std::sync::Arc;

/// Every built-in rule, in a fixed order
pub fn all_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(ErrorNamingRule::new()),
        Arc::new(WarningCommentRule::new()),
        Arc::new(CommentsDensityRule::new()),
    ]
}

/// Look up a built-in rule by its name
pub fn find_rule(name: &str) -> Option<Arc<dyn Rule>> {
    all_rules().into_iter().find(|rule| rule.name() == name)
}
