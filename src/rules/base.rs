//! Base rule trait and types
//!
//! This module defines the contract every lint rule implements:
//! - `Rule` trait: a stable name plus a pure `apply` over one file
//! - `Argument`: the dynamically typed, rule-specific parameters
//! - `RuleError`: rejected arguments, reported before any file is analyzed

use crate::ast::FileModel;
use crate::models::Failure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One rule parameter as written in the configuration.
///
/// Rules give meaning to arguments by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Argument {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    List(Vec<Argument>),
    Table(BTreeMap<String, Argument>),
}

impl Argument {
    /// Get as i64 (floats are not truncated)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Argument::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Argument::Integer(v) => Some(*v as f64),
            Argument::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Argument::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Argument::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Argument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Argument::Integer(v) => write!(f, "{v}"),
            Argument::Float(v) => write!(f, "{v}"),
            Argument::Boolean(v) => write!(f, "{v}"),
            Argument::String(v) => write!(f, "{v:?}"),
            Argument::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            Argument::Table(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k} = {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("rule '{rule}': invalid argument #{index} ({found}): {reason}")]
    InvalidArgument {
        rule: &'static str,
        index: usize,
        found: String,
        reason: String,
    },

    #[error("rule '{rule}' accepts at most {max} argument(s), got {got}")]
    TooManyArguments {
        rule: &'static str,
        max: usize,
        got: usize,
    },
}

/// Trait for all lint rules
///
/// A rule is stateless: given the same file and arguments it returns the
/// same failures, in the same order, every time. It never mutates the file,
/// never logs and never touches the filesystem.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyRule;
///
/// impl Rule for MyRule {
///     fn name(&self) -> &'static str {
///         "my-rule"
///     }
///
///     fn description(&self) -> &'static str {
///         "Flags my specific pattern"
///     }
///
///     fn apply(&self, file: &FileModel, _arguments: &[Argument]) -> Vec<Failure> {
///         vec![]
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Unique, kebab-case identifier (e.g. "error-naming").
    ///
    /// Used as the configuration key, so it must not change between
    /// versions of the same rule.
    fn name(&self) -> &'static str;

    /// Human-readable description of what this rule flags
    fn description(&self) -> &'static str;

    /// Inspect one file and return every failure found.
    ///
    /// Inputs the rule cannot make sense of are skipped, never reported.
    fn apply(&self, file: &FileModel, arguments: &[Argument]) -> Vec<Failure>;

    /// Check arguments once, before analysis starts.
    ///
    /// Default: the rule takes no arguments and ignores whatever it is given.
    fn validate_arguments(&self, _arguments: &[Argument]) -> Result<(), RuleError> {
        Ok(())
    }
}
