//! Library error type
//!
//! Errors only come from the layers around the rules (reading files,
//! parsing, loading configuration). Rules themselves never fail.

use crate::rules::RuleError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{filename}:{line}:{column}: syntax error")]
    Parse {
        filename: String,
        line: u32,
        column: u32,
    },

    #[error("parser setup failed: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    #[error("invalid TOML config {path}: {source}")]
    ConfigToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid JSON config {path}: {source}")]
    ConfigJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid exclude pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("unknown rule '{0}' in configuration")]
    UnknownRule(String),

    #[error(transparent)]
    Rule(#[from] RuleError),
}

pub type Result<T> = std::result::Result<T, Error>;
