//! gocheck - lint rules for Go sources
//!
//! The library behind the `gocheck` binary. Parse a file with
//! [`parsers::go`], run [`rules`] over it through a [`rules::Linter`] and
//! render the result with [`reporters`].

pub mod ast;
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod reporters;
pub mod rules;

pub use error::{Error, Result};
