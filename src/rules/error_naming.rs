//! Error variable naming
//!
//! Package-level error values built with `errors.New` or `fmt.Errorf`
//! should be named `ErrFoo` when exported and `errFoo` otherwise.

use crate::ast::{is_pkg_dot_name, DeclToken, Expr, FileModel, Spec, ValueSpec};
use crate::models::{Failure, FailureCategory};
use crate::rules::base::{Argument, Rule};

/// Calls known to construct a fresh error value, as `(package, function)`
pub const CONSTRUCTOR_CALLS: &[(&str, &str)] = &[("errors", "New"), ("fmt", "Errorf")];

/// The blank identifier; `var _ = errors.New(..)` shows up in benchmarks and examples
pub const DISCARD_IDENT: &str = "_";

pub const ERROR_NAMING_CONFIDENCE: f64 = 0.9;

const EXPORTED_PREFIX: &str = "Err";
const UNEXPORTED_PREFIX: &str = "err";

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorNamingRule;

impl ErrorNamingRule {
    pub fn new() -> Self {
        Self
    }

    fn is_constructor_call(expr: &Expr) -> bool {
        match expr {
            Expr::Call { function, .. } => CONSTRUCTOR_CALLS
                .iter()
                .any(|(pkg, name)| is_pkg_dot_name(function, pkg, name)),
            Expr::Ident(_) | Expr::Selector { .. } | Expr::BasicLit { .. } | Expr::Other { .. } => {
                false
            }
        }
    }

    fn check_spec(spec: &ValueSpec) -> Option<Failure> {
        let ([id], [value]) = (spec.names.as_slice(), spec.values.as_slice()) else {
            return None;
        };
        if !Self::is_constructor_call(value) || id.name == DISCARD_IDENT {
            return None;
        }

        let prefix = if id.is_exported() {
            EXPORTED_PREFIX
        } else {
            UNEXPORTED_PREFIX
        };
        if id.name.starts_with(prefix) {
            return None;
        }

        Some(Failure {
            position: id.pos.clone(),
            confidence: ERROR_NAMING_CONFIDENCE,
            category: FailureCategory::Naming,
            message: format!(
                "error var {} should have name of the form {}Foo",
                id.name, prefix
            ),
        })
    }
}

impl Rule for ErrorNamingRule {
    fn name(&self) -> &'static str {
        "error-naming"
    }

    fn description(&self) -> &'static str {
        "Requires Err/err prefixes on package-level error variables"
    }

    fn apply(&self, file: &FileModel, _arguments: &[Argument]) -> Vec<Failure> {
        file.gen_decls(DeclToken::Var)
            .flat_map(|decl| decl.specs.iter())
            .filter_map(|spec| match spec {
                Spec::Value(value_spec) => Self::check_spec(value_spec),
                Spec::Type { .. } | Spec::Import { .. } => None,
            })
            .collect()
    }
}
