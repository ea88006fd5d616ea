//! Rule execution engine with parallel support
//!
//! The Linter runs every configured rule over every file:
//! - Parses files in parallel using rayon
//! - Applies each rule independently (rules share no state)
//! - Tags failures with rule name and severity, drops low-confidence ones
//! - Sorts the merged result so output does not depend on thread timing

use crate::ast::FileModel;
use crate::error::Result;
use crate::models::{RuleFailure, Severity, SeveritySummary};
use crate::parsers;
use crate::rules::base::{Argument, Rule};
use globset::GlobSet;
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Failures below this confidence are not reported unless configured otherwise
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.8;

/// A rule together with the settings it runs with
#[derive(Clone)]
pub struct ConfiguredRule {
    pub rule: Arc<dyn Rule>,
    pub arguments: Vec<Argument>,
    pub severity: Severity,
    /// Files matching these patterns are skipped by this rule only
    pub exclude: Option<GlobSet>,
}

impl ConfiguredRule {
    pub fn new(rule: Arc<dyn Rule>) -> Self {
        Self {
            rule,
            arguments: Vec::new(),
            severity: Severity::default(),
            exclude: None,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<Argument>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_exclude(mut self, exclude: GlobSet) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn name(&self) -> &'static str {
        self.rule.name()
    }

    fn applies_to(&self, filename: &str) -> bool {
        !self
            .exclude
            .as_ref()
            .is_some_and(|set| set.is_match(filename))
    }
}

impl std::fmt::Debug for ConfiguredRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfiguredRule")
            .field("rule", &self.rule.name())
            .field("arguments", &self.arguments)
            .field("severity", &self.severity)
            .field("exclude", &self.exclude.as_ref().map(GlobSet::len))
            .finish()
    }
}

/// A file that could not be analyzed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseFailure {
    pub path: String,
    pub message: String,
}

/// Everything one lint run produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintReport {
    pub failures: Vec<RuleFailure>,
    pub parse_errors: Vec<ParseFailure>,
    pub files_analyzed: usize,
    pub summary: SeveritySummary,
}

impl LintReport {
    pub fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }
}

/// Runs configured rules over Go files
#[derive(Debug)]
pub struct Linter {
    rules: Vec<ConfiguredRule>,
    min_confidence: f64,
    /// Number of worker threads (0 = rayon's global pool)
    workers: usize,
}

impl Linter {
    pub fn builder() -> LinterBuilder {
        LinterBuilder::new()
    }

    pub fn rules(&self) -> &[ConfiguredRule] {
        &self.rules
    }

    pub fn min_confidence(&self) -> f64 {
        self.min_confidence
    }

    /// Apply every rule to one already-parsed file
    pub fn lint_file(&self, file: &FileModel) -> Vec<RuleFailure> {
        let mut failures = Vec::new();

        for configured in &self.rules {
            if !configured.applies_to(file.name()) {
                debug!("{} excluded for {}", configured.name(), file.name());
                continue;
            }

            failures.extend(
                configured
                    .rule
                    .apply(file, &configured.arguments)
                    .into_iter()
                    .filter(|f| f.confidence >= self.min_confidence)
                    .map(|failure| RuleFailure {
                        rule: configured.name().to_string(),
                        severity: configured.severity,
                        failure,
                    }),
            );
        }

        sort_failures(&mut failures);
        failures
    }

    /// Parse `source` as the file `name` and lint it
    pub fn lint_source(&self, source: &str, name: &str) -> Result<Vec<RuleFailure>> {
        let file = parsers::go::parse_source(source, name)?;
        Ok(self.lint_file(&file))
    }

    /// Parse and lint every path; unparsable files land in `parse_errors`
    pub fn lint_paths(&self, paths: &[PathBuf]) -> LintReport {
        let start = Instant::now();

        let run = || {
            paths
                .par_iter()
                .map(|path| {
                    parsers::go::parse(path)
                        .map(|file| self.lint_file(&file))
                        .map_err(|e| ParseFailure {
                            path: path.display().to_string(),
                            message: e.to_string(),
                        })
                })
                .collect::<Vec<_>>()
        };

        let results = match self.thread_pool() {
            Some(pool) => pool.install(run),
            None => run(),
        };

        let mut report = LintReport::default();
        for result in results {
            match result {
                Ok(failures) => {
                    report.files_analyzed += 1;
                    report.failures.extend(failures);
                }
                Err(parse_failure) => {
                    warn!("Skipping {}: {}", parse_failure.path, parse_failure.message);
                    report.parse_errors.push(parse_failure);
                }
            }
        }

        sort_failures(&mut report.failures);
        report.summary = SeveritySummary::from_failures(&report.failures);

        info!(
            "Linted {} files with {} rules in {:?}: {} failures",
            report.files_analyzed,
            self.rules.len(),
            start.elapsed(),
            report.summary.total
        );
        report
    }

    fn thread_pool(&self) -> Option<rayon::ThreadPool> {
        if self.workers == 0 {
            return None;
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => Some(pool),
            Err(e) => {
                warn!("Falling back to the global thread pool: {}", e);
                None
            }
        }
    }
}

fn sort_failures(failures: &mut [RuleFailure]) {
    failures.sort_by(|a, b| {
        let pa = &a.failure.position;
        let pb = &b.failure.position;
        (&pa.filename, pa.line, pa.column, &a.rule).cmp(&(&pb.filename, pb.line, pb.column, &b.rule))
    });
}

/// Builder for [`Linter`]
#[derive(Debug)]
pub struct LinterBuilder {
    rules: Vec<ConfiguredRule>,
    min_confidence: f64,
    workers: usize,
}

impl LinterBuilder {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            workers: 0,
        }
    }

    /// Add a rule with default settings
    pub fn rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(ConfiguredRule::new(rule));
        self
    }

    /// Add several rules with default settings
    pub fn rules(mut self, rules: impl IntoIterator<Item = Arc<dyn Rule>>) -> Self {
        self.rules.extend(rules.into_iter().map(ConfiguredRule::new));
        self
    }

    pub fn configured(mut self, rule: ConfiguredRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn min_confidence(mut self, confidence: f64) -> Self {
        self.min_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn build(self) -> Linter {
        Linter {
            rules: self.rules,
            min_confidence: self.min_confidence,
            workers: self.workers,
        }
    }
}

impl Default for LinterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Failure, FailureCategory, Position};
    use crate::rules::{all_rules, ErrorNamingRule, WarningCommentRule};
    use globset::{Glob, GlobSetBuilder};

    const SOURCE: &str = r#"package p

// TODO: tidy up
var Foo = errors.New("x")
"#;

    /// Emits one failure per file at a fixed, low confidence
    struct LowConfidenceRule;

    impl Rule for LowConfidenceRule {
        fn name(&self) -> &'static str {
            "low-confidence"
        }
        fn description(&self) -> &'static str {
            "test rule"
        }
        fn apply(&self, file: &FileModel, _arguments: &[Argument]) -> Vec<Failure> {
            vec![Failure {
                position: Position::start_of(file.name()),
                confidence: 0.5,
                category: FailureCategory::Logic,
                message: "maybe".into(),
            }]
        }
    }

    #[test]
    fn test_lint_source_tags_and_sorts() {
        let linter = Linter::builder().rules(all_rules()).build();
        let failures = linter.lint_source(SOURCE, "p.go").expect("should parse");
        let rules: Vec<&str> = failures.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["warning-comment", "error-naming"]);
        assert!(failures.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn test_min_confidence_filters() {
        let linter = Linter::builder()
            .rule(Arc::new(LowConfidenceRule))
            .build();
        assert!(linter.lint_source(SOURCE, "p.go").unwrap().is_empty());

        let permissive = Linter::builder()
            .rule(Arc::new(LowConfidenceRule))
            .min_confidence(0.5)
            .build();
        assert_eq!(permissive.lint_source(SOURCE, "p.go").unwrap().len(), 1);

        let strict = Linter::builder()
            .rules(all_rules())
            .min_confidence(0.95)
            .build();
        let rules: Vec<String> = strict
            .lint_source(SOURCE, "p.go")
            .unwrap()
            .into_iter()
            .map(|f| f.rule)
            .collect();
        assert_eq!(rules, vec!["warning-comment"]);
    }

    #[test]
    fn test_severity_and_exclude() {
        let mut globs = GlobSetBuilder::new();
        globs.add(Glob::new("**/gen/**").unwrap());
        let linter = Linter::builder()
            .configured(
                ConfiguredRule::new(Arc::new(WarningCommentRule::new()))
                    .with_severity(Severity::Error)
                    .with_exclude(globs.build().unwrap()),
            )
            .configured(ConfiguredRule::new(Arc::new(ErrorNamingRule::new())))
            .build();

        let failures = linter.lint_source(SOURCE, "src/p.go").unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].severity, Severity::Error);

        let generated = linter.lint_source(SOURCE, "src/gen/p.go").unwrap();
        assert_eq!(generated.len(), 1);
        assert_eq!(generated[0].rule, "error-naming");
    }

    #[test]
    fn test_lint_paths_collects_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.go");
        let bad = dir.path().join("bad.go");
        let missing = dir.path().join("missing.go");
        std::fs::write(&good, SOURCE).unwrap();
        std::fs::write(&bad, "package p\n\nfunc {{{\n").unwrap();

        let linter = Linter::builder().rules(all_rules()).workers(2).build();
        let report = linter.lint_paths(&[good.clone(), bad, missing]);

        assert_eq!(report.files_analyzed, 1);
        assert_eq!(report.parse_errors.len(), 2);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.warnings, 2);
        assert!(!report.has_errors());
        assert!(report
            .failures
            .iter()
            .all(|f| f.failure.position.filename == good.display().to_string()));
    }

    #[test]
    fn test_lint_paths_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = (0..8)
            .map(|i| {
                let path = dir.path().join(format!("f{i}.go"));
                std::fs::write(&path, SOURCE).unwrap();
                path
            })
            .collect();

        let linter = Linter::builder().rules(all_rules()).build();
        let first = linter.lint_paths(&paths);
        let second = linter.lint_paths(&paths);
        assert_eq!(first.failures, second.failures);
        assert_eq!(first.failures.len(), 16);
    }
}
