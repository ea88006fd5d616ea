use super::*;
use crate::rules::RuleError;

#[test]
fn test_normalize_rule_name() {
    assert_eq!(normalize_rule_name("ErrorNamingRule"), "error-naming");
    assert_eq!(normalize_rule_name("error_naming"), "error-naming");
    assert_eq!(normalize_rule_name("error-naming"), "error-naming");
    assert_eq!(normalize_rule_name("WarningComment"), "warning-comment");
    assert_eq!(normalize_rule_name(" comments-density "), "comments-density");
}

#[test]
fn test_default_config() {
    let config = ProjectConfig::default();

    assert!((config.confidence - 0.8).abs() < 1e-9);
    assert_eq!(config.severity, Severity::Warning);
    assert!(config.is_rule_enabled("error-naming"));
    assert!(config.is_rule_enabled("warning-comment"));
    assert!(config.rule_override("error-naming").is_none());
    assert!(config.disabled_rules().is_empty());
}

#[test]
fn test_effective_exclude_patterns() {
    let config = ExcludeConfig {
        paths: vec!["gen/**".into(), "**/vendor/**".into()],
        skip_defaults: false,
    };
    assert_eq!(
        config.effective_patterns(),
        vec!["**/vendor/**", "**/testdata/**", "gen/**"]
    );

    let only_user = ExcludeConfig {
        paths: vec!["gen/**".into()],
        skip_defaults: true,
    };
    assert_eq!(only_user.effective_patterns(), vec!["gen/**"]);
}

#[test]
fn test_exclude_matcher() {
    let matcher = ExcludeConfig::default().matcher().unwrap();
    assert!(matcher.is_match("vendor/github.com/x/y.go"));
    assert!(matcher.is_match("./pkg/vendor/y.go"));
    assert!(matcher.is_match("internal/testdata/broken.go"));
    assert!(!matcher.is_match("internal/server.go"));

    let none = ExcludeConfig {
        paths: vec![],
        skip_defaults: true,
    };
    assert!(!none.matcher().unwrap().is_match("vendor/a.go"));
}

#[test]
fn test_invalid_glob_is_rejected() {
    let err = compile_globs(&["src/[".to_string()]).unwrap_err();
    assert!(matches!(err, Error::Glob { pattern, .. } if pattern == "src/["));
    assert!(compile_globs(&[]).unwrap().is_none());
}

#[test]
fn test_parse_toml_config() {
    let toml_content = r#"
confidence = 0.5
severity = "error"

[rules.warning-comment]
severity = "warning"
exclude = ["**/generated/**"]

[rules.comments_density]
arguments = [60]

[rules.ErrorNamingRule]
enabled = false

[exclude]
paths = ["legacy/**"]
skip_defaults = true
"#;

    let config: ProjectConfig = toml::from_str(toml_content).expect("parse project config");

    assert!((config.confidence - 0.5).abs() < 1e-9);
    assert_eq!(config.severity_for("warning-comment"), Severity::Warning);
    assert_eq!(config.severity_for("comments-density"), Severity::Error);
    assert_eq!(config.arguments_for("comments-density"), &[Argument::Integer(60)]);
    assert!(config.arguments_for("warning-comment").is_empty());
    assert!(!config.is_rule_enabled("error-naming"));
    assert_eq!(config.disabled_rules(), vec!["error-naming"]);
    assert_eq!(config.exclude.effective_patterns(), vec!["legacy/**"]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_enable_all_rules_false_runs_listed_rules_only() {
    let config: ProjectConfig = toml::from_str(
        r#"
enable_all_rules = false

[rules.warning-comment]
"#,
    )
    .unwrap();

    assert!(config.is_rule_enabled("warning-comment"));
    assert!(!config.is_rule_enabled("error-naming"));

    let linter = build_linter(&config).unwrap();
    let names: Vec<&str> = linter.rules().iter().map(|r| r.name()).collect();
    assert_eq!(names, vec!["warning-comment"]);
}

#[test]
fn test_unknown_rule_is_rejected() {
    let config: ProjectConfig = toml::from_str("[rules.no-such-rule]\nenabled = true\n").unwrap();
    assert!(matches!(config.validate(), Err(Error::UnknownRule(name)) if name == "no-such-rule"));
    assert!(matches!(build_linter(&config), Err(Error::UnknownRule(_))));
}

#[test]
fn test_invalid_arguments_are_rejected() {
    let config: ProjectConfig =
        toml::from_str("[rules.comments-density]\narguments = [\"lots\"]\n").unwrap();
    assert!(matches!(
        build_linter(&config),
        Err(Error::Rule(RuleError::InvalidArgument { index: 0, .. }))
    ));
}

#[test]
fn test_build_linter_applies_overrides() {
    let config: ProjectConfig = toml::from_str(
        r#"
confidence = 0.95

[rules.warning-comment]
severity = "error"
exclude = ["**/gen/**"]
"#,
    )
    .unwrap();

    let linter = build_linter(&config).unwrap();
    assert!((linter.min_confidence() - 0.95).abs() < 1e-9);
    assert_eq!(linter.rules().len(), 3);

    let warning = linter
        .rules()
        .iter()
        .find(|r| r.name() == "warning-comment")
        .unwrap();
    assert_eq!(warning.severity, Severity::Error);
    assert!(warning.exclude.is_some());

    let source = "package p\n\n// TODO: x\nvar Foo = errors.New(\"x\")\n";
    let failures = linter.lint_source(source, "a.go").unwrap();
    // error-naming reports at 0.9, below the configured minimum
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].rule, "warning-comment");
    assert_eq!(failures[0].severity, Severity::Error);
    assert!(linter.lint_source(source, "x/gen/a.go").unwrap().is_empty());
}

#[test]
fn test_default_template_parses() {
    let config: ProjectConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
    assert!(config.validate().is_ok());
    assert!(build_linter(&config).is_ok());
    assert_eq!(config.rules.len(), 3);
}

#[test]
fn test_load_project_config_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(TOML_CONFIG_FILE),
        "[rules.comments-density]\narguments = [25]\n",
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.arguments_for("comments-density"), &[Argument::Integer(25)]);
}

#[test]
fn test_load_project_config_json() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(JSON_CONFIG_FILE),
        r#"{"severity": "error", "rules": {"warning-comment": {"enabled": false}}}"#,
    )
    .unwrap();

    let config = load_project_config(dir.path());
    assert_eq!(config.severity, Severity::Error);
    assert!(!config.is_rule_enabled("warning-comment"));
}

#[test]
fn test_broken_discovered_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(TOML_CONFIG_FILE), "confidence = [not toml").unwrap();

    let config = load_project_config(dir.path());
    assert!((config.confidence - DEFAULT_MIN_CONFIDENCE).abs() < 1e-9);
}

#[test]
fn test_broken_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("custom.toml");
    std::fs::write(&toml_path, "confidence = [not toml").unwrap();
    assert!(matches!(
        load_config_file(&toml_path),
        Err(Error::ConfigToml { .. })
    ));

    let json_path = dir.path().join("custom.json");
    std::fs::write(&json_path, "{").unwrap();
    assert!(matches!(
        load_config_file(&json_path),
        Err(Error::ConfigJson { .. })
    ));

    assert!(matches!(
        load_config_file(&dir.path().join("absent.toml")),
        Err(Error::Io { .. })
    ));
}
