//! Integration tests for taglint

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use taglint::{
    lang::LangClass,
    rules::LangStyle,
    Config, ConfigError, Issue, LintError, Linter, LinterOptions, Location, Node, ReportedIssue,
    Rule, RuleContext, RuleError, Severity, Token,
};

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Reports `F001` once per tag node
struct Foo;

impl Rule for Foo {
    fn name(&self) -> &str {
        "foo"
    }

    fn lint(&self, node: &Node, _: &Value, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        match node {
            Node::Tag(tag) => ctx.report(ReportedIssue::new("F001", tag.open.loc)),
            _ => Ok(()),
        }
    }
}

struct Broken {
    calls: AtomicUsize,
}

impl Rule for Broken {
    fn name(&self) -> &str {
        "broken"
    }

    fn lint(&self, _: &Node, _: &Value, _: &mut RuleContext<'_>) -> Result<(), RuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RuleError::Failed("boom".to_string()))
    }
}

fn linter_with(rules: Vec<Arc<dyn Rule>>, raw: Value) -> Linter {
    let mut config = Config::new(rules).unwrap();
    config.apply(raw.as_object().unwrap()).unwrap();
    Linter::new(LinterOptions::default()).unwrap().with_config(config)
}

fn builtin_linter(raw: Value) -> Linter {
    let mut config = Config::with_builtin_rules();
    config.apply(raw.as_object().unwrap()).unwrap();
    Linter::new(LinterOptions::default()).unwrap().with_config(config)
}

fn codes(issues: &[Issue]) -> Vec<&str> {
    issues.iter().map(|i| i.code.as_str()).collect()
}

#[test]
fn test_rule_severity_follows_config() {
    let linter = linter_with(vec![Arc::new(Foo)], json!({ "foo": "error" }));
    let issues = linter.lint("<div></div>").unwrap();
    assert_eq!(issues[0].severity, Severity::Error);
    assert_eq!(issues[0].rule, "foo");

    let linter = linter_with(vec![Arc::new(Foo)], json!({ "foo": "warning" }));
    let issues = linter.lint("<div></div>").unwrap();
    assert_eq!(issues[0].severity, Severity::Warning);
}

#[test]
fn test_parser_not_found() {
    let err = Linter::new(LinterOptions::new().with_parser("nonexistent-module"))
        .err()
        .unwrap();
    assert_eq!(err.code(), "CORE-04");
    assert_eq!(err.meta(), json!({ "module_name": "nonexistent-module" }));
}

#[test]
fn test_custom_parser_receives_text() {
    let seen = Arc::new(Mutex::new(String::new()));
    let captured = Arc::clone(&seen);
    let parser = move |text: &str| {
        *captured.lock().unwrap() = text.to_string();
        vec![Node::Text(Token::new(text, Location::point(1, 1)))]
    };

    let linter = Linter::new(LinterOptions::new().with_custom_parser(Arc::new(parser))).unwrap();
    linter.lint("foo").unwrap();
    assert_eq!(*seen.lock().unwrap(), "foo");
}

#[test]
fn test_lint_is_idempotent() {
    let linter = builtin_linter(json!({
        "attr-req-value": "error",
        "lang-style": ["warning", "case"],
        "tag-name-match": "error",
    }));
    let html = r#"<html lang="en-us"><body><Div class></div><input disabled></body></html>"#;

    let first = linter.lint(html).unwrap();
    let second = linter.lint(html).unwrap();
    assert_eq!(first, second);
    assert_eq!(codes(&first), vec!["E039", "E006", "E030"]);
}

#[test]
fn test_failing_rule_aborts_run() {
    let linter = linter_with(
        vec![Arc::new(Foo), Arc::new(Broken { calls: AtomicUsize::new(0) })],
        json!({ "foo": "error", "broken": "error" }),
    );

    match linter.lint("<p></p><p></p>") {
        Err(LintError::Rule { rule, source }) => {
            assert_eq!(rule, "broken");
            assert_eq!(source, RuleError::Failed("boom".to_string()));
        }
        other => panic!("expected rule failure, got {:?}", other),
    }
}

#[test]
fn test_off_rule_never_invoked() {
    let broken = Arc::new(Broken {
        calls: AtomicUsize::new(0),
    });
    let linter = linter_with(vec![broken.clone()], json!({ "broken": "off" }));

    assert!(linter.lint("<p><b>x</b></p>").unwrap().is_empty());
    assert_eq!(broken.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_tag_name_match() {
    let linter = builtin_linter(json!({ "tag-name-match": true }));

    let issues = linter.lint("<Div></div>").unwrap();
    assert_eq!(codes(&issues), vec!["E030"]);
    assert_eq!(issues[0].data("open").unwrap()["chars"], "Div");

    assert!(linter.lint("<div></div>").unwrap().is_empty());
}

#[test]
fn test_lang_style_with_custom_classifier() {
    let rule = LangStyle::with_classifier(Arc::new(|_: &str| LangClass::NonCanonicalCase));
    let linter = linter_with(vec![Arc::new(rule)], json!({ "lang-style": ["error", "case"] }));

    let issues = linter.lint(r#"<html lang="en-US"></html>"#).unwrap();
    assert_eq!(codes(&issues), vec!["E039"]);
    assert_eq!(issues[0].position.start.column, 13);
    assert_eq!(issues[0].position.end.column, 18);
}

#[test]
fn test_lang_style_rejects_bad_options() {
    let mut config = Config::with_builtin_rules();
    let err = config
        .apply(json!({ "lang-style": ["error", 1] }).as_object().unwrap())
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidRuleOptions(_)));
    assert!(!config.is_active("lang-style"));
}

#[test]
fn test_placeholders_are_skipped() {
    let linter = builtin_linter(json!({ "attr-req-value": "error" }));
    assert!(linter.lint("<div ¤¤¤></div>").unwrap().is_empty());
}

#[test]
fn test_inline_directives() {
    let linter = builtin_linter(json!({ "attr-req-value": "error", "tag-name-match": "error" }));
    let html = "<!-- taglint-disable-next-line attr-req-value -->\n<a href></a>\n<Div></div>";

    let issues = linter.lint(html).unwrap();
    assert_eq!(codes(&issues), vec!["E030"]);

    let linter = Linter::new(LinterOptions::new().without_inline_config())
        .unwrap()
        .with_config(linter.config().clone());
    assert_eq!(codes(&linter.lint(html).unwrap()), vec!["E006", "E030"]);
}

#[test]
fn test_lint_many_keeps_order() {
    let linter = builtin_linter(json!({ "attr-req-value": "warning" }));
    let sources = vec!["<a href></a>", "<p></p>", "<b x y></b>"];

    let counts: Vec<usize> = linter
        .lint_many(&sources)
        .into_iter()
        .map(|r| r.unwrap().len())
        .collect();
    assert_eq!(counts, vec![1, 0, 2]);
}

#[test]
fn test_fixture_with_yaml_config() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "rules:\n  attr-req-value: warning\n  lang-style: [error, case]\n  tag-name-match: error"
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    let linter = Linter::new(LinterOptions::default()).unwrap().with_config(config);

    let html = std::fs::read_to_string(fixtures_path().join("page.html")).unwrap();
    let report = linter.lint_report(&html).unwrap();

    assert_eq!(codes(&report.issues), vec!["E039", "E006", "E030"]);
    assert_eq!(report.error_count, 2);
    assert_eq!(report.warning_count, 1);
    assert_eq!(report.issues[1].position.start.line, 6);
}

#[test]
fn test_clean_fixture() {
    let config = Config::from_json_str(r#"{ "rules": { "attr-req-value": "error", "tag-name-match": "error" } }"#)
        .unwrap();
    let linter = Linter::new(LinterOptions::default()).unwrap().with_config(config);

    let html = std::fs::read_to_string(fixtures_path().join("clean.html")).unwrap();
    assert!(linter.lint_report(&html).unwrap().is_clean());
}
