//! Taglint - rule-based markup linter
//!
//! A small, extensible linter for HTML-like documents. Rules are plain
//! trait objects, the parser is a pluggable collaborator, and every rule is
//! switched on and tuned through a JSON/YAML configuration.
//!
//! # Architecture
//!
//! ```text
//! CLI/API -> Linter -> Parser -> Node forest -> Rule (per node) -> Issue
//!               \-> Config (rule table, severities, options)
//! ```
//!
//! # Example
//!
//! ```
//! use taglint::{Config, Linter, LinterOptions};
//!
//! let mut config = Config::with_builtin_rules();
//! config
//!     .apply(serde_json::json!({ "attr-req-value": "error" }).as_object().unwrap())
//!     .unwrap();
//!
//! let linter = Linter::new(LinterOptions::default()).unwrap().with_config(config);
//! let issues = linter.lint("<a href></a>").unwrap();
//! assert_eq!(issues[0].code, "E006");
//! ```

pub mod config;
pub mod directive;
pub mod error;
pub mod issue;
pub mod lang;
pub mod linter;
pub mod node;
pub mod output;
pub mod parser;
pub mod rule;
pub mod rules;
pub mod tag_utils;

// Re-export main types
pub use config::{Config, RuleSetting};
pub use error::{ConfigError, CoreError, LintError, ParseError, RuleConfigError, RuleError};
pub use issue::{Issue, IssueMeta, LintReport, ReportedIssue, Severity};
pub use lang::{LangClass, LangClassifier};
pub use linter::{Linter, LinterOptions, ParserSpec};
pub use node::{walk, Attribute, Location, Node, Position, TagNode, Token};
pub use parser::{HtmlParser, Parser, ParserRegistry};
pub use rule::{Rule, RuleContext};
