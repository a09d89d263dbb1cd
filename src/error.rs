//! Error taxonomy
//!
//! Reported issues are not errors. Errors are reserved for malformed
//! configuration, unresolvable extension points and failing collaborators.

use serde_json::{json, Value};
use thiserror::Error;

/// Error raised while constructing a linter
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot find parser module \"{module_name}\"")]
    ParserNotFound { module_name: String },
}

impl CoreError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::ParserNotFound { .. } => "CORE-04",
        }
    }

    /// Structured data describing the failure
    pub fn meta(&self) -> Value {
        match self {
            CoreError::ParserNotFound { module_name } => json!({ "module_name": module_name }),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("A rule named \"{0}\" does not exist")]
    RuleNotFound(String),

    #[error("A rule named \"{0}\" is already registered")]
    DuplicateRule(String),

    #[error("Configuration for rule \"{rule}\" is invalid: {message}")]
    InvalidSetting { rule: String, message: String },

    #[error(transparent)]
    InvalidRuleOptions(#[from] RuleConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Rejected rule options, raised by `Rule::validate_config`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Configuration for rule \"{rule}\" is invalid: {message}")]
pub struct RuleConfigError {
    pub rule: String,
    pub message: String,
}

impl RuleConfigError {
    pub fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Failure of a parser collaborator
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parser \"{parser}\" failed: {message}")]
    Failed { parser: String, message: String },
}

/// Failure inside a rule's `lint`
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("reported issue has an empty code")]
    MalformedIssue,

    #[error("{0}")]
    Failed(String),
}

/// Error aborting a lint run
#[derive(Debug, Error)]
pub enum LintError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Rule \"{rule}\" failed: {source}")]
    Rule {
        rule: String,
        #[source]
        source: RuleError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_not_found_code_and_meta() {
        let err = CoreError::ParserNotFound {
            module_name: "foo".to_string(),
        };
        assert_eq!(err.code(), "CORE-04");
        assert_eq!(err.meta(), json!({ "module_name": "foo" }));
        assert_eq!(err.to_string(), "Cannot find parser module \"foo\"");
    }

    #[test]
    fn test_rule_config_error_display() {
        let err = RuleConfigError::new("lang-style", "Expected boolean got number");
        assert_eq!(
            err.to_string(),
            "Configuration for rule \"lang-style\" is invalid: Expected boolean got number"
        );

        let config_err: ConfigError = err.into();
        assert!(config_err.to_string().contains("lang-style"));
    }

    #[test]
    fn test_lint_error_display() {
        let err = LintError::Rule {
            rule: "broken".to_string(),
            source: RuleError::MalformedIssue,
        };
        assert_eq!(
            err.to_string(),
            "Rule \"broken\" failed: reported issue has an empty code"
        );
    }
}
