//! Rule contract
//!
//! Every check implements [`Rule`]. The engine calls [`Rule::lint`] once per
//! visited node with the options resolved by the configuration and a
//! [`RuleContext`] used to report issues.

use crate::error::{RuleConfigError, RuleError};
use crate::issue::{Issue, ReportedIssue, Severity};
use crate::node::Node;
use serde_json::Value;

/// A lint rule
pub trait Rule: Send + Sync {
    /// Unique rule name (e.g. "attr-req-value")
    fn name(&self) -> &str;

    /// Validate raw options and return the options the rule will receive.
    ///
    /// Called once when the rule is configured, never during linting.
    fn validate_config(&self, options: &Value) -> Result<Value, RuleConfigError> {
        Ok(options.clone())
    }

    /// Check a single node.
    ///
    /// Nodes of a kind the rule does not handle must be ignored. An `Err`
    /// means the rule itself is broken and aborts the run.
    fn lint(&self, node: &Node, options: &Value, ctx: &mut RuleContext<'_>) -> Result<(), RuleError>;
}

/// Reporting helper handed to a rule for one node visit
pub struct RuleContext<'a> {
    rule: &'a str,
    severity: Severity,
    issues: &'a mut Vec<Issue>,
}

impl<'a> RuleContext<'a> {
    pub fn new(rule: &'a str, severity: Severity, issues: &'a mut Vec<Issue>) -> Self {
        Self {
            rule,
            severity,
            issues,
        }
    }

    /// Name of the rule being run
    pub fn rule(&self) -> &str {
        self.rule
    }

    /// Record an issue with the rule's configured severity
    pub fn report(&mut self, issue: ReportedIssue) -> Result<(), RuleError> {
        if issue.code.trim().is_empty() {
            return Err(RuleError::MalformedIssue);
        }
        self.issues.push(Issue::new(self.rule, self.severity, issue));
        Ok(())
    }
}
