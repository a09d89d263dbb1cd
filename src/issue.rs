//! Issue types for lint results

use crate::node::Location;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity attached to issues of an active rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - potential issue
    Warning,
    /// Error - definite problem
    #[default]
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Structured data attached to an issue
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IssueMeta {
    pub data: Map<String, Value>,
}

/// Issue as reported by a rule, before the engine attaches rule and severity
#[derive(Debug, Clone, PartialEq)]
pub struct ReportedIssue {
    pub code: String,
    pub position: Location,
    pub meta: Option<IssueMeta>,
}

impl ReportedIssue {
    pub fn new(code: &str, position: Location) -> Self {
        Self {
            code: code.to_string(),
            position,
            meta: None,
        }
    }

    /// Add a `meta.data` entry
    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.meta
            .get_or_insert_with(IssueMeta::default)
            .data
            .insert(key.to_string(), value.into());
        self
    }
}

/// A reported problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Rule that reported the issue
    pub rule: String,
    pub code: String,
    pub position: Location,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<IssueMeta>,
}

impl Issue {
    pub fn new(rule: &str, severity: Severity, reported: ReportedIssue) -> Self {
        Self {
            rule: rule.to_string(),
            code: reported.code,
            position: reported.position,
            severity,
            meta: reported.meta,
        }
    }

    /// Look up a `meta.data` entry
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.meta.as_ref().and_then(|m| m.data.get(key))
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

/// Issues of one or more lint runs with severity counts
#[derive(Debug, Clone, Default)]
pub struct LintReport {
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl LintReport {
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let error_count = issues.iter().filter(|i| i.is_error()).count();
        let warning_count = issues.len() - error_count;
        Self {
            issues,
            error_count,
            warning_count,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Get exit code (0 = clean, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }

    pub fn merge(&mut self, other: LintReport) {
        self.issues.extend(other.issues);
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
    }
}
