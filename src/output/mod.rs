//! Output formatters for lint results

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::issue::{Issue, LintReport};
use std::path::{Path, PathBuf};

/// Lint result of one input file
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub report: LintReport,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, issues: Vec<Issue>) -> Self {
        Self {
            path: path.into(),
            report: LintReport::from_issues(issues),
        }
    }
}

/// Totals over several files
pub fn summarize(files: &[FileReport]) -> LintReport {
    let mut total = LintReport::default();
    for file in files {
        total.merge(file.report.clone());
    }
    total
}

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the results of a whole run
    fn format(&self, files: &[FileReport]) -> String;

    /// Format a single issue
    fn format_issue(&self, path: &Path, issue: &Issue) -> String;
}
