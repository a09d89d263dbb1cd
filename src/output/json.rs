//! JSON output formatter

use super::{summarize, FileReport, OutputFormatter};
use crate::issue::Issue;
use serde::Serialize;
use std::path::Path;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize>(&self, value: &T) -> String {
        if self.pretty {
            serde_json::to_string_pretty(value).unwrap_or_default()
        } else {
            serde_json::to_string(value).unwrap_or_default()
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    files: Vec<JsonFile<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    file: String,
    issues: &'a [Issue],
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    file: String,
    #[serde(flatten)]
    issue: &'a Issue,
}

#[derive(Serialize)]
struct JsonSummary {
    files_processed: usize,
    error_count: usize,
    warning_count: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, files: &[FileReport]) -> String {
        let total = summarize(files);
        let output = JsonOutput {
            files: files
                .iter()
                .map(|f| JsonFile {
                    file: f.path.display().to_string(),
                    issues: &f.report.issues,
                })
                .collect(),
            summary: JsonSummary {
                files_processed: files.len(),
                error_count: total.error_count,
                warning_count: total.warning_count,
            },
        };
        self.render(&output)
    }

    fn format_issue(&self, path: &Path, issue: &Issue) -> String {
        self.render(&JsonIssue {
            file: path.display().to_string(),
            issue,
        })
    }
}
