//! Human-readable text output formatter

use super::{summarize, FileReport, OutputFormatter};
use crate::issue::{Issue, Severity};
use colored::*;
use serde_json::Value;
use std::path::Path;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
        }
    }

    fn count(&self, n: usize, singular: &str, color: Color) -> String {
        let s = format!("{} {}{}", n, singular, if n == 1 { "" } else { "s" });
        if self.colored {
            s.color(color).to_string()
        } else {
            s
        }
    }
}

/// Short description of the built-in issue codes
fn message(issue: &Issue) -> String {
    let data = |key: &str| match issue.data(key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    match issue.code.as_str() {
        "E006" => format!("Attribute \"{}\" requires a value", data("attribute")),
        "E030" => {
            let open = issue
                .data("open")
                .and_then(|o| o.get("chars"))
                .and_then(Value::as_str)
                .unwrap_or_default();
            format!("Closing tag does not match opening tag \"{}\"", open)
        }
        "E038" => format!("Invalid language code \"{}\"", data("lang")),
        "E039" => format!("Language code \"{}\" has non-standard casing", data("lang")),
        code => match &issue.meta {
            Some(meta) if !meta.data.is_empty() => {
                format!("{} {}", code, Value::Object(meta.data.clone()))
            }
            _ => code.to_string(),
        },
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, files: &[FileReport]) -> String {
        let mut output = String::new();

        for file in files.iter().filter(|f| !f.report.is_clean()) {
            if self.colored {
                output.push_str(&format!("{}\n", file.path.display().to_string().underline()));
            } else {
                output.push_str(&format!("{}\n", file.path.display()));
            }
            for issue in &file.report.issues {
                output.push_str(&self.format_issue(&file.path, issue));
                output.push('\n');
            }
            output.push('\n');
        }

        if self.show_stats {
            let total = summarize(files);
            output.push_str(&format!(
                "{} {} processed",
                files.len(),
                if files.len() == 1 { "file" } else { "files" }
            ));

            let mut counts = Vec::new();
            if total.error_count > 0 {
                counts.push(self.count(total.error_count, "error", Color::Red));
            }
            if total.warning_count > 0 {
                counts.push(self.count(total.warning_count, "warning", Color::Yellow));
            }
            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');
        }

        output
    }

    fn format_issue(&self, path: &Path, issue: &Issue) -> String {
        let start = issue.position.start;
        format!(
            "{}:{}:{}: {}[{}]: {} ({})",
            path.display(),
            start.line,
            start.column,
            self.severity_str(issue.severity),
            if self.colored {
                issue.rule.cyan().to_string()
            } else {
                issue.rule.clone()
            },
            message(issue),
            issue.code
        )
    }
}
