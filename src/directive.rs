//! Inline suppression comments
//!
//! Supported formats:
//!
//! ```html
//! <!-- taglint-disable-file rule-id -->
//! <!-- taglint-disable-next-line rule-id: reason here -->
//! <p class>  <!-- taglint-disable rule-id -- reason here -->
//! ```
//!
//! Several rules can be listed separated by commas or spaces; `all` matches
//! every rule.

use crate::issue::Issue;
use crate::node::{walk, Node};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^<!--\s*taglint-(disable-file|disable-next-line|disable)\s+([\w\-, ]+?)(?:\s*:\s*.*?|\s+--\s+.*?)?\s*(?:-->)?$",
    )
    .expect("directive regex is valid")
});

/// Rule suppressions collected from a document's comments
#[derive(Debug, Default)]
pub struct InlineDirectives {
    /// rule id -> disabled line numbers
    disabled_lines: HashMap<String, HashSet<usize>>,
    disabled_file_rules: HashSet<String>,
}

impl InlineDirectives {
    /// Collect directives from every comment of a forest
    pub fn collect(nodes: &[Node]) -> Self {
        let mut directives = Self::default();

        for node in walk(nodes) {
            let Node::Comment(comment) = node else {
                continue;
            };
            let Some(caps) = DIRECTIVE_RE.captures(comment.chars.trim()) else {
                continue;
            };
            let rules = caps[2]
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|r| !r.is_empty())
                .map(String::from);

            match &caps[1] {
                "disable-file" => directives.disabled_file_rules.extend(rules),
                kind => {
                    let line = if kind == "disable-next-line" {
                        comment.loc.end.line + 1
                    } else {
                        comment.loc.start.line
                    };
                    for rule in rules {
                        directives.disabled_lines.entry(rule).or_default().insert(line);
                    }
                }
            }
        }

        directives
    }

    pub fn is_empty(&self) -> bool {
        self.disabled_lines.is_empty() && self.disabled_file_rules.is_empty()
    }

    /// Check if a rule is disabled for the entire document
    pub fn is_rule_disabled_for_file(&self, rule_id: &str) -> bool {
        self.disabled_file_rules.contains(rule_id) || self.disabled_file_rules.contains("all")
    }

    /// Check if a rule is disabled at a specific line
    pub fn is_rule_disabled(&self, rule_id: &str, line: usize) -> bool {
        [rule_id, "all"].iter().any(|id| {
            self.disabled_lines
                .get(*id)
                .is_some_and(|lines| lines.contains(&line))
        })
    }

    /// Check if an issue is suppressed
    pub fn suppresses(&self, issue: &Issue) -> bool {
        self.is_rule_disabled_for_file(&issue.rule)
            || self.is_rule_disabled(&issue.rule, issue.position.start.line)
    }
}
