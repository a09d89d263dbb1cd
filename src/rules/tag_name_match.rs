//! tag-name-match: opening and closing tag names must use the same casing

use crate::error::RuleError;
use crate::issue::ReportedIssue;
use crate::node::{names_match, Node};
use crate::rule::{Rule, RuleContext};
use serde_json::Value;

pub struct TagNameMatch;

impl Rule for TagNameMatch {
    fn name(&self) -> &str {
        "tag-name-match"
    }

    fn lint(&self, node: &Node, _options: &Value, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Node::Tag(tag) = node else {
            return Ok(());
        };
        // Mismatched names are a parser-level concern, not a casing one
        let Some(close) = tag.close.as_ref() else {
            return Ok(());
        };
        if !names_match(&tag.name, &close.chars) || tag.open.chars == close.chars {
            return Ok(());
        }

        let open = serde_json::to_value(&tag.open).map_err(|e| RuleError::Failed(e.to_string()))?;
        ctx.report(ReportedIssue::new("E030", close.loc).with_data("open", open))
    }
}
