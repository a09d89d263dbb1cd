//! attr-req-value: attributes must have a value unless they are boolean

use crate::error::RuleError;
use crate::issue::ReportedIssue;
use crate::node::Node;
use crate::rule::{Rule, RuleContext};
use crate::tag_utils::{has_non_empty_attribute, is_boolean_attribute};
use serde_json::Value;

pub struct AttrReqValue;

impl Rule for AttrReqValue {
    fn name(&self) -> &str {
        "attr-req-value"
    }

    fn lint(&self, node: &Node, _options: &Value, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Node::Tag(tag) = node else {
            return Ok(());
        };

        for attribute in tag.attributes.iter().filter(|a| !a.is_placeholder()) {
            let name = attribute.name.chars.to_lowercase();
            if has_non_empty_attribute(node, &name) || is_boolean_attribute(&name) {
                continue;
            }
            ctx.report(ReportedIssue::new("E006", attribute.loc).with_data("attribute", name))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run;
    use serde_json::json;

    #[test]
    fn test_missing_value_reported() {
        let issues = run(&AttrReqValue, r#"<a href>link</a>"#, json!(true));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "E006");
        assert_eq!(issues[0].data("attribute"), Some(&json!("href")));
        assert_eq!(issues[0].position.start.column, 4);
    }

    #[test]
    fn test_empty_and_blank_values_reported() {
        let issues = run(&AttrReqValue, r#"<div class="" id="  "></div>"#, json!(true));
        let names: Vec<_> = issues.iter().filter_map(|i| i.data("attribute")).collect();
        assert_eq!(names, vec![&json!("class"), &json!("id")]);
    }

    #[test]
    fn test_name_lowercased() {
        let issues = run(&AttrReqValue, "<div CLASS></div>", json!(true));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].data("attribute"), Some(&json!("class")));
    }

    #[test]
    fn test_non_ascii_names_with_values_pass() {
        let issues = run(&AttrReqValue, r#"<div data-Ä="x" Über="y"></div>"#, json!(true));
        assert!(issues.is_empty());

        let issues = run(&AttrReqValue, "<div Über></div>", json!(true));
        assert_eq!(issues[0].data("attribute"), Some(&json!("über")));
    }

    #[test]
    fn test_boolean_attributes_allowed() {
        let issues = run(&AttrReqValue, "<input disabled checked required>", json!(true));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_valued_attributes_pass() {
        let issues = run(&AttrReqValue, r#"<img src="a.png" alt=logo>"#, json!(true));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_placeholder_attribute_skipped() {
        let issues = run(&AttrReqValue, "<div ¤¤¤></div>", json!(true));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_non_tag_nodes_ignored() {
        let issues = run(&AttrReqValue, "<!-- href --> text <!DOCTYPE html>", json!(true));
        assert!(issues.is_empty());
    }
}
