//! lang-style: the `lang` attribute of `<html>` must be a valid language tag

use crate::error::{RuleConfigError, RuleError};
use crate::issue::ReportedIssue;
use crate::lang::{DefaultLangClassifier, LangClass, LangClassifier};
use crate::node::Node;
use crate::rule::{Rule, RuleContext};
use crate::tag_utils::{attribute_value, has_non_empty_attribute};
use serde_json::Value;
use std::sync::Arc;

const RULE_NAME: &str = "lang-style";

pub struct LangStyle {
    classifier: Arc<dyn LangClassifier>,
}

impl Default for LangStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl LangStyle {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(DefaultLangClassifier),
        }
    }

    /// Use a custom language tag classifier
    pub fn with_classifier(classifier: Arc<dyn LangClassifier>) -> Self {
        Self { classifier }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Rule for LangStyle {
    fn name(&self) -> &str {
        RULE_NAME
    }

    fn validate_config(&self, options: &Value) -> Result<Value, RuleConfigError> {
        match options {
            Value::Bool(_) => Ok(options.clone()),
            Value::String(s) if s == "case" => Ok(options.clone()),
            Value::String(_) => Err(RuleConfigError::new(
                RULE_NAME,
                "Only \"case\" is accepted as string value",
            )),
            other => Err(RuleConfigError::new(
                RULE_NAME,
                format!("Expected boolean got {}", json_type_name(other)),
            )),
        }
    }

    fn lint(&self, node: &Node, options: &Value, ctx: &mut RuleContext<'_>) -> Result<(), RuleError> {
        let Node::Tag(tag) = node else {
            return Ok(());
        };
        if tag.name != "html" || !has_non_empty_attribute(node, "lang") {
            return Ok(());
        }
        let Some(lang) = attribute_value(node, "lang") else {
            return Ok(());
        };
        if lang.is_placeholder {
            return Ok(());
        }

        let check_case = options.as_str() == Some("case");
        let code = match self.classifier.classify(&lang.chars) {
            LangClass::InvalidSubtag => "E038",
            LangClass::NonCanonicalCase if check_case => "E039",
            _ => return Ok(()),
        };
        ctx.report(ReportedIssue::new(code, lang.loc).with_data("lang", lang.chars.clone()))
    }
}
