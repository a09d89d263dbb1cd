//! Node predicates shared by rules

use crate::node::{Node, Token};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Attributes whose presence alone is meaningful and never need a value
static BOOLEAN_ATTRIBUTES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "allowfullscreen",
        "async",
        "autofocus",
        "autoplay",
        "checked",
        "compact",
        "controls",
        "declare",
        "default",
        "defaultchecked",
        "defaultmuted",
        "defaultselected",
        "defer",
        "disabled",
        "draggable",
        "enabled",
        "formnovalidate",
        "hidden",
        "indeterminate",
        "inert",
        "ismap",
        "itemscope",
        "loop",
        "multiple",
        "muted",
        "nohref",
        "noresize",
        "noshade",
        "novalidate",
        "nowrap",
        "open",
        "pauseonexit",
        "readonly",
        "required",
        "reversed",
        "scoped",
        "seamless",
        "selected",
        "sortable",
        "spellcheck",
        "translate",
        "truespeed",
        "typemustmatch",
        "visible",
    ]
    .into_iter()
    .collect()
});

/// Check if a node is a tag
pub fn is_tag_node(node: &Node) -> bool {
    matches!(node, Node::Tag(_))
}

/// Value of the first attribute named `name` (case-insensitive)
pub fn attribute_value<'a>(node: &'a Node, name: &str) -> Option<&'a Token> {
    node.as_tag()?
        .attributes
        .iter()
        .find(|attr| attr.is_named(name))?
        .value
        .as_ref()
}

/// Check if a tag carries an attribute with a value that is not blank.
///
/// Placeholder values are opaque and count as non-empty.
pub fn has_non_empty_attribute(node: &Node, name: &str) -> bool {
    let Some(tag) = node.as_tag() else {
        return false;
    };
    tag.attributes
        .iter()
        .filter(|attr| attr.is_named(name))
        .any(|attr| {
            attr.value
                .as_ref()
                .is_some_and(|v| !v.chars.trim().is_empty())
        })
}

/// Check if an attribute never requires a value
pub fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.contains(name.to_lowercase().as_str())
}
