//! Built-in rules

mod attr_req_value;
mod lang_style;
mod tag_name_match;

pub use attr_req_value::AttrReqValue;
pub use lang_style::LangStyle;
pub use tag_name_match::TagNameMatch;

use crate::rule::Rule;
use std::sync::Arc;

/// Get all built-in rules, in registration order
pub fn builtin_rules() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(AttrReqValue),
        Arc::new(LangStyle::new()),
        Arc::new(TagNameMatch),
    ]
}
