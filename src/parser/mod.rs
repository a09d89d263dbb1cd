//! Parser contract and parser resolution

mod html;

pub use html::HtmlParser;

use crate::error::{CoreError, ParseError};
use crate::node::Node;
use std::collections::HashMap;
use std::sync::Arc;

/// Turns raw text into a node forest.
///
/// Parsers must attach a location to every token and recover malformed
/// markup into nodes instead of failing. `ParseError` is reserved for
/// failures of the collaborator itself (I/O, resolution).
pub trait Parser: Send + Sync {
    fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError>;
}

impl<F> Parser for F
where
    F: Fn(&str) -> Vec<Node> + Send + Sync,
{
    fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError> {
        Ok(self(text))
    }
}

/// Named parsers available to the linter
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<String, Arc<dyn Parser>>,
}

impl ParserRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in HTML parser as "default" and "html"
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        let html: Arc<dyn Parser> = Arc::new(HtmlParser::new());
        registry.register("default", Arc::clone(&html));
        registry.register("html", html);
        registry
    }

    /// Register a parser, replacing any parser with the same name
    pub fn register(&mut self, name: &str, parser: Arc<dyn Parser>) {
        self.parsers.insert(name.to_string(), parser);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parsers.contains_key(name)
    }

    /// Look up a parser by name
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn Parser>, CoreError> {
        self.parsers
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::ParserNotFound {
                module_name: name.to_string(),
            })
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
