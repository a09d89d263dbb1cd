//! Syntax tree consumed by every rule
//!
//! Parsers produce a forest of [`Node`]s. Rules only read them: nothing in the
//! lint pipeline mutates a node after the parser hands it over.

use serde::{Deserialize, Serialize};

/// Reserved character used by earlier transformation passes to blank out
/// content that must not be linted (e.g. the body of an already validated
/// `<script>` block).
pub const PLACEHOLDER_CHAR: char = '¤';

/// Check if a text span is a transformation placeholder (`¤+`)
pub fn is_placeholder_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c == PLACEHOLDER_CHAR)
}

/// Case-insensitive name comparison, folding with Unicode rules
pub fn names_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// A point in the source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Byte offset from the start of the input
    #[serde(default)]
    pub offset: usize,
}

impl Position {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

/// Source span of a token, attribute or node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

impl Location {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width location, for issues that are not tied to a token
    pub fn point(line: usize, column: usize) -> Self {
        let pos = Position::new(line, column, 0);
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Smallest span covering both locations
    pub fn cover(self, other: Location) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A raw text span with its location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Text as written in the source
    pub chars: String,
    pub loc: Location,
    /// Set once at construction when `chars` is a placeholder run
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_placeholder: bool,
}

impl Token {
    pub fn new(chars: impl Into<String>, loc: Location) -> Self {
        let chars = chars.into();
        let is_placeholder = is_placeholder_text(&chars);
        Self {
            chars,
            loc,
            is_placeholder,
        }
    }
}

/// An attribute on a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name, original casing preserved
    pub name: Token,
    /// Value without surrounding quotes; `None` when written without `=value`
    pub value: Option<Token>,
    pub loc: Location,
}

impl Attribute {
    pub fn new(name: Token, value: Option<Token>) -> Self {
        let loc = match &value {
            Some(v) => name.loc.cover(v.loc),
            None => name.loc,
        };
        Self { name, value, loc }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name.chars, name)
    }

    /// Placeholder attributes are skipped by every rule
    pub fn is_placeholder(&self) -> bool {
        self.name.is_placeholder
    }
}

/// A markup element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagNode {
    /// Tag identity used for matching
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Tag name as written in the opening tag
    pub open: Token,
    /// Tag name as written in the closing tag (absent for void/unclosed tags)
    pub close: Option<Token>,
    pub children: Vec<Node>,
    /// Span from `<` of the opening tag to `>` of the closing tag
    pub loc: Location,
}

impl TagNode {
    pub fn new(name: impl Into<String>, open: Token) -> Self {
        let loc = open.loc;
        Self {
            name: name.into(),
            attributes: Vec::new(),
            open,
            close: None,
            children: Vec::new(),
            loc,
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_close(mut self, close: Token) -> Self {
        self.loc = self.loc.cover(close.loc);
        self.close = Some(close);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

/// A node of the parsed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Tag(TagNode),
    Text(Token),
    /// Opaque to rules
    Comment(Token),
    /// Opaque to rules
    Doctype(Token),
}

impl Node {
    pub fn loc(&self) -> Location {
        match self {
            Node::Tag(tag) => tag.loc,
            Node::Text(token) | Node::Comment(token) | Node::Doctype(token) => token.loc,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Tag(tag) => &tag.children,
            _ => &[],
        }
    }

    pub fn as_tag(&self) -> Option<&TagNode> {
        match self {
            Node::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Pre-order depth-first iterator over a forest, in document order
pub struct Walk<'a> {
    stack: Vec<std::slice::Iter<'a, Node>>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    let children = node.children();
                    if !children.is_empty() {
                        self.stack.push(children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Walk every node of a forest in document order
pub fn walk(nodes: &[Node]) -> Walk<'_> {
    Walk {
        stack: vec![nodes.iter()],
    }
}
