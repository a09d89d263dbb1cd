//! Forgiving HTML tokenizer
//!
//! Never fails: malformed markup is recovered into nodes (stray closing tags
//! become text, unclosed tags end with their parent or the input).

use super::Parser;
use crate::error::ParseError;
use crate::node::{names_match, Attribute, Location, Node, Position, TagNode, Token};
use std::cell::Cell;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: [&str; 16] = [
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose content is kept as a single text node
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Default parser for HTML documents
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for HtmlParser {
    fn parse(&self, text: &str) -> Result<Vec<Node>, ParseError> {
        Ok(TreeBuilder::new(text).build())
    }
}

/// Tag still waiting for its closing tag
struct OpenTag {
    tag: TagNode,
}

struct TreeBuilder<'a> {
    src: &'a str,
    pos: usize,
    line_starts: Vec<usize>,
    /// Last computed (offset, line, column)
    cursor: Cell<(usize, usize, usize)>,
    roots: Vec<Node>,
    stack: Vec<OpenTag>,
}

impl<'a> TreeBuilder<'a> {
    fn new(src: &'a str) -> Self {
        // Pre-calculate line positions for fast lookup
        let line_starts = std::iter::once(0)
            .chain(src.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            src,
            pos: 0,
            line_starts,
            cursor: Cell::new((0, 1, 1)),
            roots: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Columns are counted from the last computed position when it is on
    /// the same line, so a long line is scanned once rather than per token.
    fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let (last_offset, last_line, last_column) = self.cursor.get();

        let column = if last_line != line {
            let line_start = self.line_starts[line.saturating_sub(1)];
            self.src[line_start..offset].chars().count() + 1
        } else if last_offset <= offset {
            last_column + self.src[last_offset..offset].chars().count()
        } else {
            last_column - self.src[offset..last_offset].chars().count()
        };

        self.cursor.set((offset, line, column));
        Position::new(line, column, offset)
    }

    fn token(&self, start: usize, end: usize) -> Token {
        Token::new(
            &self.src[start..end],
            Location::new(self.position(start), self.position(end)),
        )
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_whitespace(&mut self) {
        while self.peek(0).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advance while `keep` holds, returning the consumed range
    fn take_while(&mut self, keep: impl Fn(u8) -> bool) -> (usize, usize) {
        let start = self.pos;
        while self.peek(0).is_some_and(&keep) {
            self.pos += 1;
        }
        (start, self.pos)
    }

    fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        self.src[from..].find(needle).map(|i| from + i)
    }

    fn build(mut self) -> Vec<Node> {
        while !self.at_end() {
            let rest = &self.src[self.pos..];
            if rest.starts_with("<!--") {
                self.comment();
            } else if rest.starts_with("<!") {
                self.doctype();
            } else if rest.starts_with("</") && self.peek(2).is_some_and(|b| b.is_ascii_alphabetic()) {
                self.closing_tag();
            } else if rest.starts_with('<') && self.peek(1).is_some_and(|b| b.is_ascii_alphabetic()) {
                self.opening_tag();
            } else {
                self.text();
            }
        }

        while !self.stack.is_empty() {
            self.close_top(None, self.src.len());
        }
        self.roots
    }

    fn push(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(open) => open.tag.children.push(node),
            None => self.roots.push(node),
        }
    }

    /// Pop the innermost open tag and attach it to its parent
    fn close_top(&mut self, close: Option<Token>, end: usize) {
        let Some(OpenTag { mut tag }) = self.stack.pop() else {
            return;
        };
        tag.loc.end = self.position(end);
        tag.close = close;
        self.push(Node::Tag(tag));
    }

    fn comment(&mut self) {
        let start = self.pos;
        let end = self
            .find_from(start + 4, "-->")
            .map_or(self.src.len(), |i| i + 3);
        self.pos = end;
        let token = self.token(start, end);
        self.push(Node::Comment(token));
    }

    fn doctype(&mut self) {
        let start = self.pos;
        let end = self.find_from(start, ">").map_or(self.src.len(), |i| i + 1);
        self.pos = end;
        let token = self.token(start, end);
        self.push(Node::Doctype(token));
    }

    fn text(&mut self) {
        let start = self.pos;
        let first_len = self.src[start..].chars().next().map_or(1, char::len_utf8);
        let mut from = start + first_len;
        let mut end = self.src.len();
        while let Some(i) = self.find_from(from, "<") {
            let next = self.bytes().get(i + 1).copied();
            if next.is_some_and(|b| b.is_ascii_alphabetic() || b == b'/' || b == b'!') {
                end = i;
                break;
            }
            from = i + 1;
        }
        self.pos = end;
        let token = self.token(start, end);
        self.push(Node::Text(token));
    }

    fn tag_name(&mut self) -> (usize, usize) {
        self.take_while(|b| !b.is_ascii_whitespace() && b != b'/' && b != b'>')
    }

    fn closing_tag(&mut self) {
        let start = self.pos;
        self.pos += 2;
        let (name_start, name_end) = self.tag_name();
        let end = self.find_from(self.pos, ">").map_or(self.src.len(), |i| i + 1);
        self.pos = end;

        let name = &self.src[name_start..name_end];
        let matching = self
            .stack
            .iter()
            .rposition(|open| names_match(&open.tag.name, name));

        match matching {
            Some(index) => {
                // Tags opened after the match are left unclosed
                while self.stack.len() > index + 1 {
                    self.close_top(None, start);
                }
                let close = self.token(name_start, name_end);
                self.close_top(Some(close), end);
            }
            None => {
                let token = self.token(start, end);
                self.push(Node::Text(token));
            }
        }
    }

    fn opening_tag(&mut self) {
        let start = self.pos;
        self.pos += 1;
        let (name_start, name_end) = self.tag_name();
        let open = self.token(name_start, name_end);
        let mut tag = TagNode::new(open.chars.to_lowercase(), open);

        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            match self.peek(0) {
                None => break,
                Some(b'>') => {
                    self.pos += 1;
                    break;
                }
                Some(b'/') if self.peek(1) == Some(b'>') => {
                    self.pos += 2;
                    self_closing = true;
                    break;
                }
                Some(b'/') => self.pos += 1,
                Some(_) => {
                    let attribute = self.attribute();
                    tag.attributes.push(attribute);
                }
            }
        }
        tag.loc = Location::new(self.position(start), self.position(self.pos));

        let name = tag.name.clone();
        if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            self.push(Node::Tag(tag));
        } else if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.stack.push(OpenTag { tag });
            self.raw_text(&name);
        } else {
            self.stack.push(OpenTag { tag });
        }
    }

    fn attribute(&mut self) -> Attribute {
        let (name_start, name_end) =
            self.take_while(|b| !b.is_ascii_whitespace() && b != b'=' && b != b'>' && b != b'/');
        let name = self.token(name_start, name_end);

        let before_value = self.pos;
        self.skip_whitespace();
        if self.peek(0) != Some(b'=') {
            self.pos = before_value;
            return Attribute::new(name, None);
        }
        self.pos += 1;
        self.skip_whitespace();

        let value = match self.peek(0) {
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let (start, end) = self.take_while(|b| b != quote);
                if !self.at_end() {
                    self.pos += 1;
                }
                self.token(start, end)
            }
            _ => {
                let (start, end) = self.take_while(|b| !b.is_ascii_whitespace() && b != b'>');
                self.token(start, end)
            }
        };
        Attribute::new(name, Some(value))
    }

    /// Consume the content of `script`/`style` up to the matching closing tag
    fn raw_text(&mut self, name: &str) {
        let content_start = self.pos;
        let needle = format!("</{}", name);
        let lowered = self.src[content_start..].to_ascii_lowercase();
        let mut close_at = None;
        let mut from = 0;
        while let Some(i) = lowered[from..].find(&needle).map(|i| from + i) {
            // `</scripts>` does not end a script
            let after = lowered.as_bytes().get(i + needle.len()).copied();
            if after.map_or(true, |b| b.is_ascii_whitespace() || b == b'/' || b == b'>') {
                close_at = Some(content_start + i);
                break;
            }
            from = i + needle.len();
        }

        let content_end = close_at.unwrap_or(self.src.len());
        if content_end > content_start {
            let token = self.token(content_start, content_end);
            self.push(Node::Text(token));
        }

        match close_at {
            Some(at) => {
                self.pos = at;
                self.closing_tag();
            }
            None => {
                self.pos = self.src.len();
                self.close_top(None, self.src.len());
            }
        }
    }
}
