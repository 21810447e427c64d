//! Element Query
//!
//! querySelector, querySelectorAll and matches over a single compound
//! selector (`div#main.note[data-x="1"]`). Combinators are not supported;
//! a selector that fails to parse matches nothing.

use crate::node::ElementData;
use crate::{DomTree, NodeId};

/// Element query trait
pub trait ElementQuery {
    /// Query first descendant of `root` (tree order) matching the selector
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId>;

    /// Query all descendants of `root` matching the selector
    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Check if element matches selector
    fn matches(&self, element: NodeId, selector: &str) -> bool;
}

/// Simple selector for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    /// `[name]` when `value` is `None`, `[name="value"]` otherwise
    Attribute { name: String, value: Option<String> },
}

impl SimpleSelector {
    pub fn matches(&self, elem: &ElementData) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(tag) => elem.tag_name.eq_ignore_ascii_case(tag),
            Self::Id(id) => elem.id.as_deref() == Some(id.as_str()),
            Self::Class(class) => elem.has_class(class),
            Self::Attribute { name, value } => match (elem.get_attr(name), value) {
                (Some(_), None) => true,
                (Some(actual), Some(expected)) => actual == expected,
                (None, _) => false,
            },
        }
    }
}

/// A sequence of simple selectors that must all match one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    parts: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Parse a compound selector string
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        let mut cursor = Cursor { input: s, pos: 0 };
        let mut parts = Vec::new();

        if cursor.eat('*') {
            parts.push(SimpleSelector::Universal);
        } else if let Some(tag) = cursor.ident() {
            parts.push(SimpleSelector::Tag(tag.to_ascii_lowercase()));
        }

        while let Some(c) = cursor.bump() {
            let part = match c {
                '#' => SimpleSelector::Id(cursor.ident()?.to_string()),
                '.' => SimpleSelector::Class(cursor.ident()?.to_string()),
                '[' => cursor.attribute()?,
                _ => return None,
            };
            parts.push(part);
        }

        Some(Self { parts })
    }

    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }

    pub fn matches(&self, elem: &ElementData) -> bool {
        self.parts.iter().all(|part| part.matches(elem))
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn ident(&mut self) -> Option<&'a str> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
        {
            self.bump();
        }
        let input = self.input;
        if self.pos > start {
            Some(&input[start..self.pos])
        } else {
            None
        }
    }

    /// Body of `[...]`, opening bracket already consumed
    fn attribute(&mut self) -> Option<SimpleSelector> {
        self.skip_whitespace();
        let name = self.ident()?.to_string();
        self.skip_whitespace();

        if self.eat(']') {
            return Some(SimpleSelector::Attribute { name, value: None });
        }
        if !self.eat('=') {
            return None;
        }
        self.skip_whitespace();

        let input = self.input;
        let value = match self.peek()? {
            quote @ ('"' | '\'') => {
                self.bump();
                let start = self.pos;
                while self.peek()? != quote {
                    self.bump();
                }
                let value = &input[start..self.pos];
                self.bump();
                value
            }
            _ => self.ident()?,
        };

        self.skip_whitespace();
        self.eat(']').then(|| SimpleSelector::Attribute {
            name,
            value: Some(value.to_string()),
        })
    }
}

impl ElementQuery for DomTree {
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        let Some(compound) = CompoundSelector::parse(selector) else {
            tracing::debug!("Unsupported selector: {}", selector);
            return None;
        };
        self.descendants(root)
            .find(|(_, node)| node.as_element().is_some_and(|e| compound.matches(e)))
            .map(|(id, _)| id)
    }

    fn query_selector_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(compound) = CompoundSelector::parse(selector) else {
            tracing::debug!("Unsupported selector: {}", selector);
            return Vec::new();
        };
        self.descendants(root)
            .filter(|(_, node)| node.as_element().is_some_and(|e| compound.matches(e)))
            .map(|(id, _)| id)
            .collect()
    }

    fn matches(&self, element: NodeId, selector: &str) -> bool {
        let elem = self.get(element).and_then(|node| node.as_element());
        match (elem, CompoundSelector::parse(selector)) {
            (Some(elem), Some(compound)) => compound.matches(elem),
            _ => false,
        }
    }
}
