//! DOM Node - Compact representation
//!
//! Nodes live in the tree's arena and link to each other by `NodeId`
//! rather than by pointer. Links use `NodeId::NONE` as the "no node"
//! sentinel; the public navigation API turns that into `Option`.

use crate::generation::{Generation, Versioned};
use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Child-list generation, bumped by the tree on structural mutation
    pub(crate) generation: Generation,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            generation: Generation::INITIAL,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag_name)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(TextData { content }))
    }

    /// Create a new comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Create a document fragment node
    pub fn fragment() -> Self {
        Self::with_data(NodeData::DocumentFragment)
    }

    /// Create a doctype node
    pub fn doctype(name: String, public_id: String, system_id: String) -> Self {
        Self::with_data(NodeData::Doctype { name, public_id, system_id })
    }

    /// Create a processing instruction node
    pub fn processing_instruction(target: String, data: String) -> Self {
        Self::with_data(NodeData::ProcessingInstruction { target, data })
    }

    /// Type discriminator
    #[inline]
    pub fn node_type(&self) -> NodeType {
        match &self.data {
            NodeData::Document => NodeType::Document,
            NodeData::Doctype { .. } => NodeType::DocumentType,
            NodeData::DocumentFragment => NodeType::DocumentFragment,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::Comment(_) => NodeType::Comment,
            NodeData::ProcessingInstruction { .. } => NodeType::ProcessingInstruction,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

impl Versioned for Node {
    fn generation(&self) -> Generation {
        self.generation
    }

    fn bump_generation(&mut self) -> Generation {
        self.generation = self.generation.next();
        self.generation
    }
}

/// Node kind, with the DOM `nodeType` numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Element,
    Text,
    ProcessingInstruction,
    Comment,
    Document,
    DocumentType,
    DocumentFragment,
}

impl NodeType {
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            3 => Some(NodeType::Text),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            _ => None,
        }
    }

    pub fn to_u32(self) -> u32 {
        match self {
            NodeType::Element => 1,
            NodeType::Text => 3,
            NodeType::ProcessingInstruction => 7,
            NodeType::Comment => 8,
            NodeType::Document => 9,
            NodeType::DocumentType => 10,
            NodeType::DocumentFragment => 11,
        }
    }

    /// Can own children (ParentNode)
    #[inline]
    pub fn is_parent_capable(self) -> bool {
        matches!(
            self,
            NodeType::Document | NodeType::DocumentFragment | NodeType::Element
        )
    }

    /// Can have siblings (ChildNode)
    #[inline]
    pub fn is_child_capable(self) -> bool {
        !matches!(self, NodeType::Document | NodeType::DocumentFragment)
    }

    /// Supports id lookup over its subtree (NonElementParentNode)
    #[inline]
    pub fn is_non_element_parent(self) -> bool {
        matches!(self, NodeType::Document | NodeType::DocumentFragment)
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// DOCTYPE
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
    /// Detached container
    DocumentFragment,
    /// Element
    Element(ElementData),
    /// Text content
    Text(TextData),
    /// Comment
    Comment(String),
    /// Processing instruction
    ProcessingInstruction {
        target: String,
        data: String,
    },
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name, lowercased
    pub tag_name: String,
    /// Attributes in insertion order
    pub attrs: Vec<Attribute>,
    /// Cached id attribute (very common lookup)
    pub id: Option<String>,
    /// Cached class list
    pub classes: Vec<String>,
}

impl ElementData {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: Vec::new(),
            id: None,
            classes: Vec::new(),
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: String) {
        self.refresh_cached(name, Some(value.as_str()));

        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
            attr.value = value;
            return;
        }
        self.attrs.push(Attribute {
            name: name.to_string(),
            value,
        });
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name == name)?;
        self.refresh_cached(name, None);
        Some(self.attrs.remove(pos).value)
    }

    /// Check class membership
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn refresh_cached(&mut self, name: &str, value: Option<&str>) {
        match name {
            "id" => self.id = value.map(str::to_string),
            "class" => {
                self.classes = value
                    .map(|v| v.split_ascii_whitespace().map(str::to_string).collect())
                    .unwrap_or_default();
            }
            _ => {}
        }
    }
}

/// Text node data
#[derive(Debug)]
pub struct TextData {
    pub content: String,
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_type_discriminator() {
        assert_eq!(Node::element("div").node_type(), NodeType::Element);
        assert_eq!(Node::text("x".into()).node_type(), NodeType::Text);
        assert_eq!(Node::comment("x".into()).node_type(), NodeType::Comment);
        assert_eq!(Node::fragment().node_type(), NodeType::DocumentFragment);
        assert_eq!(NodeType::from_u32(NodeType::Comment.to_u32()), Some(NodeType::Comment));
        assert_eq!(NodeType::from_u32(2), None);
    }

    #[test]
    fn test_capabilities_by_kind() {
        assert!(NodeType::Element.is_parent_capable());
        assert!(NodeType::Element.is_child_capable());
        assert!(!NodeType::Element.is_non_element_parent());

        assert!(NodeType::Document.is_non_element_parent());
        assert!(!NodeType::Document.is_child_capable());

        assert!(!NodeType::Text.is_parent_capable());
        assert!(NodeType::Text.is_child_capable());
    }

    #[test]
    fn test_attribute_caches() {
        let mut elem = ElementData::new("DIV");
        assert_eq!(elem.tag_name, "div");

        elem.set_attr("id", "main".into());
        elem.set_attr("class", "a  b\tc".into());
        assert_eq!(elem.id.as_deref(), Some("main"));
        assert!(elem.has_class("b"));
        assert_eq!(elem.classes.len(), 3);

        elem.set_attr("id", "other".into());
        assert_eq!(elem.get_attr("id"), Some("other"));
        assert_eq!(elem.attrs.len(), 2);

        assert_eq!(elem.remove_attr("id"), Some("other".to_string()));
        assert_eq!(elem.id, None);
        assert_eq!(elem.remove_attr("id"), None);
    }

    #[test]
    fn test_bump_generation() {
        let mut node = Node::element("ul");
        assert_eq!(node.generation(), Generation::INITIAL);
        node.bump_generation();
        assert!(!node.is_unchanged_since(Generation::INITIAL));
    }
}
