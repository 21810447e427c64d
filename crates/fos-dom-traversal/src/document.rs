//! Document - High-level document API

use crate::collection::HtmlCollection;
use crate::config::DomConfig;
use crate::interfaces::{ChildNode, NonElementParentNode, ParentNode};
use crate::operations::{DomResult, NodeOperations};
use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with `html`, `head` and `body`
    pub fn new(url: &str) -> DomResult<Self> {
        Self::with_config(url, DomConfig::default())
    }

    /// Create a new document with explicit tree configuration
    pub fn with_config(url: &str, config: DomConfig) -> DomResult<Self> {
        let mut tree = DomTree::with_config(config);

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html)?;
        tree.append_child(html, head)?;
        tree.append_child(html, body)?;

        Ok(Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        })
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get document title
    pub fn title(&self) -> String {
        let Some(head) = self.head() else {
            return String::new();
        };

        let mut child = self.tree.first_element_child(head);
        while let Some(id) = child {
            let is_title = self
                .tree
                .get(id)
                .and_then(|n| n.as_element())
                .is_some_and(|e| e.tag_name == "title");
            if is_title {
                return self
                    .tree
                    .child_nodes(id)
                    .filter_map(|(_, n)| n.as_text())
                    .collect();
            }
            child = self.tree.next_element_sibling(id);
        }

        String::new()
    }

    /// Get <html> element
    pub fn document_element(&self) -> Option<NodeId> {
        self.html_element.to_option()
    }

    /// Get <head> element
    pub fn head(&self) -> Option<NodeId> {
        self.head_element.to_option()
    }

    /// Get <body> element
    pub fn body(&self) -> Option<NodeId> {
        self.body_element.to_option()
    }

    /// Element children of the document node
    pub fn children(&self) -> HtmlCollection<'_, DomTree> {
        self.tree.children(self.tree.root())
    }

    /// Get element by ID
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(self.tree.root(), id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty("about:blank")
    }
}
