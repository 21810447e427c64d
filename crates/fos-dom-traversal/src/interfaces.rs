//! ParentNode, ChildNode and NonElementParentNode
//!
//! Element-only traversal layered on top of plain node navigation. Each
//! capability is a trait with a blanket implementation, so any tree that
//! implements the navigation contract gets them without storing anything
//! extra per node (the `children` views live in the tree's
//! `ElementViewCache`).

use crate::collection::HtmlCollection;
use crate::element::ElementQuery;
use crate::operations::{DomResult, NodeNavigation, NodeOperations};
use crate::scan::{scan_backward, scan_forward};
use crate::NodeId;

/// Whitespace that cannot appear inside an `[id="..."]` selector
const ID_WHITESPACE: [char; 5] = [' ', '\t', '\n', '\r', '\u{000C}'];

/// Element-children queries on nodes that can own children
pub trait ParentNode: NodeNavigation {
    fn first_element_child(&self, node: NodeId) -> Option<NodeId> {
        scan_forward(self, self.first_child(node))
    }

    fn last_element_child(&self, node: NodeId) -> Option<NodeId> {
        scan_backward(self, self.last_child(node))
    }

    /// Count element children.
    ///
    /// Uses the memoized view when one exists, otherwise walks the
    /// siblings directly without creating it.
    fn child_element_count(&self, node: NodeId) -> usize {
        if let Some(len) = self
            .view_cache()
            .with_existing(node, |view| view.length(self))
        {
            return len;
        }

        let mut count = 0;
        let mut child = self.first_element_child(node);
        while let Some(id) = child {
            count += 1;
            child = self.next_element_sibling(id);
        }
        count
    }

    /// Live collection of element children, memoized per node
    fn children(&self, node: NodeId) -> HtmlCollection<'_, Self> {
        self.view_cache().memoize(node, self);
        HtmlCollection::new(self, node)
    }

    /// Detach `node` from its parent; no-op without one
    fn remove(&mut self, node: NodeId) -> DomResult<()>
    where
        Self: NodeOperations,
    {
        if let Some(parent) = self.parent_node(node) {
            self.remove_child(parent, node)?;
        }
        Ok(())
    }
}

impl<T: NodeNavigation + ?Sized> ParentNode for T {}

/// Element sibling queries on nodes that can have siblings
pub trait ChildNode: NodeNavigation {
    fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        scan_forward(self, self.next_sibling(node))
    }

    fn previous_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        scan_backward(self, self.previous_sibling(node))
    }
}

impl<T: NodeNavigation + ?Sized> ChildNode for T {}

/// Id lookup on documents and fragments
pub trait NonElementParentNode: NodeNavigation + ElementQuery {
    /// First descendant whose `id` attribute equals `id` exactly.
    ///
    /// Ids containing whitespace never match. Only documents and
    /// fragments answer; other node kinds return `None`.
    fn get_element_by_id(&self, node: NodeId, id: &str) -> Option<NodeId> {
        if !self
            .node_type(node)
            .is_some_and(|kind| kind.is_non_element_parent())
        {
            return None;
        }
        if id.contains(&ID_WHITESPACE[..]) {
            tracing::debug!("Rejecting id with whitespace: {:?}", id);
            return None;
        }
        self.query_selector(node, &format!("[id=\"{}\"]", id))
    }
}

impl<T: NodeNavigation + ElementQuery + ?Sized> NonElementParentNode for T {}
