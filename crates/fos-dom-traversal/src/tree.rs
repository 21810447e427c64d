//! DOM Tree (arena-based allocation)
//!
//! Nodes are never freed: removing a node only unlinks it, so its `NodeId`
//! stays valid and it can be re-inserted elsewhere.

use crate::collection::ElementViewCache;
use crate::config::DomConfig;
use crate::generation::{Generation, Versioned};
use crate::node::{Node, NodeType};
use crate::operations::{DomError, DomResult, NodeNavigation, NodeOperations};
use crate::NodeId;

/// Arena-based DOM tree for memory efficiency
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
    views: ElementViewCache,
}

impl DomTree {
    /// Create a new tree holding only a document root
    pub fn new() -> Self {
        Self::with_config(DomConfig::default())
    }

    /// Create a tree with explicit configuration
    pub fn with_config(config: DomConfig) -> Self {
        let mut nodes = Vec::with_capacity(config.node_capacity.max(1));
        nodes.push(Node::document());
        Self {
            nodes,
            views: ElementViewCache::new(config.eager_element_views),
        }
    }

    /// Document root
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    ///
    /// Links are public on `Node`; editing them here bypasses generation
    /// tracking, so structural changes should go through `NodeOperations`.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the tree (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let Some(id) = NodeId::from_index(self.nodes.len()) else {
            panic!("DOM arena exhausted: {} nodes", self.nodes.len());
        };
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.alloc(Node::element(tag_name))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.alloc(Node::comment(content.to_string()))
    }

    /// Create an empty document fragment
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(Node::fragment())
    }

    /// Create a doctype node
    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(Node::doctype(
            name.to_string(),
            public_id.to_string(),
            system_id.to_string(),
        ))
    }

    /// Create a processing instruction
    pub fn create_processing_instruction(&mut self, target: &str, data: &str) -> NodeId {
        self.alloc(Node::processing_instruction(target.to_string(), data.to_string()))
    }

    /// Set an attribute on an element
    pub fn set_attribute(&mut self, element: NodeId, name: &str, value: &str) -> DomResult<()> {
        let node = self.get_mut(element).ok_or(DomError::NotFound)?;
        let elem = node.as_element_mut().ok_or(DomError::InvalidNodeType)?;
        elem.set_attr(name, value.to_string());
        Ok(())
    }

    /// Get an attribute of an element
    pub fn get_attribute(&self, element: NodeId, name: &str) -> Option<&str> {
        self.get(element)?.as_element()?.get_attr(name)
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attribute(&mut self, element: NodeId, name: &str) -> Option<String> {
        self.get_mut(element)?.as_element_mut()?.remove_attr(name)
    }

    /// Iterate over direct children
    pub fn child_nodes(&self, parent: NodeId) -> ChildNodes<'_> {
        ChildNodes {
            tree: self,
            current: self.get(parent).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Pre-order iterator over the descendants of `root` (excluding it)
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            root,
            next: self.get(root).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Check if `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = self.get(current).map_or(NodeId::NONE, |n| n.parent);
        }
        false
    }

    fn link(&self, id: NodeId, pick: impl Fn(&Node) -> NodeId) -> Option<NodeId> {
        self.get(id).map(pick).and_then(NodeId::to_option)
    }

    fn bump(&mut self, parent: NodeId) {
        if let Some(node) = self.get_mut(parent) {
            node.bump_generation();
        }
    }

    /// Checks shared by insertion paths
    fn ensure_insertable(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_type = self.get(parent).ok_or(DomError::NotFound)?.node_type();
        let child_type = self.get(child).ok_or(DomError::NotFound)?.node_type();

        if !parent_type.is_parent_capable() {
            return Err(DomError::HierarchyRequest);
        }
        if child_type == NodeType::Document {
            return Err(DomError::HierarchyRequest);
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::HierarchyRequest);
        }
        Ok(())
    }

    /// Unlink `child` from its current parent, if any
    fn detach(&mut self, child: NodeId) {
        let (parent, prev, next) = match self.get(child) {
            Some(n) => (n.parent, n.prev_sibling, n.next_sibling),
            None => return,
        };
        if !parent.is_valid() {
            return;
        }

        match self.get_mut(prev) {
            Some(p) => p.next_sibling = next,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(n) => n.prev_sibling = prev,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = prev;
                }
            }
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = NodeId::NONE;
            c.prev_sibling = NodeId::NONE;
            c.next_sibling = NodeId::NONE;
        }
        self.bump(parent);
    }

    /// Link a detached `child` before `before` (or at the end)
    fn link_before(&mut self, parent: NodeId, child: NodeId, before: NodeId) {
        let prev = if before.is_valid() {
            self.get(before).map_or(NodeId::NONE, |n| n.prev_sibling)
        } else {
            self.get(parent).map_or(NodeId::NONE, |n| n.last_child)
        };

        if let Some(c) = self.get_mut(child) {
            c.parent = parent;
            c.prev_sibling = prev;
            c.next_sibling = before;
        }
        match self.get_mut(prev) {
            Some(p) => p.next_sibling = child,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.first_child = child;
                }
            }
        }
        match self.get_mut(before) {
            Some(b) => b.prev_sibling = child,
            None => {
                if let Some(p) = self.get_mut(parent) {
                    p.last_child = child;
                }
            }
        }
        self.bump(parent);
    }

    /// Move the children of a fragment into `parent` before `before`
    fn insert_fragment(&mut self, parent: NodeId, fragment: NodeId, before: NodeId) {
        let moved: Vec<NodeId> = self.child_nodes(fragment).map(|(id, _)| id).collect();
        for id in moved {
            self.detach(id);
            self.link_before(parent, id, before);
        }
    }

    fn is_fragment(&self, id: NodeId) -> bool {
        self.get(id)
            .is_some_and(|n| n.node_type() == NodeType::DocumentFragment)
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeNavigation for DomTree {
    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        self.get(node).map(Node::node_type)
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.link(node, |n| n.first_child)
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.link(node, |n| n.last_child)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.link(node, |n| n.next_sibling)
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        self.link(node, |n| n.prev_sibling)
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.link(node, |n| n.parent)
    }

    fn child_list_generation(&self, node: NodeId) -> Generation {
        self.get(node).map_or(Generation::INITIAL, Versioned::generation)
    }

    fn view_cache(&self) -> &ElementViewCache {
        &self.views
    }
}

impl NodeOperations for DomTree {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.insert_before(parent, child, None)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.get(parent).ok_or(DomError::NotFound)?;
        let node = self.get(child).ok_or(DomError::NotFound)?;
        if node.parent != parent {
            return Err(DomError::NotAChild);
        }
        self.detach(child);
        Ok(child)
    }

    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId> {
        self.ensure_insertable(parent, new_child)?;

        let mut before = NodeId::NONE;
        if let Some(reference) = ref_child {
            let node = self.get(reference).ok_or(DomError::NotFound)?;
            if node.parent != parent {
                return Err(DomError::NotAChild);
            }
            // Inserting a node before itself keeps its position
            if reference == new_child {
                return Ok(new_child);
            }
            before = reference;
        }

        if self.is_fragment(new_child) {
            self.insert_fragment(parent, new_child, before);
        } else {
            self.detach(new_child);
            self.link_before(parent, new_child, before);
        }
        Ok(new_child)
    }

    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId> {
        self.ensure_insertable(parent, new_child)?;
        let old = self.get(old_child).ok_or(DomError::NotFound)?;
        if old.parent != parent {
            return Err(DomError::NotAChild);
        }
        if new_child == old_child {
            return Ok(old_child);
        }

        let mut before = old.next_sibling;
        if before == new_child {
            before = self.get(new_child).map_or(NodeId::NONE, |n| n.next_sibling);
        }
        self.detach(old_child);
        if self.is_fragment(new_child) {
            self.insert_fragment(parent, new_child, before);
        } else {
            self.detach(new_child);
            self.link_before(parent, new_child, before);
        }
        Ok(old_child)
    }
}

/// Iterator over the direct children of a node
pub struct ChildNodes<'a> {
    tree: &'a DomTree,
    current: NodeId,
}

impl<'a> Iterator for ChildNodes<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current;
        let node = self.tree.get(id)?;
        self.current = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    root: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        // Advance: first child, else next sibling of the nearest ancestor
        // that has one, stopping at the root
        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            let mut current = id;
            loop {
                if current == self.root {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(current) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                current = n.parent;
            }
        };
        Some((id, node))
    }
}
