//! DOM Node Operations
//!
//! The contract the traversal capabilities consume from a tree:
//! navigation over sibling/parent links, the child-list generation, and
//! structural mutation (appendChild, insertBefore, removeChild,
//! replaceChild).

use crate::collection::ElementViewCache;
use crate::generation::Generation;
use crate::node::NodeType;
use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting ancestor)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
}

/// Read-only navigation over a tree.
///
/// Implementors must bump `child_list_generation(n)` on every structural
/// mutation of `n`'s child list, and only then. Cached views compare it
/// on each read and never get notified otherwise.
pub trait NodeNavigation {
    /// Type discriminator, `None` for an unknown id
    fn node_type(&self, node: NodeId) -> Option<NodeType>;

    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    fn last_child(&self, node: NodeId) -> Option<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId>;

    fn parent_node(&self, node: NodeId) -> Option<NodeId>;

    /// Version stamp of `node`'s child list.
    ///
    /// Views compare stamps for equality only; the 64-bit counter does not
    /// repeat within any reachable number of mutations.
    fn child_list_generation(&self, node: NodeId) -> Generation;

    /// Storage for memoized element-children views
    fn view_cache(&self) -> &ElementViewCache;

    /// Check if a node is an element
    #[inline]
    fn is_element(&self, node: NodeId) -> bool {
        self.node_type(node) == Some(NodeType::Element)
    }
}

/// Node operations trait
pub trait NodeOperations {
    /// Append a child node, detaching it from any previous parent
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Remove a child node
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node (`None` appends)
    fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        ref_child: Option<NodeId>,
    ) -> DomResult<NodeId>;

    /// Replace a child with another node, returning the old child
    fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> DomResult<NodeId>;
}
