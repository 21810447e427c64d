//! fOS DOM traversal
//!
//! Element-only navigation over an arena DOM tree: live `children`
//! collections backed by a generation-checked cache, plus the ParentNode,
//! ChildNode and NonElementParentNode capabilities as traits usable on any
//! tree implementing [`NodeNavigation`].

mod collection;
mod config;
mod document;
mod element;
mod generation;
mod interfaces;
mod node;
mod operations;
mod scan;
mod tree;

pub use collection::{ElementChildren, ElementViewCache, HtmlCollection};
pub use config::DomConfig;
pub use document::Document;
pub use element::{CompoundSelector, ElementQuery, SimpleSelector};
pub use generation::{Generation, Versioned};
pub use interfaces::{ChildNode, NonElementParentNode, ParentNode};
pub use node::{Attribute, ElementData, Node, NodeData, NodeType, TextData};
pub use operations::{DomError, DomResult, NodeNavigation, NodeOperations};
pub use scan::{scan_backward, scan_forward};
pub use tree::{ChildNodes, Descendants, DomTree};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// "No node" sentinel used in node links
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Id for arena slot `index`, `None` once the sentinel would be reached
    #[inline]
    pub fn from_index(index: usize) -> Option<NodeId> {
        u32::try_from(index)
            .ok()
            .filter(|&raw| raw != Self::NONE.0)
            .map(NodeId)
    }

    /// `None` for the sentinel
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}
