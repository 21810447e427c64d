//! Live element collections (`ParentNode.children`)
//!
//! `ElementChildren` caches the element children of one node together
//! with the child-list generation it was built at. Reads compare that
//! generation against the live one and rebuild the whole list on mismatch;
//! there is no incremental patching since mutations can come from any
//! tree entry point.
//!
//! Indices that were ever valid stay "provisioned" for the lifetime of the
//! view: after the list shrinks they read back as `None`, they never turn
//! into an error.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::generation::Generation;
use crate::interfaces::{ChildNode, ParentNode};
use crate::operations::NodeNavigation;
use crate::NodeId;

/// Cached element children of a single node
#[derive(Debug, Clone)]
pub struct ElementChildren {
    /// Owning node (arena index, not an owning reference)
    owner: NodeId,
    /// Generation observed at the last rebuild, `None` until first build
    last_seen: Option<Generation>,
    /// Element children in tree order
    items: Vec<NodeId>,
    /// High-water mark of `items.len()`
    provisioned: usize,
    /// Number of rebuild walks performed
    rebuilds: u64,
}

impl ElementChildren {
    /// Create an unbuilt (dirty) view
    pub fn new(owner: NodeId) -> Self {
        Self {
            owner,
            last_seen: None,
            items: Vec::new(),
            provisioned: 0,
            rebuilds: 0,
        }
    }

    /// Owning node
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// Check the cached items against the owner's live generation
    pub fn is_dirty<T: NodeNavigation + ?Sized>(&self, tree: &T) -> bool {
        self.last_seen != Some(tree.child_list_generation(self.owner))
    }

    /// Rebuild if dirty
    pub fn refresh<T: NodeNavigation + ?Sized>(&mut self, tree: &T) {
        if self.is_dirty(tree) {
            self.rebuild(tree);
        }
    }

    fn rebuild<T: NodeNavigation + ?Sized>(&mut self, tree: &T) {
        let mut items = Vec::with_capacity(self.items.len());
        let mut child = tree.first_element_child(self.owner);
        while let Some(id) = child {
            items.push(id);
            child = tree.next_element_sibling(id);
        }

        self.items = items;
        self.provisioned = self.provisioned.max(self.items.len());
        let seen = tree.child_list_generation(self.owner);
        self.last_seen = Some(seen);
        self.rebuilds += 1;

        tracing::trace!(
            "Rebuilt element children of {:?}: {} items at generation {}",
            self.owner,
            self.items.len(),
            seen.value()
        );
    }

    /// Number of element children
    pub fn length<T: NodeNavigation + ?Sized>(&mut self, tree: &T) -> usize {
        self.refresh(tree);
        self.items.len()
    }

    /// Element child at `index`, `None` when out of range
    pub fn item<T: NodeNavigation + ?Sized>(&mut self, tree: &T, index: usize) -> Option<NodeId> {
        self.refresh(tree);
        self.items.get(index).copied()
    }

    /// Indexed access; identical to `item` for every provisioned index
    pub fn get<T: NodeNavigation + ?Sized>(&mut self, tree: &T, index: usize) -> Option<NodeId> {
        self.refresh(tree);
        if self.is_provisioned(index) {
            self.items.get(index).copied()
        } else {
            None
        }
    }

    /// Snapshot of the current items
    pub fn to_vec<T: NodeNavigation + ?Sized>(&mut self, tree: &T) -> Vec<NodeId> {
        self.refresh(tree);
        self.items.clone()
    }

    /// Highest item count ever observed; never decreases
    pub fn provisioned(&self) -> usize {
        self.provisioned
    }

    pub fn is_provisioned(&self, index: usize) -> bool {
        index < self.provisioned
    }

    /// Number of rebuild walks performed so far
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }
}

/// Per-tree memo table: at most one `ElementChildren` per node
#[derive(Debug, Default)]
pub struct ElementViewCache {
    views: RefCell<HashMap<NodeId, ElementChildren>>,
    /// Build views as soon as they are created
    eager: bool,
}

impl ElementViewCache {
    pub fn new(eager: bool) -> Self {
        Self {
            views: RefCell::new(HashMap::new()),
            eager,
        }
    }

    /// Check if a view has been created for `owner`
    pub fn contains(&self, owner: NodeId) -> bool {
        self.views.borrow().contains_key(&owner)
    }

    /// Number of memoized views
    pub fn len(&self) -> usize {
        self.views.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.borrow().is_empty()
    }

    /// Create the view for `owner` if it does not exist yet
    pub fn memoize<T: NodeNavigation + ?Sized>(&self, owner: NodeId, tree: &T) {
        let mut views = self.views.borrow_mut();
        if !views.contains_key(&owner) {
            let mut view = ElementChildren::new(owner);
            if self.eager {
                view.refresh(tree);
            }
            views.insert(owner, view);
        }
    }

    /// Run `f` on the view for `owner`, creating it first if needed.
    ///
    /// `f` must not reach back into this cache.
    pub(crate) fn with_view<R>(
        &self,
        owner: NodeId,
        f: impl FnOnce(&mut ElementChildren) -> R,
    ) -> R {
        let mut views = self.views.borrow_mut();
        f(views.entry(owner).or_insert_with(|| ElementChildren::new(owner)))
    }

    /// Run `f` on the view for `owner` only if it already exists.
    ///
    /// Same restriction as `with_view`.
    pub(crate) fn with_existing<R>(
        &self,
        owner: NodeId,
        f: impl FnOnce(&mut ElementChildren) -> R,
    ) -> Option<R> {
        self.views.borrow_mut().get_mut(&owner).map(f)
    }
}

/// Live handle over a node's element children.
///
/// Every read consults the owner's generation first, so a handle kept
/// across mutations always reports the current state.
pub struct HtmlCollection<'a, T: ?Sized> {
    tree: &'a T,
    owner: NodeId,
}

impl<T: ?Sized> Clone for HtmlCollection<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for HtmlCollection<'_, T> {}

impl<T: ?Sized> std::fmt::Debug for HtmlCollection<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HtmlCollection")
            .field("owner", &self.owner)
            .finish_non_exhaustive()
    }
}

impl<'a, T: NodeNavigation + ?Sized> HtmlCollection<'a, T> {
    /// Handle over an already memoized view
    pub(crate) fn new(tree: &'a T, owner: NodeId) -> Self {
        Self { tree, owner }
    }

    fn with_view<R>(&self, f: impl FnOnce(&mut ElementChildren, &T) -> R) -> R {
        let tree = self.tree;
        tree.view_cache().with_view(self.owner, |view| f(view, tree))
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn length(&self) -> usize {
        self.with_view(|view, tree| view.length(tree))
    }

    pub fn is_empty(&self) -> bool {
        self.length() == 0
    }

    pub fn item(&self, index: usize) -> Option<NodeId> {
        self.with_view(|view, tree| view.item(tree, index))
    }

    /// Indexed access (`children[i]`)
    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.with_view(|view, tree| view.get(tree, index))
    }

    pub fn first(&self) -> Option<NodeId> {
        self.item(0)
    }

    pub fn last(&self) -> Option<NodeId> {
        self.with_view(|view, tree| {
            let len = view.length(tree);
            len.checked_sub(1).and_then(|i| view.item(tree, i))
        })
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.with_view(|view, tree| view.to_vec(tree).contains(&node))
    }

    /// Highest item count this view ever held
    pub fn provisioned(&self) -> usize {
        self.with_view(|view, _| view.provisioned())
    }

    pub fn rebuilds(&self) -> u64 {
        self.with_view(|view, _| view.rebuilds())
    }

    /// Check if the next read will rebuild
    pub fn is_dirty(&self) -> bool {
        self.with_view(|view, tree| view.is_dirty(tree))
    }

    pub fn to_vec(&self) -> Vec<NodeId> {
        self.with_view(|view, tree| view.to_vec(tree))
    }

    /// Iterate over a snapshot taken now
    pub fn iter(&self) -> std::vec::IntoIter<NodeId> {
        self.to_vec().into_iter()
    }
}

impl<'a, T: NodeNavigation + ?Sized> IntoIterator for HtmlCollection<'a, T> {
    type Item = NodeId;
    type IntoIter = std::vec::IntoIter<NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
