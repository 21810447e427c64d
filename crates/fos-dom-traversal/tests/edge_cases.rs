//! Edge case and stress tests for fos-dom-traversal
//!
//! Mutation sequences, configuration, fragments and non-DomTree trees.

use fos_dom_traversal::{
    ChildNode, DomConfig, DomError, DomTree, ElementViewCache, Generation, NodeId, NodeNavigation,
    NodeOperations, NodeType, NonElementParentNode, ParentNode,
};

// ============================================================================
// MUTATION SEQUENCES
// ============================================================================

/// Small deterministic LCG so the sequence is reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }
}

fn element_children_by_walk(tree: &DomTree, parent: NodeId) -> Vec<NodeId> {
    tree.child_nodes(parent)
        .filter(|(_, node)| node.is_element())
        .map(|(id, _)| id)
        .collect()
}

#[test]
fn test_random_mutations_keep_view_consistent() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let mut rng = Lcg(0x5eed);
    let mut attached: Vec<NodeId> = Vec::new();

    for step in 0..500 {
        match rng.below(5) {
            0 | 1 => {
                let id = if rng.below(2) == 0 {
                    tree.create_element("div")
                } else {
                    tree.create_text("t")
                };
                let before = if attached.is_empty() || rng.below(2) == 0 {
                    None
                } else {
                    Some(attached[rng.below(attached.len())])
                };
                tree.insert_before(root, id, before).unwrap();
                attached.push(id);
            }
            2 if !attached.is_empty() => {
                let id = attached.swap_remove(rng.below(attached.len()));
                tree.remove(id).unwrap();
            }
            3 if !attached.is_empty() => {
                let old = attached.swap_remove(rng.below(attached.len()));
                let new = tree.create_comment("c");
                tree.replace_child(root, new, old).unwrap();
                attached.push(new);
            }
            _ => {}
        }

        let expected = element_children_by_walk(&tree, root);
        let children = tree.children(root);
        assert_eq!(children.to_vec(), expected, "step {}", step);
        assert_eq!(children.length(), expected.len());
        assert_eq!(tree.child_element_count(root), expected.len());
        assert!(children.provisioned() >= expected.len());
    }
}

#[test]
fn test_handle_held_across_mutations_stays_live() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let a = tree.create_element("a");
    tree.append_child(root, a).unwrap();

    let before = tree.children(root).to_vec();
    let b = tree.create_element("b");
    tree.append_child(root, b).unwrap();

    // A fresh handle is equivalent to the old one: both read the same view
    let children = tree.children(root);
    assert_eq!(before, vec![a]);
    assert_eq!(children.iter().collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(children.into_iter().count(), 2);
}

#[test]
fn test_moving_child_invalidates_old_parent_view() {
    let mut tree = DomTree::new();
    let left = tree.create_element("div");
    let right = tree.create_element("div");
    let item = tree.create_element("p");
    tree.append_child(left, item).unwrap();

    assert_eq!(tree.children(left).length(), 1);
    assert_eq!(tree.children(right).length(), 0);

    tree.append_child(right, item).unwrap();
    assert_eq!(tree.children(left).length(), 0);
    assert_eq!(tree.children(right).item(0), Some(item));
}

#[test]
fn test_attribute_changes_do_not_dirty_view() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let a = tree.create_element("a");
    tree.append_child(root, a).unwrap();
    assert_eq!(tree.children(root).length(), 1);

    tree.set_attribute(a, "href", "/").unwrap();
    tree.remove_attribute(a, "href");
    assert!(!tree.children(root).is_dirty());
    assert_eq!(tree.children(root).rebuilds(), 1);
}

#[test]
fn test_grandchild_mutation_does_not_dirty_parent_view() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let div = tree.create_element("div");
    tree.append_child(root, div).unwrap();
    assert_eq!(tree.children(root).length(), 1);

    let span = tree.create_element("span");
    tree.append_child(div, span).unwrap();
    assert!(!tree.children(root).is_dirty());
}

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_eager_views_build_on_first_request() {
    let mut tree = DomTree::with_config(DomConfig {
        eager_element_views: true,
        ..DomConfig::default()
    });
    let root = tree.root();
    let a = tree.create_element("a");
    tree.append_child(root, a).unwrap();

    let children = tree.children(root);
    assert!(!children.is_dirty());
    assert_eq!(children.rebuilds(), 1);
    assert_eq!(children.item(0), Some(a));
    assert_eq!(children.rebuilds(), 1);
}

#[test]
fn test_lazy_views_build_on_first_read() {
    let mut tree = DomTree::with_config(DomConfig::default());
    let root = tree.root();
    let a = tree.create_element("a");
    tree.append_child(root, a).unwrap();

    let children = tree.children(root);
    assert!(children.is_dirty());
    assert_eq!(children.rebuilds(), 0);
    assert_eq!(children.first(), Some(a));
    assert_eq!(children.last(), Some(a));
    assert_eq!(children.rebuilds(), 1);
}

// ============================================================================
// NODE KINDS
// ============================================================================

#[test]
fn test_empty_and_leaf_nodes() {
    let mut tree = DomTree::new();
    let text = tree.create_text("t");
    let root = tree.root();

    assert!(tree.children(root).is_empty());
    assert_eq!(tree.children(root).first(), None);
    assert_eq!(tree.children(root).last(), None);
    assert_eq!(tree.children(text).length(), 0);
    assert_eq!(tree.child_element_count(text), 0);
    assert_eq!(tree.next_element_sibling(text), None);
}

#[test]
fn test_fragment_id_lookup() {
    let mut tree = DomTree::new();
    let frag = tree.create_fragment();
    let a = tree.create_element("section");
    tree.set_attribute(a, "id", "s1").unwrap();
    tree.append_child(frag, a).unwrap();

    assert_eq!(tree.get_element_by_id(frag, "s1"), Some(a));
    assert_eq!(tree.get_element_by_id(frag, ""), None);
    // Quotes cannot be expressed in the attribute selector
    assert_eq!(tree.get_element_by_id(frag, "s\"1"), None);

    assert!(tree.children(frag).contains(a));
    tree.append_child(tree.root(), frag).unwrap();
    assert!(!tree.children(frag).contains(a));
    assert_eq!(tree.get_element_by_id(tree.root(), "s1"), Some(a));
}

#[test]
fn test_id_lookup_on_text_node() {
    let mut tree = DomTree::new();
    let text = tree.create_text("t");
    assert_eq!(tree.get_element_by_id(text, "x"), None);
}

#[test]
fn test_mixed_node_kinds_are_skipped() {
    let mut tree = DomTree::new();
    let root = tree.root();
    let doctype = tree.create_doctype("html", "", "");
    let pi = tree.create_processing_instruction("xml-stylesheet", "href=a.css");
    let comment = tree.create_comment("c");
    let html = tree.create_element("html");
    for id in [doctype, pi, comment, html] {
        tree.append_child(root, id).unwrap();
    }

    assert_eq!(tree.node_type(doctype), Some(NodeType::DocumentType));
    assert_eq!(tree.children(root).to_vec(), vec![html]);
    assert_eq!(tree.first_element_child(root), Some(html));
    assert_eq!(tree.next_element_sibling(doctype), Some(html));
    assert_eq!(tree.previous_element_sibling(html), None);
}

#[test]
fn test_remove_child_errors() {
    let mut tree = DomTree::new();
    let a = tree.create_element("a");
    let b = tree.create_element("b");
    assert_eq!(tree.remove_child(a, b), Err(DomError::NotAChild));
    assert_eq!(tree.insert_before(a, b, Some(a)), Err(DomError::NotAChild));
}

// ============================================================================
// OTHER TREES
// ============================================================================

/// A flat list under a single parent (id 0): just enough tree to
/// implement the navigation contract.
struct FlatList {
    elements: Vec<bool>,
    ids: Vec<NodeId>,
    generation: Generation,
    views: ElementViewCache,
}

impl FlatList {
    /// `ids[i]` must name the node at position `i`
    fn new(ids: Vec<NodeId>, elements: Vec<bool>) -> Self {
        Self {
            elements,
            ids,
            generation: Generation::INITIAL,
            views: ElementViewCache::default(),
        }
    }

    fn position(&self, node: NodeId) -> Option<usize> {
        self.ids.iter().position(|&id| id == node)
    }

    fn pop(&mut self) {
        self.ids.pop();
        self.elements.pop();
        self.generation = self.generation.next();
    }
}

impl NodeNavigation for FlatList {
    fn node_type(&self, node: NodeId) -> Option<NodeType> {
        if node == NodeId::ROOT {
            return Some(NodeType::DocumentFragment);
        }
        let pos = self.position(node)?;
        Some(if self.elements[pos] {
            NodeType::Element
        } else {
            NodeType::Text
        })
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        (node == NodeId::ROOT).then(|| self.ids.first().copied()).flatten()
    }

    fn last_child(&self, node: NodeId) -> Option<NodeId> {
        (node == NodeId::ROOT).then(|| self.ids.last().copied()).flatten()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let pos = self.position(node)?;
        self.ids.get(pos + 1).copied()
    }

    fn previous_sibling(&self, node: NodeId) -> Option<NodeId> {
        let pos = self.position(node)?;
        pos.checked_sub(1).map(|p| self.ids[p])
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.position(node).map(|_| NodeId::ROOT)
    }

    fn child_list_generation(&self, node: NodeId) -> Generation {
        if node == NodeId::ROOT {
            self.generation
        } else {
            Generation::INITIAL
        }
    }

    fn view_cache(&self) -> &ElementViewCache {
        &self.views
    }
}

#[test]
fn test_capabilities_on_custom_tree() {
    // Borrow real ids from a DomTree so they are distinct from ROOT
    let mut ids_source = DomTree::new();
    let ids: Vec<NodeId> = (0..4).map(|_| ids_source.create_element("x")).collect();

    let mut list = FlatList::new(ids.clone(), vec![false, true, false, true]);
    let root = NodeId::ROOT;

    assert_eq!(list.first_element_child(root), Some(ids[1]));
    assert_eq!(list.last_element_child(root), Some(ids[3]));
    assert_eq!(list.next_element_sibling(ids[1]), Some(ids[3]));
    assert_eq!(list.previous_element_sibling(ids[3]), Some(ids[1]));
    assert_eq!(list.child_element_count(root), 2);
    assert_eq!(list.children(root).to_vec(), vec![ids[1], ids[3]]);

    list.pop();
    let children = list.children(root);
    assert_eq!(children.length(), 1);
    assert_eq!(children.provisioned(), 2);
    assert_eq!(children.get(1), None);
    assert_eq!(children.rebuilds(), 2);
}
