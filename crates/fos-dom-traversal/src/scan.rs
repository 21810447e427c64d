//! Element scanning along sibling links

use crate::operations::NodeNavigation;
use crate::NodeId;

/// First element at or after `node` following `next_sibling`
pub fn scan_forward<T: NodeNavigation + ?Sized>(tree: &T, mut node: Option<NodeId>) -> Option<NodeId> {
    while let Some(id) = node {
        if tree.is_element(id) {
            return Some(id);
        }
        node = tree.next_sibling(id);
    }
    None
}

/// First element at or before `node` following `previous_sibling`
pub fn scan_backward<T: NodeNavigation + ?Sized>(tree: &T, mut node: Option<NodeId>) -> Option<NodeId> {
    while let Some(id) = node {
        if tree.is_element(id) {
            return Some(id);
        }
        node = tree.previous_sibling(id);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DomTree, NodeOperations};

    #[test]
    fn test_scan_skips_non_elements() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let t1 = tree.create_text("a");
        let el = tree.create_element("p");
        let c1 = tree.create_comment("b");
        for id in [t1, el, c1] {
            tree.append_child(root, id).unwrap();
        }

        assert_eq!(scan_forward(&tree, Some(t1)), Some(el));
        assert_eq!(scan_forward(&tree, Some(el)), Some(el));
        assert_eq!(scan_backward(&tree, Some(c1)), Some(el));
        assert_eq!(scan_forward(&tree, Some(c1)), None);
        assert_eq!(scan_backward(&tree, Some(t1)), None);
    }

    #[test]
    fn test_scan_none() {
        let tree = DomTree::new();
        assert_eq!(scan_forward(&tree, None), None);
        assert_eq!(scan_backward(&tree, None), None);
    }
}
