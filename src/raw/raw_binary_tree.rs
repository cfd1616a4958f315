use core::cmp::Ordering;

use smallvec::{SmallVec, smallvec};

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;
use crate::InvariantError;

/// The plain binary search tree backing `BinaryTree` and `AvlTree`.
///
/// It keeps keys ordered and links consistent but never restructures itself;
/// balancing is layered on top by rewiring links through [`replace_child`],
/// [`attach_left`] and [`attach_right`].
///
/// [`replace_child`]: RawBinaryTree::replace_child
/// [`attach_left`]: RawBinaryTree::attach_left
/// [`attach_right`]: RawBinaryTree::attach_right
#[derive(Clone)]
pub(crate) struct RawBinaryTree {
    /// Arena storing all tree nodes.
    nodes: Arena<Node>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of stored keys.
    len: usize,
}

/// Outcome of a successful deletion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Removed {
    /// Parent of the unlinked node at the time of removal, `None` if it was the root.
    pub(crate) parent: Option<Handle>,
}

/// Pending node in the structural check: handle plus exclusive key bounds.
type Bounded = (Handle, Option<i32>, Option<i32>);

impl RawBinaryTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree whose arena can hold `capacity` nodes without reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of keys in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no keys.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.nodes.get_mut(handle)
    }

    /// Finds the node holding `value`.
    pub(crate) fn find(&self, value: i32) -> Option<Handle> {
        self.search(value).map(|(handle, _)| handle)
    }

    /// Returns the depth of the node holding `value`, the root being at depth 0.
    pub(crate) fn depth_of(&self, value: i32) -> Option<usize> {
        self.search(value).map(|(_, depth)| depth)
    }

    fn search(&self, value: i32) -> Option<(Handle, usize)> {
        let mut current = self.root?;
        let mut depth = 0;

        loop {
            let node = self.nodes.get(current);
            current = match value.cmp(&node.value()) {
                Ordering::Less => node.left()?,
                Ordering::Greater => node.right()?,
                Ordering::Equal => return Some((current, depth)),
            };
            depth += 1;
        }
    }

    /// Returns the smallest node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    /// Returns the largest node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Returns the node holding the next larger key, or `None` if `handle` holds the maximum.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.nodes.get(handle).right() {
            return Some(self.leftmost(right));
        }

        // Climb while we are a right child; the first left-child step lands on the successor.
        let mut current = handle;
        while let Some(parent) = self.nodes.get(current).parent() {
            if self.nodes.get(parent).left() == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Inserts `value` as a new leaf.
    ///
    /// Returns the handle of the new node, or `None` (and leaves the tree untouched)
    /// if `value` is already present.
    pub(crate) fn insert(&mut self, value: i32) -> Option<Handle> {
        let Some(mut current) = self.root else {
            let handle = self.nodes.alloc(Node::new(None, value));
            self.root = Some(handle);
            self.len = 1;
            return Some(handle);
        };

        loop {
            let node = self.nodes.get(current);
            let ordering = value.cmp(&node.value());
            let next = match ordering {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return None,
            };

            match next {
                Some(child) => current = child,
                None => {
                    let handle = self.nodes.alloc(Node::new(Some(current), value));
                    let parent = self.nodes.get_mut(current);
                    if ordering == Ordering::Less {
                        parent.set_left(Some(handle));
                    } else {
                        parent.set_right(Some(handle));
                    }
                    self.len += 1;
                    return Some(handle);
                }
            }
        }
    }

    /// Deletes `value`, returning where a node was physically unlinked, or `None`
    /// if `value` is absent.
    ///
    /// A node with two children is never unlinked itself: its in-order successor
    /// (which has at most one child) is unlinked instead and the successor's key
    /// is copied into it.
    pub(crate) fn delete(&mut self, value: i32) -> Option<Removed> {
        let target = self.find(value)?;
        let node = self.nodes.get(target);

        if let (Some(_), Some(right)) = (node.left(), node.right()) {
            let successor = self.leftmost(right);
            let successor_value = self.nodes.get(successor).value();
            let removed = self.unlink(successor);
            self.nodes.get_mut(target).set_value(successor_value);
            return Some(removed);
        }

        Some(self.unlink(target))
    }

    /// Removes a node with at most one child, splicing that child into its place.
    fn unlink(&mut self, handle: Handle) -> Removed {
        let node = self.nodes.take(handle);
        debug_assert!(node.left().is_none() || node.right().is_none(), "`unlink()` - node has two children!");

        let parent = node.parent();
        self.replace_child(parent, handle, node.left().or(node.right()));
        self.len -= 1;
        Removed {
            parent,
        }
    }

    /// Puts `new` where `old` hung under `parent` (or at the root when `parent` is `None`)
    /// and points `new` back at `parent`.
    pub(crate) fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        if let Some(new) = new {
            self.nodes.get_mut(new).set_parent(parent);
        }

        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.nodes.get_mut(parent);
                if parent.left() == Some(old) {
                    parent.set_left(new);
                } else {
                    parent.set_right(new);
                }
            }
        }
    }

    /// Makes `child` the left child of `parent`, linking both directions.
    pub(crate) fn attach_left(&mut self, parent: Handle, child: Option<Handle>) {
        self.nodes.get_mut(parent).set_left(child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(parent));
        }
    }

    /// Makes `child` the right child of `parent`, linking both directions.
    pub(crate) fn attach_right(&mut self, parent: Handle, child: Option<Handle>) {
        self.nodes.get_mut(parent).set_right(child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(Some(parent));
        }
    }

    /// Verifies search order, parent links and the recorded size.
    pub(crate) fn check_structure(&self) -> Result<(), InvariantError> {
        let mut reachable = 0;

        if let Some(root) = self.root {
            let node = self.nodes.get(root);
            if node.parent().is_some() {
                return Err(InvariantError::RootHasParent {
                    value: node.value(),
                });
            }

            let mut pending: SmallVec<[Bounded; 32]> = smallvec![(root, None, None)];
            while let Some((handle, lower, upper)) = pending.pop() {
                let node = self.nodes.get(handle);
                let value = node.value();
                if lower.is_some_and(|lower| value <= lower) || upper.is_some_and(|upper| value >= upper) {
                    return Err(InvariantError::Unordered {
                        value,
                    });
                }
                reachable += 1;

                for (child, lower, upper) in [(node.left(), lower, Some(value)), (node.right(), Some(value), upper)] {
                    let Some(child) = child else {
                        continue;
                    };
                    let child_node = self.nodes.get(child);
                    if child_node.parent() != Some(handle) {
                        return Err(InvariantError::BrokenParentLink {
                            value: child_node.value(),
                        });
                    }
                    pending.push((child, lower, upper));
                }
            }
        }

        if reachable != self.len || self.nodes.len() != self.len {
            return Err(InvariantError::LenMismatch {
                recorded: self.len,
                reachable,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::collections::BTreeSet;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    fn tree_of(values: &[i32]) -> RawBinaryTree {
        let mut tree = RawBinaryTree::new();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    fn in_order(tree: &RawBinaryTree) -> Vec<i32> {
        let mut values = Vec::new();
        let mut current = tree.first();
        while let Some(handle) = current {
            values.push(tree.node(handle).value());
            current = tree.successor(handle);
        }
        values
    }

    fn value_at(tree: &RawBinaryTree, handle: Option<Handle>) -> Option<i32> {
        handle.map(|handle| tree.node(handle).value())
    }

    #[test]
    fn first_insert_becomes_parentless_root() {
        let mut tree = RawBinaryTree::new();
        let handle = tree.insert(10).unwrap();
        assert_eq!(tree.root(), Some(handle));
        assert_eq!(tree.node(handle).parent(), None);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth_of(10), Some(0));
    }

    #[test]
    fn insert_links_new_leaf_on_correct_side() {
        let mut tree = tree_of(&[10, 5]);
        let handle = tree.insert(7).unwrap();
        let parent = tree.find(5).unwrap();
        assert_eq!(tree.node(handle).parent(), Some(parent));
        assert_eq!(tree.node(parent).right(), Some(handle));
        assert_eq!(tree.node(parent).left(), None);
        assert_eq!(tree.depth_of(7), Some(2));
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.insert(3), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(in_order(&tree), [1, 2, 3]);
    }

    #[test]
    fn find_and_depth_of_absent_value() {
        let tree = tree_of(&[4, 2, 6]);
        assert_eq!(tree.find(5), None);
        assert_eq!(tree.depth_of(5), None);
        assert_eq!(RawBinaryTree::new().depth_of(0), None);
    }

    #[test]
    fn successor_walks_up_through_right_children() {
        let tree = tree_of(&[8, 4, 12, 2, 6, 5, 7]);
        let seven = tree.find(7).unwrap();
        assert_eq!(value_at(&tree, tree.successor(seven)), Some(8));
        let four = tree.find(4).unwrap();
        assert_eq!(value_at(&tree, tree.successor(four)), Some(5));
        let twelve = tree.find(12).unwrap();
        assert_eq!(tree.successor(twelve), None);
        assert_eq!(value_at(&tree, tree.first()), Some(2));
        assert_eq!(value_at(&tree, tree.last()), Some(12));
    }

    #[test]
    fn delete_leaf_detaches_from_parent() {
        let mut tree = tree_of(&[2, 1, 3]);
        let parent = tree.find(2);
        let removed = tree.delete(1).unwrap();
        assert_eq!(removed.parent, parent);
        assert_eq!(tree.node(parent.unwrap()).left(), None);
        assert_eq!(in_order(&tree), [2, 3]);
        tree.check_structure().unwrap();
    }

    #[test]
    fn delete_only_node_empties_tree() {
        let mut tree = tree_of(&[1]);
        let removed = tree.delete(1).unwrap();
        assert_eq!(removed.parent, None);
        assert!(tree.is_empty());
        assert_eq!(tree.root(), None);
        tree.check_structure().unwrap();
    }

    #[test]
    fn delete_root_with_one_child_promotes_child() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.delete(1).unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.node(root).value(), 2);
        assert_eq!(tree.node(root).parent(), None);
        assert_eq!(tree.depth_of(3), Some(1));
        tree.check_structure().unwrap();
    }

    #[test]
    fn delete_inner_node_with_one_child_splices_child() {
        let mut tree = tree_of(&[10, 5, 3, 4]);
        let removed = tree.delete(5).unwrap();
        let ten = tree.find(10).unwrap();
        assert_eq!(removed.parent, Some(ten));
        assert_eq!(value_at(&tree, tree.node(ten).left()), Some(3));
        assert_eq!(tree.depth_of(4), Some(2));
        tree.check_structure().unwrap();
    }

    #[test]
    fn delete_with_two_children_overwrites_in_place() {
        let mut tree = tree_of(&[5, 3, 8, 1, 4, 7, 9, 6]);
        let five = tree.find(5).unwrap();
        let six = tree.find(6).unwrap();
        let seven = tree.find(7).unwrap();

        let removed = tree.delete(5).unwrap();
        assert_eq!(removed.parent, Some(seven));
        assert_eq!(tree.insert(10), Some(six));
        assert_eq!(tree.root(), Some(five));
        assert_eq!(tree.node(five).value(), 6);
        assert_eq!(tree.find(6), Some(five));
        assert_eq!(in_order(&tree), [1, 3, 4, 6, 7, 8, 9, 10]);
        tree.check_structure().unwrap();
    }

    #[test]
    fn delete_with_adjacent_successor_reports_target_as_parent() {
        let mut tree = tree_of(&[5, 3, 8, 9]);
        let five = tree.find(5).unwrap();
        let removed = tree.delete(5).unwrap();
        assert_eq!(removed.parent, Some(five));
        assert_eq!(tree.node(five).value(), 8);
        assert_eq!(value_at(&tree, tree.node(five).right()), Some(9));
        tree.check_structure().unwrap();
    }

    #[test]
    fn delete_absent_value_changes_nothing() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert_eq!(tree.delete(4), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(in_order(&tree), [1, 2, 3]);
    }

    #[test]
    fn deleted_slot_is_reused() {
        let mut tree = tree_of(&[2, 1, 3]);
        let three = tree.find(3);
        tree.delete(3).unwrap();
        assert_eq!(tree.insert(4), three);
        tree.check_structure().unwrap();
    }

    #[test]
    fn check_structure_reports_corruption() {
        let mut tree = tree_of(&[2, 1, 3]);
        let one = tree.find(1).unwrap();
        tree.node_mut(one).set_value(5);
        assert_eq!(
            tree.check_structure(),
            Err(InvariantError::Unordered {
                value: 5
            })
        );

        let mut tree = tree_of(&[2, 1, 3]);
        let three = tree.find(3).unwrap();
        tree.node_mut(three).set_parent(None);
        assert_eq!(
            tree.check_structure(),
            Err(InvariantError::BrokenParentLink {
                value: 3
            })
        );

        let mut tree = tree_of(&[2, 1]);
        let root = tree.root().unwrap();
        let one = tree.find(1);
        tree.node_mut(root).set_parent(one);
        assert_eq!(
            tree.check_structure(),
            Err(InvariantError::RootHasParent {
                value: 2
            })
        );
    }

    #[test]
    fn clear_resets_tree() {
        let mut tree = tree_of(&[3, 1, 2]);
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.first(), None);
        tree.check_structure().unwrap();
    }

    proptest! {
        #[test]
        fn matches_btreeset(operations in prop::collection::vec((any::<bool>(), -64i32..64), 0..512)) {
            let mut tree = RawBinaryTree::new();
            let mut model = BTreeSet::new();

            for (insert, value) in operations {
                if insert {
                    prop_assert_eq!(tree.insert(value).is_some(), model.insert(value));
                } else {
                    prop_assert_eq!(tree.delete(value).is_some(), model.remove(&value));
                }
                prop_assert_eq!(tree.len(), model.len());
                prop_assert_eq!(tree.check_structure(), Ok(()));
            }

            prop_assert_eq!(in_order(&tree), model.into_iter().collect::<Vec<_>>());
        }
    }
}
