use core::fmt;
use core::iter::FusedIterator;

use crate::raw::{Handle, RawBinaryTree};

static EMPTY: RawBinaryTree = RawBinaryTree::new();

/// An iterator over the keys of a [`BinaryTree`] or [`AvlTree`] in ascending order.
///
/// This `struct` is created by the `iter` method on either tree. Each step moves to the
/// in-order successor of the previous key, so a step costs O(height) in the worst case
/// and O(1) amortized over a full traversal.
///
/// The iterator borrows the tree, so the tree cannot be modified while it is alive.
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([3, 1, 2]);
/// let mut iter = tree.iter();
/// assert_eq!(iter.peek(), Some(1));
/// assert_eq!(iter.next(), Some(1));
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.collect::<Vec<_>>(), [2, 3]);
/// ```
///
/// [`BinaryTree`]: crate::BinaryTree
/// [`AvlTree`]: crate::AvlTree
#[must_use = "iterators are lazy and do nothing unless consumed"]
#[derive(Clone)]
pub struct Iter<'a> {
    tree: &'a RawBinaryTree,
    next: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the keys of a tree in ascending order.
///
/// This `struct` is created by the `into_iter` method on [`BinaryTree`] or [`AvlTree`]
/// (provided by the [`IntoIterator`] trait).
///
/// # Examples
///
/// ```
/// use avl_tree::BinaryTree;
///
/// let tree = BinaryTree::from([2, 3, 1]);
/// let values: Vec<i32> = tree.into_iter().collect();
/// assert_eq!(values, [1, 2, 3]);
/// ```
///
/// [`BinaryTree`]: crate::BinaryTree
/// [`AvlTree`]: crate::AvlTree
pub struct IntoIter {
    tree: RawBinaryTree,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(tree: &'a RawBinaryTree) -> Self {
        Iter {
            tree,
            next: tree.first(),
            remaining: tree.len(),
        }
    }

    /// Returns the key the next call to `next` will yield, without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<i32> {
        self.next.map(|handle| self.tree.node(handle).value())
    }
}

impl IntoIter {
    pub(crate) fn new(tree: RawBinaryTree) -> Self {
        IntoIter {
            next: tree.first(),
            remaining: tree.len(),
            tree,
        }
    }

    /// Returns the key the next call to `next` will yield, without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<i32> {
        self.next.map(|handle| self.tree.node(handle).value())
    }
}

impl Iterator for Iter<'_> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let handle = self.next?;
        self.next = self.tree.successor(handle);
        self.remaining -= 1;
        Some(self.tree.node(handle).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(self) -> Option<i32> {
        self.next.and_then(|_| self.tree.last()).map(|handle| self.tree.node(handle).value())
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for Iter<'_> {}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl Default for Iter<'_> {
    /// Creates an empty `Iter`.
    ///
    /// ```
    /// # use avl_tree::Iter;
    /// let iter: Iter<'_> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter::new(&EMPTY)
    }
}

impl Iterator for IntoIter {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let handle = self.next?;
        self.next = self.tree.successor(handle);
        self.remaining -= 1;
        Some(self.tree.node(handle).value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl FusedIterator for IntoIter {}

impl fmt::Debug for IntoIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("next", &self.peek()).field("remaining", &self.remaining).finish()
    }
}

impl Default for IntoIter {
    /// Creates an empty `IntoIter`.
    ///
    /// ```
    /// # use avl_tree::IntoIter;
    /// let iter: IntoIter = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        IntoIter::new(RawBinaryTree::new())
    }
}
