use core::fmt;

use crate::InvariantError;
use crate::binary_tree::depth_or_not_found;
use crate::iter::{IntoIter, Iter};
use crate::raw::RawBinaryTree;

mod balance;
mod capacity;

/// A self-balancing binary search tree of unique `i32` keys.
///
/// `AvlTree` runs the same insertion and deletion as [`BinaryTree`], then walks from
/// the changed node toward the root, recomputing heights and rotating wherever the
/// subtree heights of a node differ by two. The height therefore stays within about
/// 1.44 log2(n), and every operation below is O(log n).
///
/// Absence is reported through sentinels rather than errors: `insert` and `delete`
/// return `false`, [`contains`](AvlTree::contains) returns [`NOT_FOUND`].
///
/// [`BinaryTree`]: crate::BinaryTree
/// [`NOT_FOUND`]: crate::NOT_FOUND
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, NOT_FOUND};
///
/// let mut tree = AvlTree::new();
/// for value in 1..=7 {
///     tree.insert(value);
/// }
///
/// // Sorted input still yields a perfectly balanced tree.
/// assert_eq!(tree.height(), Some(2));
/// assert_eq!(tree.contains(4), 0);
/// assert_eq!(tree.contains(8), NOT_FOUND);
///
/// assert!(tree.delete(4));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3, 5, 6, 7]);
/// ```
///
/// A tree with a known list of keys can be initialized from an array; duplicates
/// are skipped:
///
/// ```
/// use avl_tree::AvlTree;
///
/// let tree = AvlTree::from([3, 1, 3, 2]);
/// assert_eq!(tree.size(), 3);
/// ```
#[derive(Clone)]
pub struct AvlTree {
    raw: RawBinaryTree,
    /// Rebalances (single or double rotations) performed since construction.
    rebalances: usize,
}

impl AvlTree {
    /// Makes a new, empty `AvlTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::new();
    /// assert_eq!(tree.size(), 0);
    /// assert_eq!(tree.height(), None);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree {
            raw: RawBinaryTree::new(),
            rebalances: 0,
        }
    }

    /// Creates an empty tree with room for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::with_capacity(32);
    /// assert!(tree.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlTree {
            raw: RawBinaryTree::with_capacity(capacity),
            rebalances: 0,
        }
    }

    /// Returns the number of keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Adds `value` to the tree, rebalancing if needed.
    ///
    /// Returns `true` if the value was added, `false` if it was already present,
    /// in which case the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(tree.insert(3));
    /// assert!(!tree.insert(3));
    ///
    /// // The ascending run was rotated so that 2 is the root.
    /// assert_eq!(tree.contains(2), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: i32) -> bool {
        match self.raw.insert(value) {
            Some(added) => {
                self.rebalance_after_insert(added);
                true
            }
            None => false,
        }
    }

    /// Removes `value` from the tree, rebalancing if needed.
    ///
    /// Returns `true` if the value was present. A node with two children keeps its
    /// place and takes over its in-order successor's key; rebalancing starts where the
    /// successor's node was unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::from([2, 1, 3]);
    /// assert!(tree.delete(2));
    /// assert!(!tree.delete(2));
    /// assert_eq!(tree.contains(3), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete(&mut self, value: i32) -> bool {
        match self.raw.delete(value) {
            Some(removed) => {
                self.rebalance_after_delete(removed.parent);
                true
            }
            None => false,
        }
    }

    /// Returns the depth of `value` (the root is at depth 0), or [`NOT_FOUND`] if the
    /// tree does not contain it.
    ///
    /// [`NOT_FOUND`]: crate::NOT_FOUND
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, NOT_FOUND};
    ///
    /// let tree = AvlTree::from([7]);
    /// assert_eq!(tree.contains(7), 0);
    /// assert_eq!(tree.contains(8), NOT_FOUND);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, value: i32) -> i32 {
        depth_or_not_found(self.raw.depth_of(value))
    }

    /// Returns the depth of `value`, or `None` if the tree does not contain it.
    ///
    /// This is [`contains`](AvlTree::contains) without the sentinel.
    #[must_use]
    pub fn depth_of(&self, value: i32) -> Option<usize> {
        self.raw.depth_of(value)
    }

    /// Returns the smallest key, if any.
    #[must_use]
    pub fn first(&self) -> Option<i32> {
        self.raw.first().map(|handle| self.raw.node(handle).value())
    }

    /// Returns the largest key, if any.
    #[must_use]
    pub fn last(&self) -> Option<i32> {
        self.raw.last().map(|handle| self.raw.node(handle).value())
    }

    /// Returns the height of the tree (a single node has height 0), or `None` if empty.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn height(&self) -> Option<u32> {
        self.raw.root().map(|root| self.raw.node(root).height())
    }

    /// Returns how many rebalances this tree has performed since it was created.
    ///
    /// A left-right or right-left double rotation counts once. An insertion adds at
    /// most one; a deletion may add one per ancestor of the unlinked node. Clones
    /// start from their source's count.
    #[must_use]
    pub const fn rebalance_count(&self) -> usize {
        self.rebalances
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree = AvlTree::from([5, 3, 8, 1, 4, 7, 9, 2, 6]);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3, 4, 5, 6, 7, 8, 9]);
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.raw)
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn size(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of keys in the tree. Same as [`size`](AvlTree::size).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key. The rebalance count is kept.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Verifies search order, parent links, the recorded size, every stored height
    /// and every balance factor.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant. Trees built only through this type's
    /// methods always pass.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let tree: AvlTree = (0..100).collect();
    /// assert_eq!(tree.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_structure()?;
        self.check_balance(self.raw.root()).map(|_| ())
    }
}

impl Default for AvlTree {
    fn default() -> Self {
        AvlTree::new()
    }
}

impl fmt::Debug for AvlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for AvlTree {
    fn eq(&self, other: &AvlTree) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for AvlTree {}

impl FromIterator<i32> for AvlTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = AvlTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for AvlTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> Extend<&'a i32> for AvlTree {
    fn extend<I: IntoIterator<Item = &'a i32>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<const N: usize> From<[i32; N]> for AvlTree {
    fn from(values: [i32; N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<&[i32]> for AvlTree {
    fn from(values: &[i32]) -> Self {
        values.iter().copied().collect()
    }
}

impl IntoIterator for AvlTree {
    type Item = i32;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter::new(self.raw)
    }
}

impl<'a> IntoIterator for &'a AvlTree {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
