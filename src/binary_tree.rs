use core::fmt;

use crate::iter::{IntoIter, Iter};
use crate::raw::RawBinaryTree;
use crate::{InvariantError, NOT_FOUND};

/// An unbalanced binary search tree of unique `i32` keys.
///
/// Keys are placed by plain descent and never moved afterwards, so the tree's height
/// depends on insertion order: ascending input degenerates into a list. [`AvlTree`]
/// offers the same interface on top of the same core while keeping the height
/// logarithmic.
///
/// Iterators returned by [`BinaryTree::iter`] and [`BinaryTree::into_iter`] produce their
/// keys in ascending order.
///
/// [`AvlTree`]: crate::AvlTree
///
/// # Examples
///
/// ```
/// use avl_tree::{BinaryTree, NOT_FOUND};
///
/// let mut tree = BinaryTree::new();
/// assert!(tree.insert(5));
/// assert!(tree.insert(3));
/// assert!(!tree.insert(5));
///
/// assert_eq!(tree.contains(5), 0);
/// assert_eq!(tree.contains(3), 1);
/// assert_eq!(tree.contains(4), NOT_FOUND);
///
/// assert!(tree.delete(5));
/// assert_eq!(tree.iter().collect::<Vec<_>>(), [3]);
/// ```
#[derive(Clone)]
pub struct BinaryTree {
    raw: RawBinaryTree,
}

/// Converts an optional depth into the `contains` sentinel form.
pub(crate) fn depth_or_not_found(depth: Option<usize>) -> i32 {
    depth.map_or(NOT_FOUND, |depth| {
        i32::try_from(depth).expect("`contains()` - depth does not fit in `i32`!")
    })
}

impl BinaryTree {
    /// Makes a new, empty `BinaryTree`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let tree = BinaryTree::new();
    /// assert_eq!(tree.size(), 0);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        BinaryTree {
            raw: RawBinaryTree::new(),
        }
    }

    /// Creates an empty tree with room for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let tree = BinaryTree::with_capacity(16);
    /// assert!(tree.is_empty());
    /// assert!(tree.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        BinaryTree {
            raw: RawBinaryTree::with_capacity(capacity),
        }
    }

    /// Returns the number of keys the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Adds `value` to the tree.
    ///
    /// Returns `true` if the value was added, `false` if it was already present,
    /// in which case the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let mut tree = BinaryTree::new();
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(2));
    /// assert_eq!(tree.size(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn insert(&mut self, value: i32) -> bool {
        self.raw.insert(value).is_some()
    }

    /// Removes `value` from the tree.
    ///
    /// Returns `true` if the value was present. A node with two children keeps its
    /// place and takes over its in-order successor's key; the successor's node is the
    /// one unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let mut tree = BinaryTree::from([2, 1, 3]);
    /// assert!(tree.delete(2));
    /// assert!(!tree.delete(2));
    /// assert_eq!(tree.contains(3), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    pub fn delete(&mut self, value: i32) -> bool {
        self.raw.delete(value).is_some()
    }

    /// Returns the depth of `value` (the root is at depth 0), or [`NOT_FOUND`] if the
    /// tree does not contain it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{BinaryTree, NOT_FOUND};
    ///
    /// let tree = BinaryTree::from([2, 1, 3]);
    /// assert_eq!(tree.contains(2), 0);
    /// assert_eq!(tree.contains(3), 1);
    /// assert_eq!(tree.contains(7), NOT_FOUND);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(depth)
    #[must_use]
    pub fn contains(&self, value: i32) -> i32 {
        depth_or_not_found(self.raw.depth_of(value))
    }

    /// Returns the depth of `value`, or `None` if the tree does not contain it.
    ///
    /// This is [`contains`](BinaryTree::contains) without the sentinel.
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

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let tree = BinaryTree::from([3, 1, 2]);
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [1, 2, 3]);
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

    /// Returns the number of keys in the tree. Same as [`size`](BinaryTree::size).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let mut tree = BinaryTree::from([1, 2]);
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Verifies search order, parent links and the recorded size.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant. Trees built only through this type's
    /// methods always pass.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_structure()
    }
}

impl Default for BinaryTree {
    fn default() -> Self {
        BinaryTree::new()
    }
}

impl fmt::Debug for BinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for BinaryTree {
    fn eq(&self, other: &BinaryTree) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for BinaryTree {}

impl FromIterator<i32> for BinaryTree {
    fn from_iter<I: IntoIterator<Item = i32>>(iter: I) -> Self {
        let mut tree = BinaryTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<i32> for BinaryTree {
    fn extend<I: IntoIterator<Item = i32>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> Extend<&'a i32> for BinaryTree {
    fn extend<I: IntoIterator<Item = &'a i32>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<const N: usize> From<[i32; N]> for BinaryTree {
    /// Builds a tree by inserting the array's values in order, skipping duplicates.
    ///
    /// ```
    /// use avl_tree::BinaryTree;
    ///
    /// let tree = BinaryTree::from([3, 1, 3]);
    /// assert_eq!(tree.size(), 2);
    /// ```
    fn from(values: [i32; N]) -> Self {
        values.into_iter().collect()
    }
}

impl From<&[i32]> for BinaryTree {
    fn from(values: &[i32]) -> Self {
        values.iter().copied().collect()
    }
}

impl IntoIterator for BinaryTree {
    type Item = i32;
    type IntoIter = IntoIter;

    fn into_iter(self) -> IntoIter {
        IntoIter::new(self.raw)
    }
}

impl<'a> IntoIterator for &'a BinaryTree {
    type Item = i32;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}
