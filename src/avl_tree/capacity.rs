use super::AvlTree;

impl AvlTree {
    /// Returns the fewest nodes an AVL tree of the given height can hold.
    ///
    /// These counts follow `N(h) = N(h - 1) + N(h - 2) + 1` with `N(0) = 1` and
    /// `N(1) = 2`, i.e. one less than the Fibonacci number `F(h + 3)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// assert_eq!(AvlTree::min_nodes(0), 1);
    /// assert_eq!(AvlTree::min_nodes(1), 2);
    /// assert_eq!(AvlTree::min_nodes(2), 4);
    /// assert_eq!(AvlTree::min_nodes(3), 7);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the count does not fit in `usize`.
    ///
    /// # Complexity
    ///
    /// O(height)
    #[must_use]
    pub const fn min_nodes(height: u32) -> usize {
        let mut shorter: usize = 1;
        let mut taller: usize = 2;
        if height == 0 {
            return shorter;
        }

        let mut h = 1;
        while h < height {
            let Some(next) = taller.checked_add(shorter) else {
                panic!("`AvlTree::min_nodes()` - result overflows `usize`!");
            };
            let Some(next) = next.checked_add(1) else {
                panic!("`AvlTree::min_nodes()` - result overflows `usize`!");
            };
            shorter = taller;
            taller = next;
            h += 1;
        }
        taller
    }

    /// Returns the most nodes a binary tree of the given height can hold, `2^(h + 1) - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// assert_eq!(AvlTree::max_nodes(0), 1);
    /// assert_eq!(AvlTree::max_nodes(1), 3);
    /// assert_eq!(AvlTree::max_nodes(2), 7);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `height >= usize::BITS`.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn max_nodes(height: u32) -> usize {
        assert!(height < usize::BITS, "`AvlTree::max_nodes()` - result overflows `usize`!");
        usize::MAX >> (usize::BITS - 1 - height)
    }
}
