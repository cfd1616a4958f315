use log::{debug, trace};

use super::AvlTree;
use crate::InvariantError;
use crate::raw::Handle;

impl AvlTree {
    /// Restores heights and balance on the path above a freshly inserted leaf.
    ///
    /// At most one rebalance is needed: rotating at the lowest unbalanced ancestor
    /// brings that subtree back to its height before the insertion.
    pub(super) fn rebalance_after_insert(&mut self, added: Handle) {
        let Some(parent) = self.raw.node(added).parent() else {
            return;
        };
        // A parent of height 1 already had a leaf child, so its height does not change.
        if self.raw.node(parent).height() == 1 {
            return;
        }

        let mut current = parent;
        while let Some(up) = self.raw.node(current).parent() {
            self.update_height(current);
            if self.rebalance(up) {
                return;
            }
            current = up;
        }
        self.update_height(current);
    }

    /// Restores heights and balance from the parent of an unlinked node up to the root.
    ///
    /// Unlike insertion, a rotation can shorten its subtree, so every ancestor is visited.
    pub(super) fn rebalance_after_delete(&mut self, parent: Option<Handle>) {
        let before = self.rebalances;
        let mut current = parent;
        while let Some(handle) = current {
            self.rebalance(handle);
            self.update_height(handle);
            current = self.raw.node(handle).parent();
        }

        if self.rebalances - before > 1 {
            debug!("deletion rebalanced {} ancestors", self.rebalances - before);
        }
    }

    /// Rotates at `handle` if its subtrees differ in height by two. Returns whether it did.
    fn rebalance(&mut self, handle: Handle) -> bool {
        let node = self.raw.node(handle);
        let value = node.value();

        match self.balance_factor(handle) {
            2 => {
                let left = node.left().expect("`AvlTree::rebalance()` - left-heavy node has no left child!");
                if self.balance_factor(left) == -1 {
                    trace!("LR rebalance at {value}");
                    self.rotate_left(left);
                } else {
                    trace!("LL rebalance at {value}");
                }
                self.rotate_right(handle);
            }
            -2 => {
                let right = node.right().expect("`AvlTree::rebalance()` - right-heavy node has no right child!");
                if self.balance_factor(right) == 1 {
                    trace!("RL rebalance at {value}");
                    self.rotate_right(right);
                } else {
                    trace!("RR rebalance at {value}");
                }
                self.rotate_left(handle);
            }
            _ => return false,
        }

        self.rebalances += 1;
        true
    }

    /// Promotes the left child of `handle` into its place.
    fn rotate_right(&mut self, handle: Handle) {
        let node = self.raw.node(handle);
        let pivot = node.left().expect("`AvlTree::rotate_right()` - node has no left child!");
        let parent = node.parent();
        let moved = self.raw.node(pivot).right();
        trace!("rotate right at {}", node.value());

        self.raw.attach_left(handle, moved);
        self.raw.replace_child(parent, handle, Some(pivot));
        self.raw.attach_right(pivot, Some(handle));

        self.update_height(handle);
        self.update_height(pivot);
    }

    /// Promotes the right child of `handle` into its place.
    fn rotate_left(&mut self, handle: Handle) {
        let node = self.raw.node(handle);
        let pivot = node.right().expect("`AvlTree::rotate_left()` - node has no right child!");
        let parent = node.parent();
        let moved = self.raw.node(pivot).left();
        trace!("rotate left at {}", node.value());

        self.raw.attach_right(handle, moved);
        self.raw.replace_child(parent, handle, Some(pivot));
        self.raw.attach_left(pivot, Some(handle));

        self.update_height(handle);
        self.update_height(pivot);
    }

    /// Height of the subtree at `handle`, −1 for an absent subtree.
    fn subtree_height(&self, handle: Option<Handle>) -> i32 {
        handle.map_or(-1, |handle| self.raw.node(handle).height().cast_signed())
    }

    /// Left subtree height minus right subtree height.
    fn balance_factor(&self, handle: Handle) -> i32 {
        let node = self.raw.node(handle);
        self.subtree_height(node.left()) - self.subtree_height(node.right())
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.raw.node(handle);
        let height = 1 + self.subtree_height(node.left()).max(self.subtree_height(node.right()));
        self.raw.node_mut(handle).set_height(height.unsigned_abs());
    }

    /// Recomputes heights from the leaves, checking them against the stored ones and
    /// checking every balance factor. Returns the recomputed height of `handle`.
    pub(super) fn check_balance(&self, handle: Option<Handle>) -> Result<i32, InvariantError> {
        let Some(handle) = handle else {
            return Ok(-1);
        };
        let node = self.raw.node(handle);
        let left = self.check_balance(node.left())?;
        let right = self.check_balance(node.right())?;

        let computed = 1 + left.max(right);
        if node.height().cast_signed() != computed {
            return Err(InvariantError::HeightMismatch {
                value: node.value(),
                stored: node.height(),
                computed: computed.unsigned_abs(),
            });
        }

        let balance = left - right;
        if balance.abs() > 1 {
            return Err(InvariantError::Unbalanced {
                value: node.value(),
                balance,
            });
        }
        Ok(computed)
    }
}
