use super::handle::Handle;

/// A single stored key together with its links.
///
/// The arena owns every node; `parent`, `left` and `right` are plain handles into it.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    value: i32,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // Longest downward path to a leaf. Only maintained by the AVL layer.
    height: u32,
}

impl Node {
    /// Creates a detached leaf holding `value`.
    pub(crate) const fn new(parent: Option<Handle>, value: i32) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
            height: 0,
        }
    }

    #[inline]
    pub(crate) const fn value(&self) -> i32 {
        self.value
    }

    /// Overwrites the key in place. Only valid when the new key keeps the node's
    /// position ordered, i.e. when it is the key of the in-order successor being removed.
    pub(crate) fn set_value(&mut self, value: i32) {
        self.value = value;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    #[inline]
    pub(crate) const fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}
