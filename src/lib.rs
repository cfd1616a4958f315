//! Arena-backed AVL tree of unique integer keys for Rust.
//!
//! This crate provides [`AvlTree`], a self-balancing binary search tree of `i32` keys,
//! and [`BinaryTree`], the plain search tree it is layered on. Both offer the same
//! small interface:
//!
//! - [`insert`](AvlTree::insert) / [`delete`](AvlTree::delete) - report whether the tree changed
//! - [`contains`](AvlTree::contains) - depth of a key, or [`NOT_FOUND`]
//! - [`iter`](AvlTree::iter) - ascending traversal
//!
//! # Example
//!
//! ```
//! use avl_tree::{AvlTree, BinaryTree, NOT_FOUND};
//!
//! let mut avl = AvlTree::new();
//! let mut bst = BinaryTree::new();
//! for value in 0..15 {
//!     avl.insert(value);
//!     bst.insert(value);
//! }
//!
//! // The plain tree degenerates into a chain, the AVL tree does not.
//! assert_eq!(bst.contains(14), 14);
//! assert_eq!(avl.contains(14), 3);
//! assert_eq!(avl.contains(15), NOT_FOUND);
//!
//! assert!(avl.delete(7));
//! assert_eq!(avl.iter().count(), 14);
//! assert_eq!(avl.check_invariants(), Ok(()));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **No `unsafe`** - Nodes live in an arena and link to each other through handles
//! - **Diagnostics** - [`check_invariants`](AvlTree::check_invariants) verifies the whole
//!   structure and rotations are reported through the [`log`] facade at `trace` level
//!
//! # Implementation
//!
//! Deleting a key whose node has two children copies the in-order successor's key into
//! that node and unlinks the successor's node instead. Rebalancing after a deletion
//! therefore starts from where the successor used to be.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod iter;
mod raw;

pub mod avl_tree;
pub mod binary_tree;

pub use avl_tree::AvlTree;
pub use binary_tree::BinaryTree;
pub use error::InvariantError;
pub use iter::{IntoIter, Iter};

/// Returned by `contains` when the key is absent. Depths are never negative.
///
/// # Examples
///
/// ```
/// use avl_tree::{BinaryTree, NOT_FOUND};
///
/// assert_eq!(BinaryTree::new().contains(1), NOT_FOUND);
/// ```
pub const NOT_FOUND: i32 = -1;
