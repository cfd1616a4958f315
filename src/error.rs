use thiserror::Error;

/// A structural invariant found broken by `check_invariants`.
///
/// Every public operation preserves these invariants, so seeing one of these
/// means the tree was corrupted.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub enum InvariantError {
    /// The root node records a parent.
    #[error("root node {value} has a parent")]
    RootHasParent { value: i32 },
    /// A child's parent link does not point back to the node that holds it.
    #[error("node {value} is not linked back to its parent")]
    BrokenParentLink { value: i32 },
    /// A node's key lies outside the range allowed by its ancestors.
    #[error("node {value} violates search order")]
    Unordered { value: i32 },
    /// The recorded size disagrees with the nodes reachable from the root.
    #[error("size is {recorded} but {reachable} nodes are reachable")]
    LenMismatch { recorded: usize, reachable: usize },
    /// A stored height disagrees with the height recomputed from the leaves.
    #[error("node {value} stores height {stored}, expected {computed}")]
    HeightMismatch { value: i32, stored: u32, computed: u32 },
    /// The subtree heights of a node differ by more than one.
    #[error("node {value} has balance factor {balance}")]
    Unbalanced { value: i32, balance: i32 },
}
