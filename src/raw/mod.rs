mod arena;
mod handle;
mod node;
mod raw_binary_tree;

pub(crate) use handle::Handle;
pub(crate) use raw_binary_tree::RawBinaryTree;
