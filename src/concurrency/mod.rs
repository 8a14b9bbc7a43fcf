//! Thread-safe access to a tree.
//!
//! The tree itself is single-threaded. [`SharedTree`] adds the one
//! exclusive lock per mutating operation needed to share it.

mod shared_tree;

pub use shared_tree::SharedTree;
