//! Index structures.
//!
//! Currently implements:
//! - [`two_four`] - In-memory 2-3-4 tree over integer keys

pub mod two_four;

pub use two_four::TwoFourTree;
