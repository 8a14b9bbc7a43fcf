//! 2-3-4 tree index.
//!
//! A balanced order-4 multiway search tree: every internal node holds 1-3
//! keys and 2-4 children, and all leaves sit at the same depth. Both
//! insertion and deletion restructure on the way down, so neither ever
//! backtracks.
//!
//! # Components
//! - [`TwoFourTree`] - The tree handle and its public operations
//! - [`Iter`] - Ascending in-order iterator
//! - [`TreeStats`] / [`StatsSnapshot`] - Operation and rebalancing counters
//! - [`RebalanceEvent`] - Split/rotate/merge notifications for tracing

mod arena;
mod delete;
mod insert;
mod iter;
mod node;
mod search;
mod stats;
mod trace;
mod tree;
mod validate;

pub use iter::Iter;
pub use stats::{StatsSnapshot, TreeStats};
pub use trace::{Observer, RebalanceEvent, Side};
pub use tree::TwoFourTree;
