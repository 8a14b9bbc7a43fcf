//! twofourdb - An arena-backed 2-3-4 tree index over integer keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           twofourdb                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          Concurrency Layer (concurrency/)               │   │
//! │  │        SharedTree: one RwLock guard per operation        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │            Index Layer (index/two_four/)                 │   │
//! │  │   insert: split 4-nodes on the way down                  │   │
//! │  │   delete: rotate / merge 2-nodes on the way down         │   │
//! │  │   contains, iter, validate, stats, trace events          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node storage (NodeArena)                    │   │
//! │  │   Vec<Node> + free list, children and parents by NodeId  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - The 2-3-4 tree
//! - [`concurrency`] - Lock wrapper for sharing a tree between threads
//!
//! # Quick Start
//! ```
//! use twofourdb::TwoFourTree;
//!
//! let mut tree = TwoFourTree::new();
//! for key in [2, 3, 5, 7, 11, 13] {
//!     tree.insert(key);
//! }
//!
//! assert!(tree.contains(7));
//! assert!(tree.delete(7));
//! assert!(!tree.contains(7));
//! assert_eq!(tree.in_order(), vec![2, 3, 5, 11, 13]);
//! tree.validate().unwrap();
//! ```

// Core modules
pub mod common;
pub mod concurrency;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{Key, MAX_CHILDREN, MAX_KEYS};
pub use common::{Error, NodeId, Result, TreeConfig};

pub use concurrency::SharedTree;
pub use index::two_four::{Iter, RebalanceEvent, Side, StatsSnapshot, TreeStats, TwoFourTree};
