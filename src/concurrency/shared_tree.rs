//! SharedTree - a [`TwoFourTree`] behind a reader-writer lock.

use parking_lot::RwLock;

use crate::common::config::Key;
use crate::common::{Result, TreeConfig};
use crate::index::two_four::{StatsSnapshot, TwoFourTree};

/// A tree that can be shared between threads via `Arc<SharedTree>`.
///
/// # Thread Safety
/// - `insert`, `delete`: write lock, held for exactly one operation
/// - `contains`, `in_order`, `len`, `validate`: read lock, many readers at once
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use twofourdb::SharedTree;
///
/// let tree = Arc::new(SharedTree::new());
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let tree = Arc::clone(&tree);
///         thread::spawn(move || {
///             for k in 0..100 {
///                 tree.insert(t * 100 + k);
///             }
///         })
///     })
///     .collect();
/// for h in handles {
///     h.join().unwrap();
/// }
/// assert_eq!(tree.len(), 400);
/// ```
#[derive(Debug, Default)]
pub struct SharedTree {
    inner: RwLock<TwoFourTree>,
}

impl SharedTree {
    /// Create an empty shared tree with the default configuration.
    pub fn new() -> Self {
        Self::from_tree(TwoFourTree::new())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self::from_tree(TwoFourTree::with_config(config))
    }

    /// Wrap an existing tree.
    pub fn from_tree(tree: TwoFourTree) -> Self {
        Self {
            inner: RwLock::new(tree),
        }
    }

    /// Unwrap into the inner tree.
    pub fn into_inner(self) -> TwoFourTree {
        self.inner.into_inner()
    }

    // ========================================================================
    // Writers (exclusive)
    // ========================================================================

    pub fn insert(&self, key: Key) -> bool {
        self.inner.write().insert(key)
    }

    pub fn delete(&self, key: Key) -> bool {
        self.inner.write().delete(key)
    }

    // ========================================================================
    // Readers (shared)
    // ========================================================================

    pub fn contains(&self, key: Key) -> bool {
        self.inner.read().contains(key)
    }

    /// Snapshot of all keys in ascending order.
    pub fn in_order(&self) -> Vec<Key> {
        self.inner.read().in_order()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Check every structural invariant under the read lock.
    ///
    /// # Errors
    /// - `Error::InvariantViolation` naming the first offending node
    pub fn validate(&self) -> Result<()> {
        self.inner.read().validate()
    }

    pub fn stats_snapshot(&self) -> StatsSnapshot {
        self.inner.read().stats().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_shared_basic_ops() {
        let tree = SharedTree::new();
        assert!(tree.is_empty());
        assert!(tree.insert(5));
        assert!(!tree.insert(5));
        assert!(tree.contains(5));
        assert!(tree.delete(5));
        assert!(!tree.contains(5));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_concurrent_readers() {
        let tree = Arc::new(SharedTree::from_tree((0..1000).collect()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || {
                    for k in 0..1000 {
                        assert!(tree.contains(k));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tree.stats_snapshot().searches, 8000);
    }

    #[test]
    fn test_into_inner() {
        let tree = SharedTree::with_config(TreeConfig::default().with_initial_capacity(4));
        tree.insert(1);
        tree.insert(2);
        let inner = tree.into_inner();
        assert_eq!(inner.in_order(), vec![1, 2]);
        assert_eq!(inner.config().initial_capacity, 4);
    }
}
