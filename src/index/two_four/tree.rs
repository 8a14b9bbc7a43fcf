//! TwoFourTree - the tree handle and its non-mutating queries.
//!
//! The operations themselves live next door:
//! - [`search`](super::search) - `contains`
//! - [`insert`](super::insert) - top-down splitting insertion
//! - [`delete`](super::delete) - top-down rotate/merge deletion
//! - [`iter`](super::iter) - in-order traversal
//! - [`validate`](super::validate) - invariant checking

use std::fmt;

use log::{debug, trace};

use crate::common::config::Key;
use crate::common::{NodeId, TreeConfig};
use crate::index::two_four::arena::NodeArena;
use crate::index::two_four::stats::TreeStats;
use crate::index::two_four::trace::{Observer, RebalanceEvent};

/// A balanced order-4 search tree over integer keys.
///
/// # Architecture
/// ```text
/// ┌────────────────────────────────────────────────────────┐
/// │                      TwoFourTree                       │
/// │  root: Option<NodeId> ─┐                               │
/// │                        ▼                               │
/// │  arena: NodeArena  [Node0] [Node1] [Node2] ...         │
/// │     children: NodeId (owning)  parent: NodeId (back)   │
/// │  ┌──────────┐  ┌────────────┐  ┌──────────────────┐    │
/// │  │  config  │  │   stats    │  │ observer (opt.)  │    │
/// │  └──────────┘  └────────────┘  └──────────────────┘    │
/// └────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// Not synchronised. Wrap in [`SharedTree`](crate::SharedTree) to share
/// between threads.
///
/// # Example
/// ```
/// use twofourdb::TwoFourTree;
///
/// let mut tree = TwoFourTree::new();
/// for key in [10, 20, 5, 6] {
///     assert!(tree.insert(key));
/// }
///
/// assert!(tree.contains(6));
/// assert!(tree.delete(10));
/// assert_eq!(tree.in_order(), vec![5, 6, 20]);
/// ```
pub struct TwoFourTree {
    /// Owns every node.
    pub(crate) arena: NodeArena,

    /// Root node, or `None` for an empty tree.
    pub(crate) root: Option<NodeId>,

    /// Number of keys stored.
    pub(crate) len: usize,

    config: TreeConfig,

    pub(crate) stats: TreeStats,

    observer: Option<Observer>,
}

impl TwoFourTree {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        debug!(
            "creating 2-3-4 tree (capacity: {}, trace: {})",
            config.initial_capacity, config.trace_rebalancing
        );
        Self {
            arena: NodeArena::with_capacity(config.initial_capacity),
            root: None,
            len: 0,
            config,
            stats: TreeStats::new(),
            observer: None,
        }
    }

    // ========================================================================
    // Public API: Size and shape
    // ========================================================================

    /// Number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 for an empty tree, 1 for a lone leaf root.
    ///
    /// Every leaf sits at the same depth, so following the leftmost
    /// spine is enough.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut current = self.root;
        while let Some(node_id) = current {
            height += 1;
            let node = &self.arena[node_id];
            current = if node.is_leaf() { None } else { Some(node.child(0)) };
        }
        height
    }

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.arena.live_count()
    }

    /// Smallest key, if any.
    pub fn min(&self) -> Option<Key> {
        let mut node_id = self.root?;
        loop {
            let node = &self.arena[node_id];
            if node.is_leaf() {
                return Some(node.first_key());
            }
            node_id = node.child(0);
        }
    }

    /// Largest key, if any.
    pub fn max(&self) -> Option<Key> {
        let mut node_id = self.root?;
        loop {
            let node = &self.arena[node_id];
            if node.is_leaf() {
                return Some(node.last_key());
            }
            node_id = node.child(node.len());
        }
    }

    /// Remove every key. Statistics are kept.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} keys", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    // ========================================================================
    // Public API: Config, stats and tracing
    // ========================================================================

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Get tree statistics.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    /// Install a callback invoked at every split, rotation and merge.
    pub fn set_observer<F>(&mut self, observer: F)
    where
        F: Fn(&RebalanceEvent) + Send + Sync + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Report a restructuring step to the log and the observer.
    pub(crate) fn emit(&self, event: RebalanceEvent) {
        if self.config.trace_rebalancing {
            trace!("{}", event);
        }
        if let Some(observer) = &self.observer {
            observer(&event);
        }
    }

    // ========================================================================
    // Public API: Diagnostics
    // ========================================================================

    /// Render the tree structure, one key per line, each level indented
    /// two spaces deeper than its parent.
    ///
    /// ```
    /// use twofourdb::TwoFourTree;
    ///
    /// let tree: TwoFourTree = [1, 2, 3, 4].into_iter().collect();
    /// assert_eq!(tree.dump(), "  1\n2\n  3\n  4\n");
    /// ```
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if let Some(root) = self.root {
            self.dump_node(root, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, node_id: NodeId, depth: usize, out: &mut String) {
        let node = &self.arena[node_id];
        for (i, &key) in node.keys().iter().enumerate() {
            if !node.is_leaf() {
                self.dump_node(node.child(i), depth + 1, out);
            }
            out.push_str(&"  ".repeat(depth));
            out.push_str(&key.to_string());
            out.push('\n');
        }
        if !node.is_leaf() {
            self.dump_node(node.child(node.len()), depth + 1, out);
        }
    }
}

impl Default for TwoFourTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TwoFourTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoFourTree")
            .field("len", &self.len)
            .field("height", &self.height())
            .field("nodes", &self.node_count())
            .field("capacity", &self.arena.capacity())
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl fmt::Display for TwoFourTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Key> for TwoFourTree {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut tree = TwoFourTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<Key> for TwoFourTree {
    fn extend<I: IntoIterator<Item = Key>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_empty_tree() {
        let tree = TwoFourTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.dump(), "");
        assert_eq!(tree.to_string(), "{}");
    }

    #[test]
    fn test_min_max_height() {
        let tree: TwoFourTree = (1..=100).collect();
        assert_eq!(tree.min(), Some(1));
        assert_eq!(tree.max(), Some(100));
        // 4^3 - 1 < 100 keys need four levels; a 2-3-4 tree never exceeds log2(n + 1).
        assert!(tree.height() >= 4 && tree.height() <= 6);
    }

    #[test]
    fn test_display() {
        let tree: TwoFourTree = [3, 1, 2].into_iter().collect();
        assert_eq!(tree.to_string(), "{1, 2, 3}");
    }

    #[test]
    fn test_clear() {
        let mut tree: TwoFourTree = (0..50).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert!(!tree.contains(10));

        assert!(tree.insert(10));
        assert_eq!(tree.in_order(), vec![10]);
    }

    #[test]
    fn test_observer_sees_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);

        let mut tree = TwoFourTree::with_config(TreeConfig::default().with_trace_rebalancing(true));
        tree.set_observer(move |event| sink.lock().push(*event));

        for key in 1..=4 {
            tree.insert(key);
        }

        let events = events.lock();
        assert!(events.iter().any(|e| matches!(e, RebalanceEvent::RootGrown { .. })));
        assert!(events.iter().any(|e| matches!(e, RebalanceEvent::Split { median: 2, .. })));
    }

    #[test]
    fn test_debug_format() {
        let tree: TwoFourTree = (0..10).collect();
        let debug = format!("{:?}", tree);
        assert!(debug.contains("len: 10"));
        assert!(debug.contains("observer: false"));
    }
}
