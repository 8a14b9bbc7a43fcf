//! Configuration constants and tree construction options.

/// Integer key stored in the tree.
pub type Key = i32;

/// Maximum number of keys in a node (a 4-node).
///
/// This is what makes the tree a 2-3-4 tree:
/// - 1 key, 2 children: 2-node
/// - 2 keys, 3 children: 3-node
/// - 3 keys, 4 children: 4-node
pub const MAX_KEYS: usize = 3;

/// Maximum number of children of an internal node.
pub const MAX_CHILDREN: usize = MAX_KEYS + 1;

/// Minimum number of keys in any node that survives an operation.
pub const MIN_KEYS: usize = 1;

/// Default number of node slots reserved up front.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Options passed to [`TwoFourTree::with_config`](crate::TwoFourTree::with_config).
///
/// # Example
/// ```
/// use twofourdb::{TreeConfig, TwoFourTree};
///
/// let config = TreeConfig::default()
///     .with_initial_capacity(1024)
///     .with_trace_rebalancing(true);
/// let tree = TwoFourTree::with_config(config);
/// assert!(tree.config().trace_rebalancing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Node slots reserved in the arena at construction.
    pub initial_capacity: usize,

    /// Emit every split/rotate/merge through `log::trace!`.
    pub trace_rebalancing: bool,
}

impl TreeConfig {
    /// Set the number of node slots reserved up front.
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Enable or disable rebalancing trace output.
    pub fn with_trace_rebalancing(mut self, enabled: bool) -> Self {
        self.trace_rebalancing = enabled;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            trace_rebalancing: false,
        }
    }
}
