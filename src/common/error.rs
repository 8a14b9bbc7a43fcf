//! Error types for twofourdb.

use thiserror::Error;

use crate::common::config::Key;
use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in twofourdb.
///
/// The boolean operations (`insert`, `contains`, `delete`) never fail; these
/// errors come only from the `try_*` variants and from [`validate`].
///
/// [`validate`]: crate::TwoFourTree::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key is already stored in the tree.
    #[error("Key {0} is already present")]
    DuplicateKey(Key),

    /// The key is not stored in the tree.
    #[error("Key {0} not found")]
    KeyNotFound(Key),

    /// A structural invariant does not hold.
    ///
    /// This indicates a bug in the tree, never a caller mistake.
    #[error("Invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}

impl Error {
    pub(crate) fn invariant(node: NodeId, reason: impl Into<String>) -> Self {
        Error::InvariantViolation {
            node,
            reason: reason.into(),
        }
    }
}
