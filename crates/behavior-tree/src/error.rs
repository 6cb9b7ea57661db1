//! Errors that abort a tick.
//!
//! `Status::Failure` is ordinary control flow and never shows up here. These
//! errors signal a misconfigured tree and abort the tick in which they occur.

use thiserror::Error;

/// Errors surfaced while evaluating a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node was referenced by a name that is not registered.
    #[error("no node with name '{name}' registered")]
    Lookup { name: String },

    /// A continuation path points past the end of a composite's children.
    #[error("continuation index {index} is out of range for a composite with {len} children")]
    PathOutOfRange { index: usize, len: usize },

    /// A continuation path still has indices left when it reaches a leaf.
    #[error("continuation path has {remaining} unconsumed indices at a leaf")]
    PathTooDeep { remaining: usize },
}

impl TreeError {
    /// Returns `true` if the error means the tree changed shape while a
    /// continuation path was outstanding.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            TreeError::PathOutOfRange { .. } | TreeError::PathTooDeep { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TreeError>;
