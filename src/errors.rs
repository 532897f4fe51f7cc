//! Traversal error taxonomy.
//!
//! Two kinds of failure can end a traversal early:
//!
//! - **Engine-detected defects**: a missing root or an unregistered variant
//!   tag. These signal configuration or programming errors in the caller,
//!   not bad data.
//!
//! - **Handler-raised domain errors**: opaque to the engine and carried
//!   through unchanged.
//!
//! There are no retries and no partial results: the caller sees exactly one
//! aggregate value or one error, as if a recursive evaluation had thrown
//! from the same depth.

use thiserror::Error;

/// Error produced by a traversal.
///
/// `Tag` is the node-variant discriminator of the tree being traversed and
/// `E` is the handlers' own domain error type.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WalkError<Tag, E> {
    /// Traversal was started without a root node.
    #[error("traversal started without a root node")]
    MissingRoot,

    /// A node's variant tag has no registered handler.
    ///
    /// Fatal to the traversal: the registry must cover every variant
    /// reachable in the tree.
    #[error("no handler registered for node variant `{tag}`")]
    UnregisteredVariant {
        /// The tag that had no handler.
        tag: Tag,
    },

    /// A handler failed. The error is carried through unchanged; the rest of
    /// the work stack is abandoned.
    #[error("{0}")]
    Handler(E),
}
