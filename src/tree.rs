//! Node abstraction for trees the walker can traverse.
//!
//! The engine never inspects a node's structure directly: it asks the node
//! for its variant tag, looks the tag up in the handler registry, and hands
//! the node to the registered handler. Deconstructing the node is the
//! handler's job.

use core::fmt::{Debug, Display};
use core::hash::Hash;

/// A node in a traversable tree.
///
/// The associated `Tag` is the discriminator the handler registry is keyed
/// on. It must be cheap to copy and printable so an unregistered-variant
/// error can name the handler that was missing.
///
/// Nodes are read-only to the engine; a traversal never mutates the tree.
pub trait TreeNode {
    /// Discriminator identifying which concrete variant this node is.
    type Tag: Copy + Eq + Hash + Debug + Display;

    /// The variant tag of this node.
    fn tag(&self) -> Self::Tag;
}
