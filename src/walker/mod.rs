//! Recursion-free tree traversal.
//!
//! The walker computes a single aggregate value over an expression tree by
//! dispatching each node to the handler registered for its variant tag. An
//! explicit work stack stands in for the native call stack, so trees of any
//! depth can be evaluated without overflowing it.
//!
//! ## Design Principles
//!
//! - **Depth-unbounded**: the work stack lives on the heap; a handler that
//!   suspends for a child costs one frame, never a native stack frame.
//! - **Read-only trees**: the engine never mutates nodes; each `traverse`
//!   call owns its own stack and pending slot, so independent traversals
//!   over the same tree may run on independent threads.
//! - **Fail fast**: the first handler or engine error unwinds the whole
//!   traversal. No retries, no partial results.
//!
//! ## Example
//!
//! ```ignore
//! use bumpalo::Bump;
//! use treewalk::arith::{self, Expr};
//!
//! let arena = Bump::new();
//! let tree = Expr::add(&arena, Expr::number(&arena, 2), Expr::number(&arena, 3));
//! assert_eq!(arith::eval(tree), Ok(5));
//! ```

mod stack;


pub use stack::Stack;

use crate::{Box, errors::WalkError, tree::TreeNode};
use hashbrown::HashMap;
use tracing::{debug, trace};

/// One step of a handler's computation.
///
/// Returned by [`Handler::enter`] and [`Continuation::resume`]: either the
/// handler is finished, or it needs the value of one of its node's children
/// before it can continue.
pub enum Step<'t, N, V, E> {
    /// Request the value of `child`; the continuation is resumed with it
    /// once the child's subtree has been fully evaluated.
    Visit(&'t N, Box<dyn Continuation<'t, N, V, E> + 't>),

    /// The handler finished with a value.
    Done(V),
}

impl<'t, N, V, E> Step<'t, N, V, E> {
    /// Finish with `value`.
    pub fn done(value: V) -> Self {
        Step::Done(value)
    }

    /// Request `child`'s value and continue in `resume` once it is
    /// available.
    pub fn visit<F>(child: &'t N, resume: F) -> Self
    where
        F: FnOnce(V) -> Result<Step<'t, N, V, E>, E> + 't,
    {
        Step::Visit(child, Box::new(resume))
    }
}

/// A suspended handler computation awaiting a child's value.
///
/// Progress state (which children have already been requested, values
/// accumulated so far) lives in the implementing type: either a dedicated
/// struct per suspension point, or a move closure, which implements this
/// trait for free.
pub trait Continuation<'t, N, V, E> {
    /// Continue with the just-computed child value.
    fn resume(self: Box<Self>, value: V) -> Result<Step<'t, N, V, E>, E>;
}

impl<'t, N: 't, V, E, F> Continuation<'t, N, V, E> for F
where
    F: FnOnce(V) -> Result<Step<'t, N, V, E>, E>,
{
    fn resume(self: Box<Self>, value: V) -> Result<Step<'t, N, V, E>, E> {
        (*self)(value)
    }
}

/// Logic registered for one node variant.
///
/// A *direct* handler returns [`Step::Done`] from [`Handler::enter`]; a
/// *suspending* handler returns [`Step::Visit`] and finishes in its
/// continuation(s). Plain `Fn(&N) -> Result<Step, E>` closures implement
/// this trait for free.
pub trait Handler<'t, N, V, E> {
    /// Called when a node with this handler's tag is dispatched.
    fn enter(&self, node: &'t N) -> Result<Step<'t, N, V, E>, E>;
}

impl<'t, N: 't, V, E, F> Handler<'t, N, V, E> for F
where
    F: Fn(&'t N) -> Result<Step<'t, N, V, E>, E>,
{
    fn enter(&self, node: &'t N) -> Result<Step<'t, N, V, E>, E> {
        self(node)
    }
}

/// One entry on the work stack.
enum Frame<'t, N, V, E> {
    /// A node awaiting dispatch through the registry.
    Enter(&'t N),

    /// A handler that suspended awaiting the value of the subtree pushed
    /// above it.
    Resume(Box<dyn Continuation<'t, N, V, E> + 't>),
}

/// Recursion-free tree traversal engine.
///
/// Holds the handler registry; [`Walker::traverse`] runs the explicit-stack
/// dispatch loop. `'t` is the lifetime of the tree being traversed, `N` the
/// node type, `V` the value handlers produce, and `E` the handlers' domain
/// error type.
pub struct Walker<'t, N: TreeNode, V, E> {
    handlers: HashMap<N::Tag, Box<dyn Handler<'t, N, V, E> + 't>>,
}

impl<'t, N: TreeNode + 't, V, E> Walker<'t, N, V, E> {
    /// Creates a walker with no handlers registered.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` for nodes tagged `tag`.
    ///
    /// Registering the same tag twice keeps the later handler (last
    /// registration wins), so a caller can override part of a pre-built
    /// handler set.
    pub fn register<H>(&mut self, tag: N::Tag, handler: H)
    where
        H: Handler<'t, N, V, E> + 't,
    {
        if self.handlers.insert(tag, Box::new(handler)).is_some() {
            debug!(%tag, "handler re-registered, replacing the previous one");
        }
    }

    /// Registers a closure as a handler for nodes tagged `tag`.
    ///
    /// Same contract as [`Walker::register`]; this form exists so closure
    /// arguments get their signature inferred.
    pub fn register_fn<F>(&mut self, tag: N::Tag, handler: F)
    where
        F: Fn(&'t N) -> Result<Step<'t, N, V, E>, E> + 't,
    {
        self.register(tag, handler);
    }

    /// Traverses the tree rooted at `root` and returns its aggregate value.
    ///
    /// Dispatch is strict left-to-right, depth-first, post-order per each
    /// handler's own request sequence: a requested child's full subtree is
    /// evaluated before the handler resumes. The first error — an
    /// unregistered variant tag, or a handler failure — abandons the
    /// remaining stack and is returned as is; no partial value is produced.
    pub fn traverse(&self, root: &'t N) -> Result<V, WalkError<N::Tag, E>> {
        let mut stack = Stack::new();
        // The most recently produced value, consumed by the next resume.
        let mut pending: Option<V> = None;

        stack.push(Frame::Enter(root));

        while let Some(frame) = stack.pop() {
            let step = match frame {
                Frame::Enter(node) => {
                    let tag = node.tag();
                    trace!(%tag, "dispatch");
                    let handler = self
                        .handlers
                        .get(&tag)
                        .ok_or(WalkError::UnregisteredVariant { tag })?;
                    handler.enter(node).map_err(WalkError::Handler)?
                }
                Frame::Resume(continuation) => {
                    // A finished subtree always deposits its value before
                    // the suspended handler beneath it is resumed.
                    let value = pending
                        .take()
                        .expect("resumed a suspended handler with no pending child value");
                    continuation.resume(value).map_err(WalkError::Handler)?
                }
            };

            match step {
                Step::Visit(child, continuation) => {
                    stack.push(Frame::Resume(continuation));
                    stack.push(Frame::Enter(child));
                }
                Step::Done(value) => pending = Some(value),
            }
        }

        Ok(pending.expect("traversal drained its stack without producing a value"))
    }

    /// Like [`Walker::traverse`], for callers holding an optional root.
    ///
    /// Fails with [`WalkError::MissingRoot`] when `root` is `None`.
    pub fn traverse_opt(&self, root: Option<&'t N>) -> Result<V, WalkError<N::Tag, E>> {
        match root {
            Some(root) => self.traverse(root),
            None => Err(WalkError::MissingRoot),
        }
    }
}

impl<'t, N: TreeNode + 't, V, E> Default for Walker<'t, N, V, E> {
    fn default() -> Self {
        Self::new()
    }
}
