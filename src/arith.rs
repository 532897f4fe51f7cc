//! Reference arithmetic tree and its handlers.
//!
//! The worked example the engine ships with: expression trees of numbers,
//! additions, and negations. Trees are arena-allocated so that building,
//! traversing, and dropping a 100 000-node chain never touches the native
//! call stack.
//!
//! The three handlers deliberately exercise every handler form the walker
//! supports: `Number` is a direct closure handler, `Add` spells out its
//! suspension points as dedicated continuation structs, and `Negate` uses a
//! move closure as its continuation.

use crate::{
    Box,
    errors::WalkError,
    tree::TreeNode,
    walker::{Continuation, Handler, Step, Walker},
};
use bumpalo::Bump;
use core::fmt;
use thiserror::Error;

/// Variant tags for [`Expr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Number,
    Add,
    Negate,
}

impl fmt::Display for ExprKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExprKind::Number => "Number",
            ExprKind::Add => "Add",
            ExprKind::Negate => "Negate",
        };
        f.write_str(name)
    }
}

/// Arithmetic expression node.
///
/// Children are references into the arena the tree was built in; nodes are
/// immutable once constructed and form a strict tree rooted at one entry
/// node.
#[derive(Debug)]
pub enum Expr<'a> {
    /// A number literal; no children.
    Number(i64),
    /// Sum of two subtrees.
    Add(&'a Expr<'a>, &'a Expr<'a>),
    /// Negation of one subtree.
    Negate(&'a Expr<'a>),
}

impl TreeNode for Expr<'_> {
    type Tag = ExprKind;

    fn tag(&self) -> ExprKind {
        match self {
            Expr::Number(_) => ExprKind::Number,
            Expr::Add(..) => ExprKind::Add,
            Expr::Negate(_) => ExprKind::Negate,
        }
    }
}

impl<'a> Expr<'a> {
    /// Allocates a number literal in `arena`.
    pub fn number(arena: &'a Bump, value: i64) -> &'a Expr<'a> {
        arena.alloc(Expr::Number(value))
    }

    /// Allocates an addition node in `arena`.
    pub fn add(arena: &'a Bump, left: &'a Expr<'a>, right: &'a Expr<'a>) -> &'a Expr<'a> {
        arena.alloc(Expr::Add(left, right))
    }

    /// Allocates a negation node in `arena`.
    pub fn negate(arena: &'a Bump, operand: &'a Expr<'a>) -> &'a Expr<'a> {
        arena.alloc(Expr::Negate(operand))
    }
}

/// Domain error raised by the arithmetic handlers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArithError {
    /// Checked arithmetic overflowed.
    #[error("integer overflow in `{op}` node")]
    Overflow { op: ExprKind },
}

/// Result of evaluating an arithmetic tree.
pub type EvalResult = Result<i64, WalkError<ExprKind, ArithError>>;

// Add suspends twice, left operand before right. Its progress state is
// spelled out as one struct per suspension point rather than captured in
// closures, to keep each resume step explicit.
struct AddHandler;

struct AddAwaitingLeft<'a> {
    right: &'a Expr<'a>,
}

struct AddAwaitingRight {
    left: i64,
}

impl<'a> Handler<'a, Expr<'a>, i64, ArithError> for AddHandler {
    fn enter(&self, node: &'a Expr<'a>) -> Result<Step<'a, Expr<'a>, i64, ArithError>, ArithError> {
        let &Expr::Add(left, right) = node else {
            debug_assert!(false, "Add handler dispatched on {:?}", node.tag());
            unreachable!("registry dispatches handlers by tag")
        };
        Ok(Step::Visit(left, Box::new(AddAwaitingLeft { right })))
    }
}

impl<'a> Continuation<'a, Expr<'a>, i64, ArithError> for AddAwaitingLeft<'a> {
    fn resume(
        self: Box<Self>,
        left: i64,
    ) -> Result<Step<'a, Expr<'a>, i64, ArithError>, ArithError> {
        Ok(Step::Visit(self.right, Box::new(AddAwaitingRight { left })))
    }
}

impl<'a> Continuation<'a, Expr<'a>, i64, ArithError> for AddAwaitingRight {
    fn resume(
        self: Box<Self>,
        right: i64,
    ) -> Result<Step<'a, Expr<'a>, i64, ArithError>, ArithError> {
        match self.left.checked_add(right) {
            Some(sum) => Ok(Step::done(sum)),
            None => Err(ArithError::Overflow { op: ExprKind::Add }),
        }
    }
}

/// Builds a walker with the standard arithmetic handlers registered.
pub fn evaluator<'a>() -> Walker<'a, Expr<'a>, i64, ArithError> {
    let mut walker = Walker::new();

    // Number is the direct-handler path: a final value, no suspension.
    walker.register_fn(ExprKind::Number, |node| match node {
        Expr::Number(value) => Ok(Step::done(*value)),
        other => {
            debug_assert!(false, "Number handler dispatched on {:?}", other.tag());
            unreachable!("registry dispatches handlers by tag")
        }
    });

    walker.register(ExprKind::Add, AddHandler);

    // Negate suspends once; the move closure is its continuation state.
    walker.register_fn(ExprKind::Negate, |node| {
        let &Expr::Negate(operand) = node else {
            debug_assert!(false, "Negate handler dispatched on {:?}", node.tag());
            unreachable!("registry dispatches handlers by tag")
        };
        Ok(Step::visit(operand, |value: i64| {
            value
                .checked_neg()
                .map(Step::done)
                .ok_or(ArithError::Overflow {
                    op: ExprKind::Negate,
                })
        }))
    });

    walker
}

/// Evaluates `root` with the standard handler set.
pub fn eval<'a>(root: &'a Expr<'a>) -> EvalResult {
    evaluator().traverse(root)
}
