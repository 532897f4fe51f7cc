//! Frame stack backing the walker.

use crate::Vec;
use alloc::fmt;

/// A last-in-first-out stack of traversal frames.
///
/// Thin wrapper over `Vec` that pre-allocates space for typical traversals.
/// The walker is depth-unbounded by design, so no maximum size is enforced;
/// the stack grows with the deepest chain of suspended handlers.
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Pre-allocated slots; deep traversals grow beyond this as needed.
    const INITIAL_CAPACITY: usize = 256;

    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    /// Pushes a value onto the stack.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    /// Removes and returns the top value, or `None` if the stack is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns a reference to the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Returns the current number of elements on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the stack contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &self.items)
            .field("len", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stack() {
        let stack: Stack<i32> = Stack::new();
        assert_eq!(stack.len(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.len(), 3);
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_peek() {
        let mut stack = Stack::new();
        assert_eq!(stack.peek(), None);

        stack.push(42);
        assert_eq!(stack.peek(), Some(&42));
        assert_eq!(stack.len(), 1); // Peek doesn't remove

        stack.push(17);
        assert_eq!(stack.peek(), Some(&17));
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut stack = Stack::new();
        for i in 0..10_000 {
            stack.push(i);
        }

        assert_eq!(stack.len(), 10_000);

        for i in (0..10_000).rev() {
            assert_eq!(stack.pop(), Some(i));
        }
    }
}
