//! Cycle guard for self-referential and aliased structures.
//!
//! Pairs of shared storage are memoised once comparison of them begins. A
//! revisited pair is assumed equal and not descended into again. This can
//! under-report when the same pair is reached along two paths that diverge
//! further down; that limitation is accepted.

use crate::value::Shape;
use std::collections::HashSet;

/// A canonicalised pair of identity tokens: `a <= b`, so `(x, y)` and
/// `(y, x)` collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visit {
    a: usize,
    b: usize,
    shape: Shape,
}

impl Visit {
    pub fn new(id1: usize, id2: usize, shape: Shape) -> Self {
        let (a, b) = if id1 <= id2 { (id1, id2) } else { (id2, id1) };
        Self { a, b, shape }
    }
}

/// Per-invocation memo of compared pairs. Never shared between comparisons.
#[derive(Debug, Default)]
pub struct CycleGuard {
    visited: HashSet<Visit>,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen(&self, id1: usize, id2: usize, shape: Shape) -> bool {
        self.visited.contains(&Visit::new(id1, id2, shape))
    }

    pub fn mark(&mut self, id1: usize, id2: usize, shape: Shape) {
        self.visited.insert(Visit::new(id1, id2, shape));
    }

    /// `seen` followed by `mark`: true if the pair had already been marked.
    pub fn check_and_mark(&mut self, id1: usize, id2: usize, shape: Shape) -> bool {
        !self.visited.insert(Visit::new(id1, id2, shape))
    }

    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
