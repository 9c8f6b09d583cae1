//! Diff output types.

use crate::value::Value;

/// A single leaf difference.
///
/// `left`/`right` are `None` when that side is absent, for example a mapping
/// key present on only one side.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff {
    /// Segments from the root to the point of divergence
    pub path: Vec<String>,
    /// Value on the left side, if present
    pub left: Option<Value>,
    /// Value on the right side, if present
    pub right: Option<Value>,
}

impl Diff {
    pub fn new(path: Vec<String>, left: Option<Value>, right: Option<Value>) -> Self {
        Self { path, left, right }
    }

    /// True if only the right side is present
    pub fn is_addition(&self) -> bool {
        self.left.is_none() && self.right.is_some()
    }

    /// True if only the left side is present
    pub fn is_removal(&self) -> bool {
        self.left.is_some() && self.right.is_none()
    }

    /// Path segments joined with `.`, for log fields and messages
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }
}

/// Append-only, emission-ordered collection of diffs.
#[derive(Debug, Default)]
pub struct DiffCollector {
    diffs: Vec<Diff>,
}

impl DiffCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, diff: Diff) {
        self.diffs.push(diff);
    }

    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn as_slice(&self) -> &[Diff] {
        &self.diffs
    }

    pub fn into_diffs(self) -> Vec<Diff> {
        self.diffs
    }
}
