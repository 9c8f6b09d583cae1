//! Path stack from the root to the current comparison point.

use std::fmt;

/// Ordered segments from the root to the node being compared.
///
/// Segments are decimal indices for sequences, field names for records and
/// key renderings for mappings. [`PathStack::snapshot`] copies, so recorded
/// diffs never observe later pushes and pops.
#[derive(Debug, Clone, Default)]
pub struct PathStack {
    segments: Vec<String>,
}

impl PathStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    /// Owned copy of the current path
    pub fn snapshot(&self) -> Vec<String> {
        self.segments.clone()
    }
}

impl fmt::Display for PathStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}
