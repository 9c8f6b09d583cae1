//! Recursive value comparison.
//!
//! The core entry point is [`deep_diff_values`]. A [`Comparator`] owns the
//! traversal state for one invocation: the path stack, the cycle guard and
//! the collected diffs. Each comparison step reports whether the pair was
//! *explained* (equal, or divergence pushed down to children). An
//! unexplained pair is recorded as a single diff spanning the whole subtree.

use crate::diff::cycle::CycleGuard;
use crate::diff::model::{Diff, DiffCollector};
use crate::diff::path::PathStack;
use crate::diff::reconcile::reconcile;
use crate::value::{Record, Value};
use crate::{log_op_end, log_op_start};
use std::rc::Rc;

/// Whether values may be handed out as-is when reported.
///
/// Anything reached through a non-exported record field is restricted and
/// reported by its textual rendering instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    Full,
    Restricted,
}

impl Access {
    fn through(self, exported: bool) -> Access {
        if exported {
            self
        } else {
            Access::Restricted
        }
    }
}

/// Traversal state for a single comparison. Not reusable across calls.
#[derive(Debug, Default)]
pub struct Comparator {
    path: PathStack,
    guard: CycleGuard,
    diffs: DiffCollector,
}

impl Comparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `v1` against `v2` under `segment`.
    ///
    /// A non-empty segment is pushed for the duration of the call. If the
    /// pair cannot be explained a diff is recorded at the current path. The
    /// result is always true: either the pair was explained or a diff now
    /// accounts for it.
    pub fn compare(&mut self, v1: &Value, v2: &Value, segment: &str) -> bool {
        self.compare_at(v1, v2, segment, Access::Full)
    }

    /// Diffs recorded so far
    pub fn diffs(&self) -> &[Diff] {
        self.diffs.as_slice()
    }

    pub fn finish(self) -> Vec<Diff> {
        self.diffs.into_diffs()
    }

    fn compare_at(&mut self, v1: &Value, v2: &Value, segment: &str, access: Access) -> bool {
        let pushed = !segment.is_empty();
        if pushed {
            self.path.push(segment);
        }

        if !self.explain(v1, v2, access) {
            self.record(v1, v2, access);
        }

        if pushed {
            self.path.pop();
        }
        true
    }

    fn explain(&mut self, v1: &Value, v2: &Value, access: Access) -> bool {
        if !v1.is_valid() || !v2.is_valid() {
            return v1.is_valid() == v2.is_valid();
        }
        if v1.type_tag() != v2.type_tag() {
            return false;
        }

        let shape = v1.shape();
        if shape.is_reference_like() {
            if let (Some(id1), Some(id2)) = (v1.identity(), v2.identity()) {
                if self.guard.check_and_mark(id1, id2, shape) {
                    tracing::trace!(path = %self.path, shape = %shape, "cycle guard hit");
                    return true;
                }
            }
        }

        match (v1, v2) {
            (Value::Array(xs), Value::Array(ys)) => {
                self.compare_items(xs, ys, access);
                true
            }
            (Value::List(Some(xs)), Value::List(Some(ys))) => {
                if Rc::ptr_eq(xs, ys) {
                    return true;
                }
                let (xs, ys) = (xs.borrow(), ys.borrow());
                if xs.len() != ys.len() {
                    return false;
                }
                self.compare_items(&xs, &ys, access);
                true
            }
            (Value::Boxed(Some(x)), Value::Boxed(Some(y))) => {
                self.compare_at(x, y, "", access);
                true
            }
            (Value::Ref(Some(x)), Value::Ref(Some(y))) => {
                if Rc::ptr_eq(x, y) {
                    return true;
                }
                self.compare_at(&x.borrow(), &y.borrow(), "", access);
                true
            }
            (Value::Record(x), Value::Record(y)) => self.compare_fields(x, y, access),
            (Value::Map(Some(xs)), Value::Map(Some(ys))) => {
                if Rc::ptr_eq(xs, ys) {
                    return true;
                }
                let (xs, ys) = (xs.borrow(), ys.borrow());
                let partition = reconcile(&xs, &ys);
                for key in &partition.left_only {
                    self.compare_at(&xs[key], &Value::Invalid, &key.to_string(), access);
                }
                for key in &partition.right_only {
                    self.compare_at(&Value::Invalid, &ys[key], &key.to_string(), access);
                }
                for key in &partition.common {
                    self.compare_at(&xs[key], &ys[key], &key.to_string(), access);
                }
                true
            }
            (Value::Opaque(Some(x)), Value::Opaque(Some(y))) if x.identity() == y.identity() => {
                true
            }
            // Nil on at least one side: explained only when both are nil.
            (Value::List(_), Value::List(_))
            | (Value::Map(_), Value::Map(_))
            | (Value::Ref(_), Value::Ref(_))
            | (Value::Boxed(_), Value::Boxed(_))
            | (Value::Opaque(None), _)
            | (_, Value::Opaque(None)) => v1.is_nil() && v2.is_nil(),
            _ => v1 == v2,
        }
    }

    fn compare_items(&mut self, xs: &[Value], ys: &[Value], access: Access) {
        for (i, (x, y)) in xs.iter().zip(ys).enumerate() {
            self.compare_at(x, y, &i.to_string(), access);
        }
    }

    fn compare_fields(&mut self, x: &Record, y: &Record, access: Access) -> bool {
        if !x.same_layout(y) {
            return false;
        }
        for (fx, fy) in x.fields().iter().zip(y.fields()) {
            self.compare_at(&fx.value, &fy.value, &fx.name, access.through(fx.exported));
        }
        true
    }

    fn record(&mut self, v1: &Value, v2: &Value, access: Access) {
        tracing::trace!(
            path = %self.path,
            path_depth = self.path.depth(),
            left_shape = %v1.shape(),
            right_shape = %v2.shape(),
            "diff recorded"
        );
        self.diffs.record(Diff::new(
            self.path.snapshot(),
            report(v1, access),
            report(v2, access),
        ));
    }
}

fn report(value: &Value, access: Access) -> Option<Value> {
    if !value.is_valid() {
        return None;
    }
    match access {
        Access::Full => Some(value.clone()),
        Access::Restricted => Some(Value::from(value.textual())),
    }
}

/// Compute every leaf difference between two values.
///
/// Diffs are returned in depth-first traversal order. Identical acyclic
/// values yield an empty vector. Never fails.
pub fn deep_diff_values(v1: &Value, v2: &Value) -> Vec<Diff> {
    log_op_start!("deep_diff_values", left_shape = %v1.shape(), right_shape = %v2.shape());
    let start = std::time::Instant::now();

    let mut comparator = Comparator::new();
    comparator.compare(v1, v2, "");
    let diffs = comparator.finish();

    log_op_end!(
        "deep_diff_values",
        duration_ms = start.elapsed().as_millis() as u64,
        diff_count = diffs.len()
    );
    diffs
}
