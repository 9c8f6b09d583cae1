//! Structural diff engine.
//!
//! Compares two arbitrarily nested values and reports every point of
//! divergence as a path-labelled leaf [`Diff`].
//!
//! ## Entry points
//!
//! ```
//! use valuediff_core::diff::deep_diff;
//! use std::collections::BTreeMap;
//!
//! let a = BTreeMap::from([("a", "z")]);
//! let b = BTreeMap::from([("a", "z"), ("b", "y")]);
//! let diffs = deep_diff(&a, &b);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].path, vec!["b".to_string()]);
//! ```
//!
//! [`deep_diff_values`] takes values that are already lowered to
//! [`Value`](crate::value::Value), which is the only way to compare
//! aliased or self-referential graphs.
//!
//! ## Guarantees
//!
//! - **Depth-first order**: diffs are emitted in traversal order; mapping
//!   keys are visited left-only, then right-only, then common, each sorted by
//!   key rendering.
//! - **No composite noise**: records, mappings, fixed sequences and
//!   equal-length lists never produce a diff of their own when their children
//!   account for every divergence.
//! - **Atomic mismatches**: a type mismatch, a nil mismatch or a list length
//!   mismatch is reported once, for the whole subtree.
//! - **Termination on cycles**: a pair of shared storage is descended into
//!   at most once per call and assumed equal when revisited.

pub mod cycle;
pub mod engine;
pub mod model;
pub mod path;
pub mod reconcile;

pub use engine::{deep_diff_values, Comparator};
pub use model::Diff;

use crate::errors::{ExError, Result};
use crate::log_op_error;
use crate::serialize::to_value;
use crate::value::{Opaque, Value};
use serde::Serialize;

/// Compute every leaf difference between two native values.
///
/// Both sides are lowered through serde. A side that fails to lower is
/// replaced by an opaque value holding the [`ExError`], labelled with its
/// text. Opaque values compare by identity, so a failed side never equals
/// anything and the failure always shows up as a diff. Use
/// [`try_deep_diff`] to get the error instead.
pub fn deep_diff<L, R>(x: &L, y: &R) -> Vec<Diff>
where
    L: Serialize + ?Sized,
    R: Serialize + ?Sized,
{
    let left = lower_or_stand_in(x, "left");
    let right = lower_or_stand_in(y, "right");
    deep_diff_values(&left, &right)
}

/// Like [`deep_diff`], but fails if either side cannot be lowered.
///
/// # Errors
///
/// The lowering error is returned as the source of an error for operation
/// `try_deep_diff`, with the same kind:
/// - `IntegerOverflow`: a 128-bit integer outside the 64-bit range
/// - `Serialization`: a `Serialize` impl reported an error
pub fn try_deep_diff<L, R>(x: &L, y: &R) -> Result<Vec<Diff>>
where
    L: Serialize + ?Sized,
    R: Serialize + ?Sized,
{
    let left = to_value(x).map_err(|e| wrap_side(e, "left"))?;
    let right = to_value(y).map_err(|e| wrap_side(e, "right"))?;
    Ok(deep_diff_values(&left, &right))
}

fn wrap_side(err: ExError, side: &str) -> ExError {
    ExError::new(err.kind())
        .with_op("try_deep_diff")
        .with_message(format!("{} side could not be lowered", side))
        .with_source(err)
}

fn lower_or_stand_in<T: Serialize + ?Sized>(value: &T, side: &str) -> Value {
    to_value(value).unwrap_or_else(|err: ExError| {
        log_op_error!("deep_diff", err.clone(), duration_ms = 0_u64, side = side);
        let label = err.to_string();
        Value::opaque(Opaque::new(err, label))
    })
}
