//! valuediff core - structural differences between dynamic values
//!
//! This crate compares two arbitrarily shaped, possibly nested and
//! self-referential values and reports every point of divergence as a
//! path-labelled leaf diff, including:
//! - A closed dynamic value model (scalars, sequences, mappings, records,
//!   references, boxed and opaque values)
//! - The recursive comparison engine with cycle detection and deterministic
//!   key reconciliation for unordered mappings
//! - Lowering of native values through serde and a JSON fixture decoder
//! - Structured logging and error facilities
//!
//! ```
//! use valuediff_core::{deep_diff_values, json};
//!
//! let a = json::parse(r#"{"v": {"a": "z", "b": [1, 2]}}"#).unwrap();
//! let b = json::parse(r#"{"v": {"a": "z", "b": [1]}}"#).unwrap();
//! let diffs = deep_diff_values(&a, &b);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].path, vec!["v", "b"]);
//! ```

pub mod diff;
pub mod errors;
pub mod json;
pub mod logging_facility;
pub mod serialize;
pub mod value;

pub use valuediff_core_types::schema;

// Re-export commonly used types
pub use diff::{deep_diff, deep_diff_values, try_deep_diff, Diff};
pub use errors::{ExError, ExErrorKind, Result, ValueError};
pub use serialize::to_value;
pub use value::{Key, Record, Scalar, Shape, Value};
