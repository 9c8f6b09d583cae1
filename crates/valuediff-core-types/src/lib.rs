//! Core types shared across valuediff facilities
//!
//! This crate provides the canonical field keys and event names used by the
//! logging facility and by error reporting, so both sides agree on the
//! structured-event schema.

pub mod schema;
