//! Leaf values and mapping keys.

use super::Value;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A leaf value compared only by full equality.
///
/// Floats follow IEEE semantics, so `NaN` never equals itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
}

/// The declared type of a scalar. Two scalars of different kinds are a
/// type mismatch even when they render the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Null,
    Bool,
    Int,
    UInt,
    Float,
    Char,
    Str,
    Bytes,
}

impl Scalar {
    /// Get the kind of this scalar
    pub fn kind(&self) -> ScalarKind {
        match self {
            Scalar::Null => ScalarKind::Null,
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::UInt(_) => ScalarKind::UInt,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Char(_) => ScalarKind::Char,
            Scalar::Str(_) => ScalarKind::Str,
            Scalar::Bytes(_) => ScalarKind::Bytes,
        }
    }

    /// Borrow the string payload, if this is a string scalar
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::UInt(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Char(c) => write!(f, "{:?}", c),
            Scalar::Str(s) => write!(f, "{:?}", s),
            Scalar::Bytes(bytes) => write!(f, "b{:?}", bytes),
        }
    }
}

/// A mapping key.
///
/// The `Display` rendering is the path segment used when a diff is recorded
/// under the key, and the order in which reconciled keys are visited.
/// Scalar keys render bare; composite keys render like the value they hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(FloatKey),
    Char(char),
    Str(String),
    Bytes(Vec<u8>),
    /// A key that is itself a structured value: tuple, struct, sequence...
    Composite(CompositeKey),
}

impl Key {
    /// Key for an already-lowered value. Scalars keep their kind; anything
    /// else becomes a [`CompositeKey`].
    pub fn from_value(value: Value) -> Key {
        match value {
            Value::Scalar(Scalar::Bool(b)) => Key::Bool(b),
            Value::Scalar(Scalar::Int(i)) => Key::Int(i),
            Value::Scalar(Scalar::UInt(u)) => Key::UInt(u),
            Value::Scalar(Scalar::Float(x)) => Key::Float(FloatKey(x)),
            Value::Scalar(Scalar::Char(c)) => Key::Char(c),
            Value::Scalar(Scalar::Str(s)) => Key::Str(s),
            Value::Scalar(Scalar::Bytes(b)) => Key::Bytes(b),
            other => Key::Composite(CompositeKey::new(other)),
        }
    }

    /// The value this key denotes
    pub fn to_value(&self) -> Value {
        match self {
            Key::Bool(b) => Value::Scalar(Scalar::Bool(*b)),
            Key::Int(i) => Value::Scalar(Scalar::Int(*i)),
            Key::UInt(u) => Value::Scalar(Scalar::UInt(*u)),
            Key::Float(x) => Value::Scalar(Scalar::Float(x.get())),
            Key::Char(c) => Value::Scalar(Scalar::Char(*c)),
            Key::Str(s) => Value::Scalar(Scalar::Str(s.clone())),
            Key::Bytes(b) => Value::Scalar(Scalar::Bytes(b.clone())),
            Key::Composite(k) => k.value().clone(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{}", b),
            Key::Int(i) => write!(f, "{}", i),
            Key::UInt(u) => write!(f, "{}", u),
            Key::Float(x) => write!(f, "{}", x.get()),
            Key::Char(c) => write!(f, "{}", c),
            Key::Str(s) => f.write_str(s),
            Key::Bytes(b) => write!(f, "{:?}", b),
            Key::Composite(k) => f.write_str(k.rendering()),
        }
    }
}

/// Float mapping key, totally ordered by [`f64::total_cmp`].
///
/// Keys are equal when their bit patterns are equal, so `NaN` keys are
/// usable and `0.0` and `-0.0` are distinct keys.
#[derive(Debug, Clone, Copy)]
pub struct FloatKey(f64);

impl FloatKey {
    pub fn new(x: f64) -> Self {
        FloatKey(x)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for FloatKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatKey {}

impl Hash for FloatKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl PartialOrd for FloatKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// A structured value used as a mapping key.
///
/// Identity, hashing and ordering all go through the value's rendering,
/// which is computed once on construction.
#[derive(Debug, Clone)]
pub struct CompositeKey {
    value: Value,
    rendering: String,
}

impl CompositeKey {
    pub fn new(value: Value) -> Self {
        let rendering = value.to_string();
        Self { value, rendering }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn rendering(&self) -> &str {
        &self.rendering
    }
}

impl PartialEq for CompositeKey {
    fn eq(&self, other: &Self) -> bool {
        self.rendering == other.rendering
    }
}

impl Eq for CompositeKey {}

impl Hash for CompositeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rendering.hash(state);
    }
}

impl PartialOrd for CompositeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompositeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rendering.cmp(&other.rendering)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<u64> for Key {
    fn from(u: u64) -> Self {
        Key::UInt(u)
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key::Char(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nan_is_not_equal_to_itself() {
        assert_ne!(Scalar::Float(f64::NAN), Scalar::Float(f64::NAN));
        assert_eq!(Scalar::Float(1.5), Scalar::Float(1.5));
    }

    #[test]
    fn test_key_rendering_is_bare() {
        assert_eq!(Key::from("name").to_string(), "name");
        assert_eq!(Key::from(7_i64).to_string(), "7");
        assert_eq!(Key::from('x').to_string(), "x");
    }

    #[test]
    fn test_scalar_rendering_quotes_text() {
        assert_eq!(Scalar::Str("a".into()).to_string(), "\"a\"");
        assert_eq!(Scalar::Float(2.0).to_string(), "2");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_float_keys_use_bit_identity() {
        assert_eq!(FloatKey::new(f64::NAN), FloatKey::new(f64::NAN));
        assert_ne!(FloatKey::new(0.0), FloatKey::new(-0.0));
        assert!(FloatKey::new(-1.0) < FloatKey::new(0.5));
        assert_eq!(Key::Float(FloatKey::new(1.5)).to_string(), "1.5");
    }

    #[test]
    fn test_composite_keys_compare_by_rendering() {
        let a = Key::from_value(Value::array([Value::from(1_i64), Value::from(2_i64)]));
        let b = Key::from_value(Value::array([Value::from(1_i64), Value::from(2_i64)]));
        let c = Key::from_value(Value::array([Value::from(5_i64), Value::from(6_i64)]));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a < c);
        assert_eq!(a.to_string(), "[1, 2]");
        assert_eq!(a.to_value(), Value::array([Value::from(1_i64), Value::from(2_i64)]));
    }

    #[test]
    fn test_scalar_values_keep_their_key_kind() {
        assert_eq!(Key::from_value(Value::from("a")), Key::from("a"));
        assert_eq!(Key::from_value(Value::from(3_u8)), Key::UInt(3));
        assert!(matches!(
            Key::from_value(Value::Scalar(Scalar::Bytes(vec![1]))),
            Key::Bytes(_)
        ));
    }

    #[test]
    fn test_int_and_uint_are_distinct_kinds() {
        assert_ne!(Scalar::Int(1).kind(), Scalar::UInt(1).kind());
    }
}
