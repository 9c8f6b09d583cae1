//! Dynamic values.
//!
//! [`Value`] is a closed set of shapes that any native value can be lowered
//! into, either by hand, through the JSON fixture decoder
//! ([`crate::json`]) or through serde ([`crate::serialize`]).
//!
//! Shared shapes (lists, maps, references, boxes, opaque handles) live behind
//! `Rc`, which gives them a stable identity for the lifetime of a comparison
//! and lets callers build self-referential graphs.

mod equality;
mod record;
mod render;
mod scalar;

pub use record::{Field, Record};
pub use scalar::{CompositeKey, FloatKey, Key, Scalar, ScalarKind};

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Interior-mutable shared storage
pub type Shared<T> = Rc<RefCell<T>>;

/// Storage behind a [`Value::Map`]
pub type MapStorage = HashMap<Key, Value>;

/// The structural category that drives the comparison strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shape {
    Invalid,
    Scalar,
    FixedSequence,
    GrowableSequence,
    Mapping,
    Record,
    Reference,
    Boxed,
    Opaque,
}

impl Shape {
    /// Shapes whose pairs are memoised by the cycle guard
    pub fn is_reference_like(self) -> bool {
        matches!(
            self,
            Shape::GrowableSequence | Shape::Mapping | Shape::Reference | Shape::Boxed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Invalid => "Invalid",
            Shape::Scalar => "Scalar",
            Shape::FixedSequence => "FixedSequence",
            Shape::GrowableSequence => "GrowableSequence",
            Shape::Mapping => "Mapping",
            Shape::Record => "Record",
            Shape::Reference => "Reference",
            Shape::Boxed => "Boxed",
            Shape::Opaque => "Opaque",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared type of a value.
///
/// Shapes alone are too coarse: a `u64` and a `String` are both scalars, and
/// two fixed sequences of different lengths are different types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Invalid,
    Scalar(ScalarKind),
    FixedSequence(usize),
    GrowableSequence,
    Mapping,
    Record(String),
    Reference,
    Boxed,
    Opaque,
}

/// A callable- or channel-like handle compared only by identity.
#[derive(Clone)]
pub struct Opaque {
    handle: Rc<dyn Any>,
    label: String,
}

impl Opaque {
    /// Wrap a native value as a fresh handle
    pub fn new<T: Any>(value: T, label: impl Into<String>) -> Self {
        Self {
            handle: Rc::new(value),
            label: label.into(),
        }
    }

    /// Wrap an existing handle; clones of the same `Rc` share identity
    pub fn from_rc(handle: Rc<dyn Any>, label: impl Into<String>) -> Self {
        Self {
            handle,
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Downcast the wrapped value
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.handle.downcast_ref::<T>()
    }

    pub fn identity(&self) -> usize {
        Rc::as_ptr(&self.handle) as *const () as usize
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Opaque")
            .field("label", &self.label)
            .field("identity", &format_args!("{:#x}", self.identity()))
            .finish()
    }
}

/// An opaque handle to a value of any shape.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent or missing
    #[default]
    Invalid,
    Scalar(Scalar),
    /// Fixed-length ordered sequence
    Array(Vec<Value>),
    /// Variable-length ordered sequence, `None` when nil
    List(Option<Shared<Vec<Value>>>),
    /// Unordered key/value mapping, `None` when nil
    Map(Option<Shared<MapStorage>>),
    Record(Record),
    /// Single-target indirection, `None` when nil
    Ref(Option<Shared<Value>>),
    /// A dynamic value wrapped in another, `None` when nil
    Boxed(Option<Rc<Value>>),
    Opaque(Option<Opaque>),
}

fn identity_of<T: ?Sized>(rc: &Rc<T>) -> usize {
    Rc::as_ptr(rc) as *const () as usize
}

impl Value {
    /// Build a fixed-length sequence
    pub fn array(items: impl IntoIterator<Item = Value>) -> Value {
        Value::Array(items.into_iter().collect())
    }

    /// Build a growable sequence with fresh storage
    pub fn list(items: impl IntoIterator<Item = Value>) -> Value {
        Value::List(Some(Rc::new(RefCell::new(items.into_iter().collect()))))
    }

    /// Build a mapping with fresh storage
    pub fn map<K: Into<Key>>(entries: impl IntoIterator<Item = (K, Value)>) -> Value {
        let storage: MapStorage = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Map(Some(Rc::new(RefCell::new(storage))))
    }

    /// Build a reference to a freshly allocated target
    pub fn reference(target: Value) -> Value {
        Value::Ref(Some(Rc::new(RefCell::new(target))))
    }

    /// Box a value
    pub fn boxed(inner: Value) -> Value {
        Value::Boxed(Some(Rc::new(inner)))
    }

    pub fn opaque(handle: Opaque) -> Value {
        Value::Opaque(Some(handle))
    }

    pub fn nil_list() -> Value {
        Value::List(None)
    }

    pub fn nil_map() -> Value {
        Value::Map(None)
    }

    pub fn nil_ref() -> Value {
        Value::Ref(None)
    }

    pub fn nil_boxed() -> Value {
        Value::Boxed(None)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Value::Invalid => Shape::Invalid,
            Value::Scalar(_) => Shape::Scalar,
            Value::Array(_) => Shape::FixedSequence,
            Value::List(_) => Shape::GrowableSequence,
            Value::Map(_) => Shape::Mapping,
            Value::Record(_) => Shape::Record,
            Value::Ref(_) => Shape::Reference,
            Value::Boxed(_) => Shape::Boxed,
            Value::Opaque(_) => Shape::Opaque,
        }
    }

    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Invalid => TypeTag::Invalid,
            Value::Scalar(s) => TypeTag::Scalar(s.kind()),
            Value::Array(items) => TypeTag::FixedSequence(items.len()),
            Value::List(_) => TypeTag::GrowableSequence,
            Value::Map(_) => TypeTag::Mapping,
            Value::Record(r) => TypeTag::Record(r.type_name().to_string()),
            Value::Ref(_) => TypeTag::Reference,
            Value::Boxed(_) => TypeTag::Boxed,
            Value::Opaque(_) => TypeTag::Opaque,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Value::Invalid)
    }

    /// True for a nil list, map, reference, box or opaque handle
    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Value::List(None)
                | Value::Map(None)
                | Value::Ref(None)
                | Value::Boxed(None)
                | Value::Opaque(None)
        )
    }

    /// Identity token of the underlying storage.
    ///
    /// Two tokens are equal iff both values denote the same storage. Only
    /// non-nil shared shapes have one.
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::List(Some(rc)) => Some(identity_of(rc)),
            Value::Map(Some(rc)) => Some(identity_of(rc)),
            Value::Ref(Some(rc)) => Some(identity_of(rc)),
            Value::Boxed(Some(rc)) => Some(identity_of(rc)),
            Value::Opaque(Some(handle)) => Some(handle.identity()),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Insert into a non-nil map in place. Returns false for any other value.
    pub fn map_insert(&self, key: impl Into<Key>, value: Value) -> bool {
        match self {
            Value::Map(Some(storage)) => {
                storage.borrow_mut().insert(key.into(), value);
                true
            }
            _ => false,
        }
    }

    /// Append to a non-nil list in place. Returns false for any other value.
    pub fn list_push(&self, value: Value) -> bool {
        match self {
            Value::List(Some(items)) => {
                items.borrow_mut().push(value);
                true
            }
            _ => false,
        }
    }

    /// Retarget a non-nil reference in place. Returns false for any other value.
    pub fn set_target(&self, target: Value) -> bool {
        match self {
            Value::Ref(Some(cell)) => {
                *cell.borrow_mut() = target;
                true
            }
            _ => false,
        }
    }

    /// Textual rendering used when the value itself may not be handed out.
    ///
    /// Strings render bare; everything else uses the `Display` form.
    pub fn textual(&self) -> String {
        match self {
            Value::Scalar(Scalar::Str(s)) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.shape(), self)
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Opaque> for Value {
    fn from(o: Opaque) -> Self {
        Value::opaque(o)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Scalar(Scalar::Char(c))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(Scalar::Str(s.to_string()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(Scalar::Str(s))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(Scalar::Float(x))
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Scalar(Scalar::Float(f64::from(x)))
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $wide:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Scalar(Scalar::$variant(<$wide>::from(n)))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64, i8, i16, i32, i64);
impl_from_int!(UInt, u64, u8, u16, u32, u64);
