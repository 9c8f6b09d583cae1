//! Full recursive structural equality.
//!
//! This is the fallback the comparator uses for values with no finer
//! decomposition, and it backs `PartialEq for Value`. Shared pairs are
//! memoised so cyclic values terminate; a revisited pair counts as equal.

use super::{Record, Value};
use crate::diff::cycle::CycleGuard;
use std::rc::Rc;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}

/// Compare two values structurally, following shared storage.
pub(crate) fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut guard = CycleGuard::new();
    equal(a, b, &mut guard)
}

fn equal(a: &Value, b: &Value, guard: &mut CycleGuard) -> bool {
    if a.type_tag() != b.type_tag() {
        return false;
    }
    if a.shape().is_reference_like() {
        if let (Some(id_a), Some(id_b)) = (a.identity(), b.identity()) {
            if guard.check_and_mark(id_a, id_b, a.shape()) {
                return true;
            }
        }
    }

    match (a, b) {
        (Value::Invalid, Value::Invalid) => true,
        (Value::Scalar(x), Value::Scalar(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => all_equal(xs, ys, guard),
        (Value::List(xs), Value::List(ys)) => match (xs, ys) {
            (Some(xs), Some(ys)) => {
                Rc::ptr_eq(xs, ys) || all_equal(&xs.borrow(), &ys.borrow(), guard)
            }
            (xs, ys) => xs.is_none() && ys.is_none(),
        },
        (Value::Map(xs), Value::Map(ys)) => match (xs, ys) {
            (Some(xs), Some(ys)) => {
                if Rc::ptr_eq(xs, ys) {
                    return true;
                }
                let (xs, ys) = (xs.borrow(), ys.borrow());
                xs.len() == ys.len()
                    && xs.iter().all(|(key, x)| match ys.get(key) {
                        Some(y) => equal(x, y, guard),
                        None => false,
                    })
            }
            (xs, ys) => xs.is_none() && ys.is_none(),
        },
        (Value::Record(x), Value::Record(y)) => records_equal(x, y, guard),
        (Value::Ref(x), Value::Ref(y)) => match (x, y) {
            (Some(x), Some(y)) => Rc::ptr_eq(x, y) || equal(&x.borrow(), &y.borrow(), guard),
            (x, y) => x.is_none() && y.is_none(),
        },
        (Value::Boxed(x), Value::Boxed(y)) => match (x, y) {
            (Some(x), Some(y)) => Rc::ptr_eq(x, y) || equal(x, y, guard),
            (x, y) => x.is_none() && y.is_none(),
        },
        (Value::Opaque(x), Value::Opaque(y)) => match (x, y) {
            (Some(x), Some(y)) => x.identity() == y.identity(),
            (x, y) => x.is_none() && y.is_none(),
        },
        _ => false,
    }
}

fn all_equal(xs: &[Value], ys: &[Value], guard: &mut CycleGuard) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| equal(x, y, guard))
}

fn records_equal(x: &Record, y: &Record, guard: &mut CycleGuard) -> bool {
    x.same_layout(y)
        && x
            .fields()
            .iter()
            .zip(y.fields())
            .all(|(fx, fy)| equal(&fx.value, &fy.value, guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Opaque;

    #[test]
    fn test_invalid_equals_invalid() {
        assert_eq!(Value::Invalid, Value::Invalid);
        assert_ne!(Value::Invalid, Value::from(0_i64));
    }

    #[test]
    fn test_nil_list_differs_from_empty_list() {
        assert_ne!(Value::nil_list(), Value::list([]));
        assert_eq!(Value::nil_list(), Value::nil_list());
    }

    #[test]
    fn test_maps_compare_by_contents() {
        let a = Value::map([("a", Value::from(1_i64)), ("b", Value::from(2_i64))]);
        let b = Value::map([("b", Value::from(2_i64)), ("a", Value::from(1_i64))]);
        let c = Value::map([("a", Value::from(1_i64))]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_nested_records_compare_recursively() {
        let inner = |n: i64| Value::from(Record::new("Inner").field("n", n));
        let a = Value::from(Record::new("Outer").field("inner", inner(1)));
        let b = Value::from(Record::new("Outer").field("inner", inner(1)));
        let c = Value::from(Record::new("Outer").field("inner", inner(2)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_cyclic_values_terminate() {
        let a = Value::map([("name", Value::from("node"))]);
        a.map_insert("self", a.clone());
        let b = Value::map([("name", Value::from("node"))]);
        b.map_insert("self", b.clone());
        assert_eq!(a, b);
    }

    #[test]
    fn test_opaque_compares_by_identity() {
        let handle = Opaque::new(|| 1, "fn");
        let a = Value::opaque(handle.clone());
        let b = Value::opaque(handle);
        let c = Value::opaque(Opaque::new(|| 1, "fn"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
