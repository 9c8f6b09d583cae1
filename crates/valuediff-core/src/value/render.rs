//! Single-line textual rendering of values.
//!
//! Used for mapping-key path segments and for the restricted-access
//! reporting fallback. Maps render with keys in sorted order so output is
//! reproducible; storage already being rendered further up renders as
//! `<cycle>`.

use super::{Key, Value};
use std::fmt;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Renderer::default().write(f, self)
    }
}

#[derive(Default)]
struct Renderer {
    active: Vec<usize>,
}

impl Renderer {
    fn write(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        let Some(id) = value.identity() else {
            return self.write_inner(f, value);
        };
        if self.active.contains(&id) {
            return f.write_str("<cycle>");
        }
        self.active.push(id);
        let result = self.write_inner(f, value);
        self.active.pop();
        result
    }

    fn write_inner(&mut self, f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
        match value {
            Value::Invalid => f.write_str("<invalid>"),
            Value::Scalar(s) => write!(f, "{}", s),
            Value::Array(items) => self.write_items(f, items),
            Value::List(Some(items)) => self.write_items(f, &items.borrow()),
            Value::Map(Some(storage)) => {
                let storage = storage.borrow();
                let mut entries: Vec<(&Key, &Value)> = storage.iter().collect();
                entries.sort_by_cached_key(|(k, _)| k.to_string());
                f.write_str("{")?;
                for (i, (key, item)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match key {
                        Key::Str(s) => write!(f, "{:?}: ", s)?,
                        other => write!(f, "{}: ", other)?,
                    }
                    self.write(f, item)?;
                }
                f.write_str("}")
            }
            Value::Record(record) => {
                f.write_str(record.type_name())?;
                if record.fields().is_empty() {
                    return Ok(());
                }
                f.write_str(" { ")?;
                for (i, field) in record.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: ", field.name)?;
                    self.write(f, &field.value)?;
                }
                f.write_str(" }")
            }
            Value::Ref(Some(target)) => {
                f.write_str("&")?;
                self.write(f, &target.borrow())
            }
            Value::Boxed(Some(inner)) => self.write(f, inner),
            Value::Opaque(Some(handle)) => write!(f, "<{}>", handle.label()),
            Value::List(None)
            | Value::Map(None)
            | Value::Ref(None)
            | Value::Boxed(None)
            | Value::Opaque(None) => f.write_str("nil"),
        }
    }

    fn write_items(&mut self, f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            self.write(f, item)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Opaque, Record};

    #[test]
    fn test_render_nested_values() {
        let value = Value::map([
            ("b", Value::list([Value::from(1_i64), Value::from(2_i64)])),
            ("a", Value::from("z")),
        ]);
        assert_eq!(value.to_string(), r#"{"a": "z", "b": [1, 2]}"#);
    }

    #[test]
    fn test_render_record_and_nil() {
        let record = Record::new("Point")
            .field("x", 1_i64)
            .field("next", Value::nil_ref());
        assert_eq!(Value::from(record).to_string(), "Point { x: 1, next: nil }");
        assert_eq!(Value::from(Record::new("Unit")).to_string(), "Unit");
    }

    #[test]
    fn test_render_cycle_marker() {
        let node = Value::reference(Value::Invalid);
        node.set_target(Value::from(Record::new("Node").field("next", node.clone())));
        assert_eq!(node.to_string(), "&Node { next: <cycle> }");
    }

    #[test]
    fn test_render_opaque_uses_label() {
        let value = Value::opaque(Opaque::new(0_u8, "chan int"));
        assert_eq!(value.to_string(), "<chan int>");
    }

    #[test]
    fn test_debug_includes_shape() {
        assert_eq!(format!("{:?}", Value::from(true)), "Scalar(true)");
    }
}
