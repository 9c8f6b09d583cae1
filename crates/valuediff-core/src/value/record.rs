//! Records: values with a declared type name and a fixed field layout.

use super::Value;

/// A named field of a [`Record`].
///
/// Non-exported fields are still compared, but anything reported from
/// beneath one is replaced by its textual rendering.
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub value: Value,
    pub exported: bool,
}

/// A value of a declared record type.
///
/// Two records have the same declared type iff their type names match.
/// Fields keep declaration order, which is the order they are compared in.
#[derive(Debug, Clone)]
pub struct Record {
    type_name: String,
    fields: Vec<Field>,
}

impl Record {
    /// Create an empty record of the given type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Append an exported field
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_field(name, value, true);
        self
    }

    /// Append a non-exported field
    pub fn private_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push_field(name, value, false);
        self
    }

    /// Append a field in place
    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<Value>, exported: bool) {
        self.fields.push(Field {
            name: name.into(),
            value: value.into(),
            exported,
        });
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }

    /// True if both records declare the same field names in the same order.
    pub fn same_layout(&self, other: &Record) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name)
    }
}
