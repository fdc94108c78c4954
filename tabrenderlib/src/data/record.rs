//! Records: a row of values with optional named attributes.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::sync::Arc;

use super::value::Value;
use crate::{RenderError, Result};

/// A single row of field values.
///
/// A record may carry an ordered list of attribute names enabling lookup by
/// name. Records owned by a [`Table`](crate::Table) share the table's column
/// list; the table rewrites that reference whenever its columns change, so
/// attribute names are not editable through the record itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    values: Vec<Value>,
    attributes: Option<Arc<[String]>>,
}

impl Record {
    /// Create a positional record with no attribute names.
    pub fn new<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Record {
            values: values.into_iter().map(Into::into).collect(),
            attributes: None,
        }
    }

    /// Create a record whose fields are addressable by name.
    ///
    /// Fails when the number of names and values differ.
    pub fn with_attributes<I, V, N, S>(values: I, names: N) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
        N: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != values.len() {
            return Err(RenderError::MalformedData(format!(
                "record has {} values but {} attribute names",
                values.len(),
                names.len()
            )));
        }
        Ok(Record {
            values,
            attributes: Some(names.into()),
        })
    }

    pub(crate) fn from_parts(values: Vec<Value>, attributes: Arc<[String]>) -> Self {
        Record {
            values,
            attributes: Some(attributes),
        }
    }

    pub(crate) fn set_attributes(&mut self, attributes: Arc<[String]>) {
        self.attributes = Some(attributes);
    }

    pub(crate) fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }

    pub(crate) fn into_values(self) -> Vec<Value> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attribute names, if this record has any.
    pub fn attributes(&self) -> Option<&[String]> {
        self.attributes.as_deref()
    }

    /// True when this record points at exactly the shared list `names`.
    pub fn shares_attributes_with(&self, names: &Arc<[String]>) -> bool {
        self.attributes
            .as_ref()
            .is_some_and(|own| Arc::ptr_eq(own, names))
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Positional access.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Name-based access. Returns `None` for records without attributes.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        let index = self.index_of(name)?;
        self.values.get(index)
    }

    /// Position of an attribute name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes
            .as_ref()?
            .iter()
            .position(|attr| attr == name)
    }

    /// Replace the value at `index`.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<()> {
        let len = self.values.len();
        let slot = self.values.get_mut(index).ok_or_else(|| {
            RenderError::MalformedData(format!(
                "field index {} out of range for record of length {}",
                index, len
            ))
        })?;
        *slot = value.into();
        Ok(())
    }

    /// Replace the value of a named attribute.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let index = self
            .index_of(name)
            .ok_or_else(|| RenderError::UnknownColumn(name.to_string()))?;
        self.set(index, value)
    }

    /// Plain copy of the values.
    pub fn to_vec(&self) -> Vec<Value> {
        self.values.clone()
    }

    /// Name/value pairs in attribute order. Requires attribute names.
    pub fn to_map(&self) -> Result<Vec<(String, Value)>> {
        let names = self.attributes.as_ref().ok_or_else(|| {
            RenderError::MalformedData("record has no attribute names".to_string())
        })?;
        Ok(names
            .iter()
            .cloned()
            .zip(self.values.iter().cloned())
            .collect())
    }

    /// Display strings for every field.
    pub fn to_strings(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

/// Named records serialize as objects, positional ones as arrays.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.attributes {
            Some(names) => {
                let mut map = serializer.serialize_map(Some(self.values.len()))?;
                for (name, value) in names.iter().zip(&self.values) {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            None => {
                let mut seq = serializer.serialize_seq(Some(self.values.len()))?;
                for value in &self.values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_access() {
        let record = Record::new([1, 2, 3]);
        assert_eq!(record.len(), 3);
        assert_eq!(record.get(1), Some(&Value::Int(2)));
        assert_eq!(record.get(3), None);
        assert_eq!(record.get_by_name("a"), None);
    }

    #[test]
    fn test_named_access() {
        let record = Record::with_attributes(vec!["x", "y"], ["a", "b"]).unwrap();
        assert_eq!(record.get_by_name("b"), Some(&Value::from("y")));
        assert_eq!(record.index_of("a"), Some(0));
        assert_eq!(record.attributes().unwrap(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_attribute_length_mismatch() {
        let err = Record::with_attributes(vec![1, 2], ["a"]).unwrap_err();
        assert!(matches!(err, RenderError::MalformedData(_)));
    }

    #[test]
    fn test_set_values() {
        let mut record = Record::with_attributes(vec![1, 2], ["a", "b"]).unwrap();
        record.set(0, 10).unwrap();
        record.set_by_name("b", "two").unwrap();
        assert_eq!(record.to_vec(), vec![Value::Int(10), Value::from("two")]);
        assert!(record.set(5, 0).is_err());
        assert!(matches!(
            record.set_by_name("zz", 0),
            Err(RenderError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_to_map_requires_attributes() {
        let named = Record::with_attributes(vec![1], ["a"]).unwrap();
        assert_eq!(named.to_map().unwrap(), vec![("a".to_string(), Value::Int(1))]);
        assert!(Record::new([1]).to_map().is_err());
    }

    #[test]
    fn test_serialize_shape() {
        let named = Record::with_attributes(vec![1, 2], ["a", "b"]).unwrap();
        assert_eq!(serde_json::to_string(&named).unwrap(), r#"{"a":1,"b":2}"#);
        let plain = Record::new(["x"]);
        assert_eq!(serde_json::to_string(&plain).unwrap(), r#"["x"]"#);
    }
}
