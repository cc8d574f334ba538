//! Key-value records.
use crate::error::TabrlError;
use std::collections::{
    hash_map::{Iter, Keys},
    HashMap,
};

/// Represents possible types of values in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single value such as an episode return.
    Scalar(f32),

    /// A 1-dimensional array, such as the action-values of a state.
    Array1(Vec<f32>),

    /// A text value.
    String(String),
}

/// A container for key-value pairs of [`RecordValue`].
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    fn typed<T>(
        &self,
        k: &str,
        kind: &str,
        f: impl FnOnce(&RecordValue) -> Option<T>,
    ) -> Result<T, TabrlError> {
        let v = self
            .0
            .get(k)
            .ok_or_else(|| TabrlError::RecordKey(k.to_string()))?;
        f(v).ok_or_else(|| TabrlError::RecordValueType(kind.to_string()))
    }

    /// Gets a scalar value from the record.
    pub fn get_scalar(&self, k: &str) -> Result<f32, TabrlError> {
        self.typed(k, "Scalar", |v| match v {
            RecordValue::Scalar(x) => Some(*x),
            _ => None,
        })
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, TabrlError> {
        self.typed(k, "Array1", |v| match v {
            RecordValue::Array1(x) => Some(x.clone()),
            _ => None,
        })
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, TabrlError> {
        self.typed(k, "String", |v| match v {
            RecordValue::String(x) => Some(x.clone()),
            _ => None,
        })
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_typed_values() {
        let mut record = Record::from_scalar("reward", 1.5);
        record.insert("q", RecordValue::Array1(vec![0.0, 1.0]));
        record.insert("env", RecordValue::String("corridor".into()));

        assert_eq!(record.get_scalar("reward").unwrap(), 1.5);
        assert_eq!(record.get_array1("q").unwrap(), vec![0.0, 1.0]);
        assert_eq!(record.get_string("env").unwrap(), "corridor");
        assert_eq!(
            record.get_scalar("q"),
            Err(TabrlError::RecordValueType("Scalar".to_string()))
        );
        assert_eq!(
            record.get_scalar("missing"),
            Err(TabrlError::RecordKey("missing".to_string()))
        );
    }

    #[test]
    fn test_merge_overwrites() {
        let mut episode = Record::from_slice(&[
            ("episode", RecordValue::Scalar(4.0)),
            ("eval_return", RecordValue::Scalar(2.0)),
        ]);
        episode.merge_inplace(Record::from_scalar("eval_return", 3.0));
        assert_eq!(episode.len(), 2);
        assert_eq!(episode.get_scalar("eval_return").unwrap(), 3.0);
    }
}
