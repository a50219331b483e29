// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic decoded values.

use crate::shape::ModelValue;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A decoded value of any supported shape.
///
/// Untyped inside the codec pipeline; coerced to the logical shape before it
/// is handed back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / null payload.
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Timestamp(DateTime<Utc>),

    /// Ordered sequence of values.
    Sequence(Vec<Value>),
    /// Text-keyed mapping of values.
    Mapping(HashMap<String, Value>),
    /// Instance of a self-describing model.
    Model(ModelValue),
}

impl Value {
    /// Check if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Try to get as text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as raw bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as a timestamp.
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as a sequence.
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as a mapping.
    pub fn as_mapping(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Self::Mapping(v) => Some(v),
            _ => None,
        }
    }

    /// Try to view a model value as a concrete type.
    pub fn as_model<T: 'static>(&self) -> Option<&T> {
        match self {
            Self::Model(m) => m.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Timestamp(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Sequence(v)
    }
}

impl From<HashMap<String, Value>> for Value {
    fn from(v: HashMap<String, Value>) -> Self {
        Self::Mapping(v)
    }
}

impl From<ModelValue> for Value {
    fn from(v: ModelValue) -> Self {
        Self::Model(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_scalar_accessors() {
        let v = Value::from(42i64);
        assert_eq!(v.as_i64(), Some(42));
        assert_eq!(v.as_f64(), Some(42.0));
        assert_eq!(v.as_str(), None);

        let v = Value::from("hello");
        assert_eq!(v.as_str(), Some("hello"));

        let v = Value::from(vec![1u8, 2, 3]);
        assert_eq!(v.as_bytes(), Some(&[1u8, 2, 3][..]));
    }

    #[test]
    fn test_timestamp_accessor() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let v = Value::from(ts);
        assert_eq!(v.as_timestamp(), Some(ts));
        assert!(!v.is_null());
    }

    #[test]
    fn test_sequence_accessor_preserves_order() {
        let v = Value::from(vec![Value::from(1i64), Value::from(2i64)]);
        let seq = v.as_sequence().expect("sequence");
        assert_eq!(seq[0].as_i64(), Some(1));
        assert_eq!(seq[1].as_i64(), Some(2));
    }

    #[test]
    fn test_mapping_accessor() {
        let mut map = HashMap::new();
        map.insert("x".to_string(), Value::from(10i64));
        let v = Value::from(map);
        let mapping = v.as_mapping().expect("mapping");
        assert_eq!(mapping.get("x").and_then(Value::as_i64), Some(10));
    }
}
