// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON codec: typed model routines plus generic structural decoding.

use crate::error::{CodecError, Result};
use crate::format::{FormatCodec, SerializationFormat};
use crate::shape::{Shape, Value};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Write;

/// Codec for [`SerializationFormat::Json`].
///
/// Self-describing models decode through their own serde routine; everything
/// else decodes structurally against the requested [`Shape`].
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl JsonCodec {
    /// Serialize a concrete typed value straight to JSON bytes.
    ///
    /// Convenience entry point for callers that hold the type, bypassing the
    /// dynamic [`Value`] pipeline.
    pub fn to_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    /// Deserialize JSON bytes straight into a concrete typed value.
    pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn decode_value(json: &serde_json::Value, shape: &Shape) -> Result<Value> {
        // A JSON null token decodes to Null for every shape.
        if json.is_null() {
            return Ok(Value::Null);
        }

        match shape {
            Shape::Untyped => Ok(Self::decode_untyped(json)),
            Shape::Model(binding) => binding.decode_json(json).map(Value::Model),
            Shape::Bool => json
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| Self::mismatch("boolean", json)),
            Shape::Integer => json
                .as_i64()
                .map(Value::Integer)
                .ok_or_else(|| Self::mismatch("integer", json)),
            Shape::Float => json
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| Self::mismatch("number", json)),
            Shape::String => json
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| Self::mismatch("string", json)),
            Shape::Bytes => {
                // Default binary representation: standard base64 text.
                let text = json.as_str().ok_or_else(|| Self::mismatch("string", json))?;
                Ok(Value::Bytes(STANDARD.decode(text)?))
            }
            Shape::Timestamp => {
                let text = json.as_str().ok_or_else(|| Self::mismatch("string", json))?;
                let parsed = DateTime::parse_from_rfc3339(text)?;
                Ok(Value::Timestamp(parsed.with_timezone(&Utc)))
            }
            Shape::Sequence(element) => {
                let items = json
                    .as_array()
                    .ok_or_else(|| Self::mismatch("array", json))?;
                items
                    .iter()
                    .map(|item| Self::decode_value(item, element))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::Sequence)
            }
            Shape::Mapping(value_shape) => {
                let entries = json
                    .as_object()
                    .ok_or_else(|| Self::mismatch("object", json))?;
                entries
                    .iter()
                    .map(|(key, item)| {
                        Ok((key.clone(), Self::decode_value(item, value_shape)?))
                    })
                    .collect::<Result<std::collections::HashMap<_, _>>>()
                    .map(Value::Mapping)
            }
        }
    }

    fn decode_untyped(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.iter().map(Self::decode_untyped).collect())
            }
            serde_json::Value::Object(entries) => Value::Mapping(
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), Self::decode_untyped(item)))
                    .collect(),
            ),
        }
    }

    fn encode_value(value: &Value) -> Result<serde_json::Value> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Integer(i) => Ok(serde_json::Value::from(*i)),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or(CodecError::UnsupportedOperation(
                    "non-finite float in JSON serialization",
                )),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Bytes(bytes) => Ok(serde_json::Value::String(STANDARD.encode(bytes))),
            Value::Timestamp(ts) => Ok(serde_json::Value::String(
                ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )),
            Value::Sequence(items) => items
                .iter()
                .map(Self::encode_value)
                .collect::<Result<Vec<_>>>()
                .map(serde_json::Value::Array),
            Value::Mapping(entries) => entries
                .iter()
                .map(|(key, item)| Ok((key.clone(), Self::encode_value(item)?)))
                .collect::<Result<serde_json::Map<_, _>>>()
                .map(serde_json::Value::Object),
            Value::Model(model) => model.binding().encode_json(model),
        }
    }

    fn mismatch(expected: &str, found: &serde_json::Value) -> CodecError {
        CodecError::malformed(format!(
            "expected JSON {}, found {}",
            expected,
            token_kind(found)
        ))
    }
}

fn token_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl FormatCodec for JsonCodec {
    fn supports_format(&self, format: SerializationFormat) -> bool {
        format == SerializationFormat::Json
    }

    fn serialize_to_stream(
        &self,
        out: &mut dyn Write,
        value: &Value,
        format: SerializationFormat,
    ) -> Result<()> {
        if format != SerializationFormat::Json {
            return Err(CodecError::UnsupportedFormat(format));
        }
        // Null writes nothing at all, not a JSON null token.
        if value.is_null() {
            return Ok(());
        }
        let json = Self::encode_value(value)?;
        serde_json::to_writer(&mut *out, &json)?;
        out.flush()?;
        Ok(())
    }

    fn deserialize_from_bytes(
        &self,
        bytes: &[u8],
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value> {
        if format != SerializationFormat::Json {
            return Err(CodecError::UnsupportedFormat(format));
        }
        let json: serde_json::Value = serde_json::from_slice(bytes)?;
        Self::decode_value(&json, shape)
    }
}
