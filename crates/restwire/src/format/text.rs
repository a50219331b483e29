// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Plain-text codec for raw text payloads.

use crate::error::{CodecError, Result};
use crate::format::{FormatCodec, SerializationFormat};
use crate::shape::{Shape, Value};
use std::io::Write;

/// Codec for [`SerializationFormat::Text`].
///
/// Bodies are the value itself, no surrounding syntax. Only scalar shapes
/// make sense here; structured shapes are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextCodec;

impl FormatCodec for TextCodec {
    fn supports_format(&self, format: SerializationFormat) -> bool {
        format == SerializationFormat::Text
    }

    fn serialize_to_stream(
        &self,
        out: &mut dyn Write,
        value: &Value,
        format: SerializationFormat,
    ) -> Result<()> {
        if format != SerializationFormat::Text {
            return Err(CodecError::UnsupportedFormat(format));
        }
        match value {
            Value::Null => Ok(()),
            Value::String(s) => {
                out.write_all(s.as_bytes())?;
                Ok(())
            }
            Value::Bytes(bytes) => {
                out.write_all(bytes)?;
                Ok(())
            }
            Value::Bool(b) => {
                write!(out, "{}", b)?;
                Ok(())
            }
            Value::Integer(i) => {
                write!(out, "{}", i)?;
                Ok(())
            }
            Value::Float(f) => {
                write!(out, "{}", f)?;
                Ok(())
            }
            Value::Timestamp(ts) => {
                write!(out, "{}", ts.to_rfc3339())?;
                Ok(())
            }
            _ => Err(CodecError::UnsupportedOperation(
                "structured TEXT serialization",
            )),
        }
    }

    fn deserialize_from_bytes(
        &self,
        bytes: &[u8],
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value> {
        if format != SerializationFormat::Text {
            return Err(CodecError::UnsupportedFormat(format));
        }
        match shape {
            Shape::String | Shape::Untyped => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| CodecError::malformed(format!("body is not UTF-8: {}", e)))?;
                Ok(Value::String(text.to_string()))
            }
            Shape::Bytes => Ok(Value::Bytes(bytes.to_vec())),
            _ => Err(CodecError::UnsupportedOperation(
                "typed TEXT deserialization",
            )),
        }
    }
}
