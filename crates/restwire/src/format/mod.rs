// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire formats, the codec contract, and the ordered codec registry.

pub mod json;
pub mod text;
pub mod xml;

pub use json::JsonCodec;
pub use text::TextCodec;
pub use xml::{XmlCodec, XmlWriter};

use crate::error::{CodecError, Result};
use crate::shape::{Shape, Value};
use std::fmt;
use std::io::{Read, Write};

/// On-the-wire serialization syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializationFormat {
    Json,
    Xml,
    Text,
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Xml => write!(f, "XML"),
            Self::Text => write!(f, "TEXT"),
        }
    }
}

/// A codec for one or more wire formats.
///
/// Implementations are stateless: every call carries the full input, and a
/// codec holds nothing between calls. Requests for a format the codec does
/// not support fail with [`CodecError::UnsupportedFormat`].
pub trait FormatCodec: Send + Sync {
    /// Whether this codec handles `format`.
    fn supports_format(&self, format: SerializationFormat) -> bool;

    /// Serialize `value` onto `out`. Writers opened over `out` are flushed
    /// before return on every success path.
    fn serialize_to_stream(
        &self,
        out: &mut dyn Write,
        value: &Value,
        format: SerializationFormat,
    ) -> Result<()>;

    /// Serialize `value` to an owned buffer.
    fn serialize_to_bytes(&self, value: &Value, format: SerializationFormat) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize_to_stream(&mut out, value, format)?;
        Ok(out)
    }

    /// Decode `bytes` into a value conforming to `shape`.
    fn deserialize_from_bytes(
        &self,
        bytes: &[u8],
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value>;

    /// Decode a full stream into a value conforming to `shape`.
    fn deserialize_from_stream(
        &self,
        input: &mut dyn Read,
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value> {
        let mut bytes = Vec::new();
        input.read_to_end(&mut bytes)?;
        self.deserialize_from_bytes(&bytes, shape, format)
    }
}

/// Ordered registry of codecs; the first codec claiming a format wins.
///
/// Built once at client construction and read-only afterwards, so lookups
/// from concurrent decode calls need no coordination.
pub struct CompositeCodec {
    codecs: Vec<Box<dyn FormatCodec>>,
}

impl CompositeCodec {
    /// Build a registry from an ordered, non-empty codec list.
    ///
    /// The supplied ordering is part of the contract: lookups scan in order
    /// and return the first codec whose `supports_format` answers true.
    pub fn new(codecs: Vec<Box<dyn FormatCodec>>) -> Result<Self> {
        if codecs.is_empty() {
            return Err(CodecError::InvalidArgument(
                "codec registry requires at least one codec",
            ));
        }
        Ok(Self { codecs })
    }

    /// Find the codec serving `format`.
    pub fn codec_for(&self, format: SerializationFormat) -> Result<&dyn FormatCodec> {
        self.codecs
            .iter()
            .find(|codec| codec.supports_format(format))
            .map(|codec| codec.as_ref())
            .ok_or(CodecError::UnsupportedFormat(format))
    }

    /// Serialize through the codec serving `format`.
    pub fn serialize_to_bytes(
        &self,
        value: &Value,
        format: SerializationFormat,
    ) -> Result<Vec<u8>> {
        self.codec_for(format)?.serialize_to_bytes(value, format)
    }

    /// Serialize onto a stream through the codec serving `format`.
    pub fn serialize_to_stream(
        &self,
        out: &mut dyn Write,
        value: &Value,
        format: SerializationFormat,
    ) -> Result<()> {
        self.codec_for(format)?
            .serialize_to_stream(out, value, format)
    }

    /// Deserialize through the codec serving `format`.
    pub fn deserialize_from_bytes(
        &self,
        bytes: &[u8],
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value> {
        self.codec_for(format)?
            .deserialize_from_bytes(bytes, shape, format)
    }

    /// Deserialize a full stream through the codec serving `format`.
    pub fn deserialize_from_stream(
        &self,
        input: &mut dyn Read,
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value> {
        self.codec_for(format)?
            .deserialize_from_stream(input, shape, format)
    }
}

impl Default for CompositeCodec {
    /// The registry the client builder installs: JSON, then XML, then TEXT.
    fn default() -> Self {
        Self {
            codecs: vec![
                Box::new(JsonCodec),
                Box::new(XmlCodec),
                Box::new(TextCodec),
            ],
        }
    }
}

impl fmt::Debug for CompositeCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeCodec")
            .field("codecs", &self.codecs.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Stub codec claiming one format; deserializes to a marker string.
    struct StubCodec(SerializationFormat, &'static str);

    impl FormatCodec for StubCodec {
        fn supports_format(&self, format: SerializationFormat) -> bool {
            format == self.0
        }

        fn serialize_to_stream(
            &self,
            out: &mut dyn std::io::Write,
            _value: &Value,
            _format: SerializationFormat,
        ) -> Result<()> {
            out.write_all(self.1.as_bytes())?;
            Ok(())
        }

        fn deserialize_from_bytes(
            &self,
            _bytes: &[u8],
            _shape: &Shape,
            _format: SerializationFormat,
        ) -> Result<Value> {
            Ok(Value::String(self.1.to_string()))
        }
    }

    #[test]
    fn test_empty_registry_rejected_at_construction() {
        let err = CompositeCodec::new(Vec::new()).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument(_)));
    }

    #[test]
    fn test_first_matching_codec_wins() {
        let registry = CompositeCodec::new(vec![
            Box::new(StubCodec(SerializationFormat::Json, "first")),
            Box::new(StubCodec(SerializationFormat::Text, "middle")),
            Box::new(StubCodec(SerializationFormat::Json, "last")),
        ])
        .expect("registry");

        let value = registry
            .deserialize_from_bytes(b"{}", &Shape::Untyped, SerializationFormat::Json)
            .expect("deserialize");
        assert_eq!(value.as_str(), Some("first"));
    }

    #[test]
    fn test_unknown_format_names_the_format() {
        let registry = CompositeCodec::new(vec![Box::new(StubCodec(
            SerializationFormat::Json,
            "only",
        ))])
        .expect("registry");

        let err = registry.codec_for(SerializationFormat::Xml).err().unwrap();
        match err {
            CodecError::UnsupportedFormat(format) => {
                assert_eq!(format, SerializationFormat::Xml);
            }
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_default_registry_serves_all_formats() {
        let registry = CompositeCodec::default();
        for format in [
            SerializationFormat::Json,
            SerializationFormat::Xml,
            SerializationFormat::Text,
        ] {
            assert!(registry.codec_for(format).is_ok(), "no codec for {format}");
        }
    }

    #[test]
    fn test_stream_round_trip_through_registry() {
        let registry = CompositeCodec::default();
        let mut out = Vec::new();
        registry
            .serialize_to_stream(
                &mut out,
                &Value::String("streamed".into()),
                SerializationFormat::Json,
            )
            .expect("serialize");

        let mut input = &out[..];
        let value = registry
            .deserialize_from_stream(&mut input, &Shape::String, SerializationFormat::Json)
            .expect("deserialize");
        assert_eq!(value.as_str(), Some("streamed"));
    }
}
