// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML codec: strictly single-format, strictly self-describing.
//!
//! There is no generic XML decoding path. A decode target must be a
//! registered model carrying an XML construction routine; everything else is
//! rejected up front.

use crate::error::{CodecError, Result};
use crate::format::{FormatCodec, SerializationFormat};
use crate::shape::{Shape, Value};
use std::borrow::Cow;
use std::io::Write;

/// Codec for [`SerializationFormat::Xml`].
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlCodec;

impl FormatCodec for XmlCodec {
    fn supports_format(&self, format: SerializationFormat) -> bool {
        format == SerializationFormat::Xml
    }

    fn serialize_to_stream(
        &self,
        out: &mut dyn Write,
        value: &Value,
        format: SerializationFormat,
    ) -> Result<()> {
        if format != SerializationFormat::Xml {
            return Err(CodecError::UnsupportedFormat(format));
        }
        match value {
            Value::Null => Ok(()),
            Value::Model(model) if model.binding().supports_xml() => {
                // Writer borrow is scoped to this arm; flushed before return.
                let mut writer = XmlWriter::new(out);
                writer.write_declaration()?;
                model.binding().encode_xml(model, &mut writer)?;
                writer.flush()
            }
            _ => Err(CodecError::UnsupportedOperation(
                "untyped XML serialization",
            )),
        }
    }

    fn deserialize_from_bytes(
        &self,
        bytes: &[u8],
        shape: &Shape,
        format: SerializationFormat,
    ) -> Result<Value> {
        if format != SerializationFormat::Xml {
            return Err(CodecError::UnsupportedFormat(format));
        }
        let binding = match shape {
            Shape::Model(binding) if binding.supports_xml() => binding,
            _ => {
                return Err(CodecError::UnsupportedOperation(
                    "untyped XML deserialization",
                ))
            }
        };
        let text = std::str::from_utf8(bytes)
            .map_err(|e| CodecError::malformed(format!("XML body is not UTF-8: {}", e)))?;
        let doc = roxmltree::Document::parse(text)?;
        binding.decode_xml(doc.root_element()).map(Value::Model)
    }
}

/// Scoped XML writer over a caller-supplied stream.
///
/// Borrows the stream for its lexical lifetime, escapes all text and
/// attribute content, and must be flushed before the serialized bytes are
/// handed back.
pub struct XmlWriter<'w> {
    out: &'w mut dyn Write,
}

impl<'w> XmlWriter<'w> {
    /// Wrap an output stream.
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self { out }
    }

    /// Write the XML declaration.
    pub fn write_declaration(&mut self) -> Result<()> {
        self.out
            .write_all(b"<?xml version=\"1.0\" encoding=\"utf-8\"?>")?;
        Ok(())
    }

    /// Write an opening tag.
    pub fn write_start(&mut self, name: &str) -> Result<()> {
        write!(self.out, "<{}>", name)?;
        Ok(())
    }

    /// Write an opening tag with attributes.
    pub fn write_start_with_attributes(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
    ) -> Result<()> {
        write!(self.out, "<{}", name)?;
        for (key, value) in attributes {
            write!(self.out, " {}=\"{}\"", key, escape_attribute(value))?;
        }
        self.out.write_all(b">")?;
        Ok(())
    }

    /// Write escaped character data.
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.out.write_all(escape_text(text).as_bytes())?;
        Ok(())
    }

    /// Write `<name>text</name>` with escaped text.
    pub fn write_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.write_start(name)?;
        self.write_text(text)?;
        self.write_end(name)
    }

    /// Write a self-closing element.
    pub fn write_empty(&mut self, name: &str) -> Result<()> {
        write!(self.out, "<{}/>", name)?;
        Ok(())
    }

    /// Write a closing tag.
    pub fn write_end(&mut self, name: &str) -> Result<()> {
        write!(self.out, "</{}>", name)?;
        Ok(())
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

fn escape_text(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

fn escape_attribute(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}
