// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HTTP response body decoding.
//!
//! The decoder owns the codec registry and, per response, routes the raw
//! body through status classification, shape selection, and the wire-type
//! coercion engine. All per-call state lives in a [`ResponseContext`] built
//! fresh for each response.

mod decoder;

#[cfg(test)]
mod tests;

pub use decoder::ResponseDecoder;

use crate::error::CodecError;
use crate::format::SerializationFormat;
use crate::shape::{Shape, Value, WireFormat};
use std::collections::HashMap;
use std::fmt;

/// HTTP request method, as far as the decoder needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Head => "HEAD",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        };
        write!(f, "{}", name)
    }
}

/// Declared return shape of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnShape {
    /// The operation returns nothing; any body is ignored.
    None,
    /// The body is consumed as raw bytes or a stream, never run through a
    /// codec.
    Raw,
    /// The entity shape is carried directly in the body.
    Body(Shape),
    /// The entity shape is wrapped in a response envelope carrying
    /// status/header metadata; the envelope is unwrapped before decoding.
    Envelope(Shape),
}

impl ReturnShape {
    /// The entity shape to decode into, if the declared shape is decodable.
    pub fn entity(&self) -> Option<&Shape> {
        match self {
            Self::None | Self::Raw => None,
            Self::Body(shape) | Self::Envelope(shape) => Some(shape),
        }
    }

    /// True when the body should be run through a codec at all.
    pub fn is_decodable(&self) -> bool {
        self.entity().is_some()
    }
}

/// Per-status error-body shapes with a generic fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorShapes {
    per_status: HashMap<u16, Shape>,
    fallback: Shape,
}

impl ErrorShapes {
    /// Error shapes with the given fallback for unmapped statuses.
    pub fn new(fallback: Shape) -> Self {
        Self {
            per_status: HashMap::new(),
            fallback,
        }
    }

    /// Map one status code to a dedicated error shape.
    pub fn with_status(mut self, status: u16, shape: Shape) -> Self {
        self.per_status.insert(status, shape);
        self
    }

    /// The shape to decode an error body with for `status`.
    pub fn shape_for(&self, status: u16) -> &Shape {
        self.per_status.get(&status).unwrap_or(&self.fallback)
    }
}

impl Default for ErrorShapes {
    /// Generic structural decoding for every unexpected status.
    fn default() -> Self {
        Self::new(Shape::Untyped)
    }
}

/// Everything the decoder needs to know about one response.
///
/// Created fresh per response; holds no state beyond this bundle and lives
/// only for the duration of one decode call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseContext {
    method: HttpMethod,
    status: u16,
    expected: Vec<u16>,
    format: SerializationFormat,
    return_shape: ReturnShape,
    wire_format: Option<WireFormat>,
    errors: ErrorShapes,
}

impl ResponseContext {
    /// Context for a response, defaulting to JSON and generic error shapes.
    pub fn new(
        method: HttpMethod,
        status: u16,
        expected: impl Into<Vec<u16>>,
        return_shape: ReturnShape,
    ) -> Self {
        Self {
            method,
            status,
            expected: expected.into(),
            format: SerializationFormat::Json,
            return_shape,
            wire_format: None,
            errors: ErrorShapes::default(),
        }
    }

    /// Override the wire format.
    pub fn with_format(mut self, format: SerializationFormat) -> Self {
        self.format = format;
        self
    }

    /// Attach a wire-type annotation.
    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = Some(wire_format);
        self
    }

    /// Attach error-body shapes.
    pub fn with_errors(mut self, errors: ErrorShapes) -> Self {
        self.errors = errors;
        self
    }

    /// Original request method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Actual response status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Serialization format of the body.
    pub fn format(&self) -> SerializationFormat {
        self.format
    }

    /// Declared return shape.
    pub fn return_shape(&self) -> &ReturnShape {
        &self.return_shape
    }

    /// Optional wire-type annotation.
    pub fn wire_format(&self) -> Option<WireFormat> {
        self.wire_format
    }

    /// Error-body shapes.
    pub fn errors(&self) -> &ErrorShapes {
        &self.errors
    }

    /// Whether the actual status is in the expected set.
    pub fn is_expected_status(&self) -> bool {
        self.expected.contains(&self.status)
    }
}

/// Outcome of decoding one response body.
#[derive(Debug)]
pub enum DecodedBody {
    /// Successfully decoded payload.
    Value(Value),
    /// Nothing to decode: HEAD response, non-decodable declared shape, or an
    /// empty body.
    NoBody,
    /// The error branch could not decode the error payload; the failure is
    /// surfaced as the result so the caller can still build its exception.
    ErrorValue(CodecError),
}

impl DecodedBody {
    /// Borrow the decoded value, if any.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Take the decoded value, if any.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    /// True when there was nothing to decode.
    pub fn is_no_body(&self) -> bool {
        matches!(self, Self::NoBody)
    }
}

/// The shape `decode` would produce for this context, derivable without the
/// body bytes.
///
/// HEAD → none; unexpected status → that status's error shape; non-decodable
/// declared shape → none; otherwise the entity shape. Agrees with
/// [`ResponseDecoder::decode`] for every input.
pub fn decoded_shape(context: &ResponseContext) -> Option<&Shape> {
    if context.method() == HttpMethod::Head {
        return None;
    }
    if !context.is_expected_status() {
        return Some(context.errors().shape_for(context.status()));
    }
    context.return_shape().entity()
}
