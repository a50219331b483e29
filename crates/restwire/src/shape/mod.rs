// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logical type descriptors for decode targets.
//!
//! A [`Shape`] tells a codec what a caller wants decoded bytes to conform to.
//! Shapes are built explicitly by each call site (typically generated
//! per-operation code) and never inspected from Rust generics at runtime.

mod model;
mod value;

pub use model::{ModelBinding, ModelValue, XmlDeserializable, XmlSerializable};
pub use value::Value;

/// Alternate transport representation for a logical value.
///
/// Present only when a payload travels in a different shape than its logical
/// type, e.g. raw bytes carried as URL-safe base64 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// URL-safe base64 text without padding.
    Base64Url,
    /// RFC 1123 date text, e.g. `Mon, 02 Jan 2006 15:04:05 GMT`.
    Rfc1123,
}

/// Recursive descriptor of the shape a decoded value must conform to.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Boolean scalar.
    Bool,
    /// Signed 64-bit integer scalar.
    Integer,
    /// 64-bit float scalar.
    Float,
    /// Text scalar.
    String,
    /// Raw octets. On JSON wires these travel as standard base64 text unless
    /// a [`WireFormat`] annotation overrides the representation.
    Bytes,
    /// Point in time. RFC 3339 text on the wire unless a [`WireFormat`]
    /// annotation overrides the representation.
    Timestamp,
    /// Generic structural decoding: nested mappings, sequences and scalars
    /// mirroring the document. JSON only.
    Untyped,
    /// A self-describing model with its own per-format codec routines.
    Model(ModelBinding),
    /// Ordered sequence of elements of the inner shape.
    Sequence(Box<Shape>),
    /// Mapping from text keys to values of the inner shape. Keys are never
    /// transformed.
    Mapping(Box<Shape>),
}

impl Shape {
    /// Sequence-of-`element` descriptor.
    pub fn sequence(element: Shape) -> Self {
        Self::Sequence(Box::new(element))
    }

    /// Mapping-of-text-to-`value` descriptor.
    pub fn mapping(value: Shape) -> Self {
        Self::Mapping(Box::new(value))
    }

    /// Descriptor for a registered self-describing model.
    pub fn model(binding: ModelBinding) -> Self {
        Self::Model(binding)
    }

    /// True for leaf shapes (no nested element shape).
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Self::Sequence(_) | Self::Mapping(_) | Self::Untyped | Self::Model(_)
        )
    }
}
