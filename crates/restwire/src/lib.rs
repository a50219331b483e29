// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # restwire - Typed HTTP response decoding and multi-format wire serialization
//!
//! A pure Rust core for REST client stacks: given raw response bytes, a wire
//! format, and a description of the shape the caller wants, produce a typed
//! value - a scalar, a sequence, a mapping, or a self-describing model - and
//! tell success payloads apart from error payloads without any per-call
//! decoding logic from the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use restwire::{HttpMethod, ResponseContext, ResponseDecoder, ReturnShape, Shape};
//!
//! fn main() -> restwire::Result<()> {
//!     let decoder = ResponseDecoder::default();
//!
//!     let context = ResponseContext::new(
//!         HttpMethod::Get,
//!         200,
//!         [200],
//!         ReturnShape::Body(Shape::sequence(Shape::Integer)),
//!     );
//!
//!     let decoded = decoder.decode(b"[1,2,3]", &context)?;
//!     let value = decoded.into_value().expect("payload");
//!     assert_eq!(value.as_sequence().map(|s| s.len()), Some(3));
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------------+
//! |                        Caller (per-operation code)                 |
//! |        ResponseContext: method, status, shapes, wire format        |
//! +--------------------------------------------------------------------+
//! |                         Response Decoder                           |
//! |   HEAD check | status classification | error/success routing       |
//! +--------------------------------------------------------------------+
//! |                      Wire-Type Coercion Engine                     |
//! |        wire_shape / coerce_to_logical (base64url, RFC 1123)        |
//! +--------------------------------------------------------------------+
//! |                         Codec Registry                             |
//! |        CompositeCodec -> JsonCodec | XmlCodec | TextCodec          |
//! +--------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ResponseDecoder`] | Top-level orchestrator over one codec registry |
//! | [`ResponseContext`] | Per-response metadata bundle, built fresh per call |
//! | [`CompositeCodec`] | Ordered registry; first codec claiming a format wins |
//! | [`Shape`] | Recursive descriptor of the requested decode target |
//! | [`Value`] | Dynamic decoded value, coerced to the logical shape |
//! | [`ModelBinding`] | Frozen codec routines of a self-describing model type |
//!
//! All operations are synchronous and stateless; the only shared object is
//! the codec registry, read-only after construction, so independent decode
//! calls run concurrently without coordination.

/// Error taxonomy for codec and response-decoding operations.
pub mod error;
/// Wire formats, the codec contract, and the ordered codec registry.
pub mod format;
/// HTTP response body decoding.
pub mod response;
/// Logical type descriptors and dynamic decoded values.
pub mod shape;
/// Wire-type coercion engine.
pub mod wire;

pub use error::{CodecError, Result};
pub use format::{
    CompositeCodec, FormatCodec, JsonCodec, SerializationFormat, TextCodec, XmlCodec, XmlWriter,
};
pub use response::{
    decoded_shape, DecodedBody, ErrorShapes, HttpMethod, ResponseContext, ResponseDecoder,
    ReturnShape,
};
pub use shape::{
    ModelBinding, ModelValue, Shape, Value, WireFormat, XmlDeserializable, XmlSerializable,
};
pub use wire::{coerce_to_logical, format_rfc1123, wire_shape};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
