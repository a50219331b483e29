// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The response body decoder.

use crate::error::Result;
use crate::format::CompositeCodec;
use crate::response::{DecodedBody, HttpMethod, ResponseContext};
use crate::shape::{Shape, Value};
use crate::wire::{coerce_to_logical, wire_shape};

/// Decodes raw response bodies into typed values.
///
/// Holds the codec registry, built once at client construction and read-only
/// afterwards; every `decode` call is otherwise stateless, so concurrent
/// calls on independent responses need no coordination.
#[derive(Debug)]
pub struct ResponseDecoder {
    codecs: CompositeCodec,
}

impl ResponseDecoder {
    /// Decoder over the given codec registry.
    pub fn new(codecs: CompositeCodec) -> Self {
        Self { codecs }
    }

    /// The registry this decoder selects codecs from.
    pub fn codecs(&self) -> &CompositeCodec {
        &self.codecs
    }

    /// Decode one response body against its context.
    ///
    /// Success-branch failures propagate as `Err`. Error-branch failures are
    /// captured into [`DecodedBody::ErrorValue`] instead, so the caller can
    /// still construct a meaningful exception from a malformed error body.
    pub fn decode(&self, body: &[u8], context: &ResponseContext) -> Result<DecodedBody> {
        // HEAD responses are never decoded, even with a non-empty body.
        if context.method() == HttpMethod::Head {
            return Ok(DecodedBody::NoBody);
        }

        if !context.is_expected_status() {
            let shape = context.errors().shape_for(context.status());
            return match self.run_pipeline(body, shape, context) {
                Ok(value) => Ok(DecodedBody::Value(value)),
                Err(err) => {
                    log::warn!(
                        "failed to decode error body for {} response with status {}: {}",
                        context.method(),
                        context.status(),
                        err
                    );
                    Ok(DecodedBody::ErrorValue(err))
                }
            };
        }

        let entity = match context.return_shape().entity() {
            Some(shape) => shape,
            // Raw/void return shapes never touch a codec.
            None => return Ok(DecodedBody::NoBody),
        };
        if body.is_empty() {
            return Ok(DecodedBody::NoBody);
        }
        self.run_pipeline(body, entity, context)
            .map(DecodedBody::Value)
    }

    fn run_pipeline(&self, body: &[u8], entity: &Shape, context: &ResponseContext) -> Result<Value> {
        let shape = wire_shape(entity, context.wire_format());
        let codec = self.codecs.codec_for(context.format())?;
        let decoded = codec.deserialize_from_bytes(body, &shape, context.format())?;
        match context.wire_format() {
            Some(wire) => coerce_to_logical(decoded, entity, Some(wire)),
            None => Ok(decoded),
        }
    }
}

impl Default for ResponseDecoder {
    fn default() -> Self {
        Self::new(CompositeCodec::default())
    }
}
