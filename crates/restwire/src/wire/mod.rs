// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire-type coercion engine.
//!
//! When a field's transport representation differs from its logical type
//! (bytes carried as URL-safe base64 text, timestamps carried as RFC 1123
//! text), the codec must decode into the transport shape first. The two
//! functions here rewrite a logical [`Shape`] into that wire shape, and map
//! a decoded wire [`Value`] back to the logical one. Both are pure and
//! recurse through sequences and mappings; mapping keys are never touched.

use crate::error::Result;
use crate::shape::{Shape, Value, WireFormat};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Compute the concrete shape the format codec should decode into.
///
/// Rules, first match wins:
/// - bytes + [`WireFormat::Base64Url`] → text
/// - timestamp + [`WireFormat::Rfc1123`] → text
/// - sequence-of-T → sequence of the element's wire shape
/// - mapping-of-V → mapping of the value's wire shape (keys untouched)
/// - otherwise the logical shape, unchanged
pub fn wire_shape(logical: &Shape, wire: Option<WireFormat>) -> Shape {
    match (logical, wire) {
        (Shape::Bytes, Some(WireFormat::Base64Url)) => Shape::String,
        (Shape::Timestamp, Some(WireFormat::Rfc1123)) => Shape::String,
        (Shape::Sequence(element), _) => Shape::Sequence(Box::new(wire_shape(element, wire))),
        (Shape::Mapping(value), _) => Shape::Mapping(Box::new(wire_shape(value, wire))),
        _ => logical.clone(),
    }
}

/// Map a value decoded under the wire shape back to the logical shape.
///
/// The inverse of [`wire_shape`]: for every representable logical value,
/// decoding its wire encoding and coercing reproduces the original.
/// Malformed base64 or date text propagates as a parse failure.
pub fn coerce_to_logical(value: Value, logical: &Shape, wire: Option<WireFormat>) -> Result<Value> {
    match logical {
        Shape::Bytes if wire == Some(WireFormat::Base64Url) => match value {
            Value::String(text) => Ok(Value::Bytes(URL_SAFE_NO_PAD.decode(text)?)),
            other => Ok(other),
        },
        Shape::Timestamp => match (value, wire) {
            (Value::String(text), Some(WireFormat::Rfc1123)) => {
                Ok(Value::Timestamp(parse_rfc1123(&text)?))
            }
            // No wire annotation: date text still parses, with the default
            // ISO representation.
            (Value::String(text), _) => {
                let parsed = DateTime::parse_from_rfc3339(&text)?;
                Ok(Value::Timestamp(parsed.with_timezone(&Utc)))
            }
            (other, _) => Ok(other),
        },
        Shape::Sequence(element) => match value {
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| coerce_to_logical(item, element, wire))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            other => Ok(other),
        },
        Shape::Mapping(value_shape) => match value {
            Value::Mapping(entries) => entries
                .into_iter()
                .map(|(key, item)| Ok((key, coerce_to_logical(item, value_shape, wire)?)))
                .collect::<Result<HashMap<_, _>>>()
                .map(Value::Mapping),
            other => Ok(other),
        },
        _ => Ok(value),
    }
}

/// Format a timestamp as RFC 1123 date text.
pub fn format_rfc1123(ts: DateTime<Utc>) -> String {
    ts.format(RFC1123_FORMAT).to_string()
}

fn parse_rfc1123(text: &str) -> Result<DateTime<Utc>> {
    // RFC 1123 dates are the fixed-zone subset of RFC 2822.
    let parsed = DateTime::parse_from_rfc2822(text)?;
    Ok(parsed.with_timezone(&Utc))
}
