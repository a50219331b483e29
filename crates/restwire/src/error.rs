// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy for codec and response-decoding operations.

use crate::format::SerializationFormat;
use std::fmt;
use std::io;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Errors raised by the serialization and response-decoding layer.
#[derive(Debug)]
pub enum CodecError {
    /// No registered codec handles the requested wire format.
    UnsupportedFormat(SerializationFormat),

    /// Structurally valid request that this codec variant cannot perform
    /// (e.g. untyped XML deserialization).
    UnsupportedOperation(&'static str),

    /// Bytes do not parse into the requested shape.
    MalformedValue(String),

    /// A self-describing type's codec routine is missing or rejected the input.
    ModelRoutine {
        type_name: &'static str,
        reason: String,
    },

    /// Construction-time argument validation failed.
    InvalidArgument(&'static str),

    /// Stream-level I/O failure, distinct from malformed data.
    Io(io::Error),
}

impl CodecError {
    /// Create a malformed-value error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedValue(reason.into())
    }

    /// Create a model-routine error for the given type.
    pub fn model_routine(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::ModelRoutine {
            type_name,
            reason: reason.into(),
        }
    }

    /// True when the error means "the server sent bytes that do not parse",
    /// as opposed to a transport-level break.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedValue(_))
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(format) => {
                write!(f, "Unsupported serialization format: {}", format)
            }
            Self::UnsupportedOperation(what) => write!(f, "Unsupported operation: {}", what),
            Self::MalformedValue(reason) => write!(f, "Malformed value: {}", reason),
            Self::ModelRoutine { type_name, reason } => {
                write!(f, "Codec routine for {} failed: {}", type_name, reason)
            }
            Self::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Self::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for CodecError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Io => Self::Io(e.into()),
            _ => Self::MalformedValue(e.to_string()),
        }
    }
}

impl From<roxmltree::Error> for CodecError {
    fn from(e: roxmltree::Error) -> Self {
        Self::MalformedValue(e.to_string())
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(e: base64::DecodeError) -> Self {
        Self::MalformedValue(e.to_string())
    }
}

impl From<chrono::ParseError> for CodecError {
    fn from(e: chrono::ParseError) -> Self {
        Self::MalformedValue(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_is_distinguishable_from_io() {
        let malformed = CodecError::malformed("unexpected token");
        assert!(malformed.is_malformed());

        let io_err = CodecError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(!io_err.is_malformed());
    }

    #[test]
    fn test_json_syntax_error_maps_to_malformed() {
        let err = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        assert!(CodecError::from(err).is_malformed());
    }

    #[test]
    fn test_display_names_the_format() {
        let err = CodecError::UnsupportedFormat(SerializationFormat::Xml);
        assert!(err.to_string().contains("XML"));
    }
}
