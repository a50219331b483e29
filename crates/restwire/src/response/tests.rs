// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use crate::error::CodecError;
use crate::format::SerializationFormat;
use crate::response::{
    decoded_shape, DecodedBody, ErrorShapes, HttpMethod, ResponseContext, ResponseDecoder,
    ReturnShape,
};
use crate::shape::{ModelBinding, Shape, Value, WireFormat};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Widget {
    id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ErrorPayload {
    code: String,
}

fn widget_binding() -> ModelBinding {
    ModelBinding::new("Widget").with_json::<Widget>()
}

fn error_binding() -> ModelBinding {
    ModelBinding::new("ErrorPayload").with_json::<ErrorPayload>()
}

fn decoder() -> ResponseDecoder {
    ResponseDecoder::default()
}

#[test]
fn test_head_suppression() {
    let context = ResponseContext::new(
        HttpMethod::Head,
        500,
        [200],
        ReturnShape::Body(Shape::Untyped),
    );
    // Non-empty body, unexpected status: still no decoding for HEAD.
    let decoded = decoder().decode(b"{\"id\":1}", &context).expect("decode");
    assert!(decoded.is_no_body());
    assert!(decoded_shape(&context).is_none());
}

#[test]
fn test_widget_list_decodes_in_order() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Body(Shape::sequence(Shape::model(widget_binding()))),
    );
    let decoded = decoder()
        .decode(b"[{\"id\":1},{\"id\":2}]", &context)
        .expect("decode");
    let value = decoded.into_value().expect("value");
    let items = value.as_sequence().expect("sequence");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_model::<Widget>(), Some(&Widget { id: 1 }));
    assert_eq!(items[1].as_model::<Widget>(), Some(&Widget { id: 2 }));
}

#[test]
fn test_envelope_unwraps_to_entity() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Envelope(Shape::model(widget_binding())),
    );
    assert_eq!(
        decoded_shape(&context),
        Some(&Shape::model(widget_binding()))
    );
    let decoded = decoder().decode(b"{\"id\":7}", &context).expect("decode");
    let value = decoded.into_value().expect("value");
    assert_eq!(value.as_model::<Widget>(), Some(&Widget { id: 7 }));
}

#[test]
fn test_error_status_routes_to_error_shape() {
    // The body would also parse as a Widget; the 404 must still route to the
    // error shape.
    let context = ResponseContext::new(
        HttpMethod::Get,
        404,
        [200, 201],
        ReturnShape::Body(Shape::model(widget_binding())),
    )
    .with_errors(ErrorShapes::default().with_status(404, Shape::model(error_binding())));

    assert_eq!(
        decoded_shape(&context),
        Some(&Shape::model(error_binding()))
    );

    let decoded = decoder()
        .decode(b"{\"code\":\"NotFound\",\"id\":1}", &context)
        .expect("decode");
    let value = decoded.into_value().expect("value");
    assert_eq!(
        value.as_model::<ErrorPayload>(),
        Some(&ErrorPayload {
            code: "NotFound".to_string()
        })
    );
    assert!(value.as_model::<Widget>().is_none());
}

#[test]
fn test_error_fallback_shape_applies_to_unmapped_status() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        503,
        [200],
        ReturnShape::Body(Shape::model(widget_binding())),
    );
    let decoded = decoder()
        .decode(b"{\"retry\":true}", &context)
        .expect("decode");
    let value = decoded.into_value().expect("value");
    let map = value.as_mapping().expect("untyped mapping");
    assert_eq!(map.get("retry").and_then(Value::as_bool), Some(true));
}

#[test]
fn test_malformed_error_body_is_returned_not_thrown() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        500,
        [200],
        ReturnShape::Body(Shape::model(widget_binding())),
    )
    .with_errors(ErrorShapes::new(Shape::model(error_binding())));

    let decoded = decoder()
        .decode(b"<html>gateway timeout</html>", &context)
        .expect("decode must not fail on the error branch");
    match decoded {
        DecodedBody::ErrorValue(err) => assert!(err.is_malformed()),
        other => panic!("expected ErrorValue, got {:?}", other),
    }
}

#[test]
fn test_error_body_without_routine_is_captured() {
    let opaque = ModelBinding::new("Opaque");
    let context = ResponseContext::new(HttpMethod::Get, 500, [200], ReturnShape::None)
        .with_errors(ErrorShapes::new(Shape::Model(opaque)));

    let decoded = decoder().decode(b"{}", &context).expect("decode");
    match decoded {
        DecodedBody::ErrorValue(CodecError::ModelRoutine { .. }) => {}
        other => panic!("expected captured ModelRoutine failure, got {:?}", other),
    }
}

#[test]
fn test_non_decodable_shapes_short_circuit() {
    for return_shape in [ReturnShape::None, ReturnShape::Raw] {
        let context = ResponseContext::new(HttpMethod::Get, 200, [200], return_shape);
        // Body would not parse as JSON; no codec may run.
        let decoded = decoder()
            .decode(b"\x00\x01 not json", &context)
            .expect("decode");
        assert!(decoded.is_no_body());
        assert!(decoded_shape(&context).is_none());
    }
}

#[test]
fn test_empty_body_decodes_to_no_body() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Body(Shape::model(widget_binding())),
    );
    let decoded = decoder().decode(b"", &context).expect("decode");
    assert!(decoded.is_no_body());
}

#[test]
fn test_wire_annotation_runs_coercion() {
    let body = format!("\"{}\"", URL_SAFE_NO_PAD.encode([0x01u8, 0x02, 0x03]));
    let context = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Body(Shape::Bytes),
    )
    .with_wire_format(WireFormat::Base64Url);

    let decoded = decoder().decode(body.as_bytes(), &context).expect("decode");
    let value = decoded.into_value().expect("value");
    assert_eq!(value.as_bytes(), Some(&[0x01u8, 0x02, 0x03][..]));
}

#[test]
fn test_success_branch_failure_propagates() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Body(Shape::model(widget_binding())),
    );
    let err = decoder().decode(b"{broken", &context).unwrap_err();
    assert!(err.is_malformed());
}

#[test]
fn test_text_format_decodes_plain_body() {
    let context = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Body(Shape::String),
    )
    .with_format(SerializationFormat::Text);

    let decoded = decoder().decode(b"plain text body", &context).expect("decode");
    let value = decoded.into_value().expect("value");
    assert_eq!(value.as_str(), Some("plain text body"));
}

#[test]
fn test_decoded_shape_agrees_with_decode() {
    // Success: entity shape.
    let success = ResponseContext::new(
        HttpMethod::Get,
        200,
        [200],
        ReturnShape::Body(Shape::Integer),
    );
    assert_eq!(decoded_shape(&success), Some(&Shape::Integer));
    let decoded = decoder().decode(b"42", &success).expect("decode");
    assert_eq!(decoded.as_value().and_then(Value::as_i64), Some(42));

    // Unexpected status: error shape.
    let error = ResponseContext::new(
        HttpMethod::Get,
        418,
        [200],
        ReturnShape::Body(Shape::Integer),
    );
    assert_eq!(decoded_shape(&error), Some(&Shape::Untyped));

    // Raw: none, regardless of status.
    let raw = ResponseContext::new(HttpMethod::Get, 200, [200], ReturnShape::Raw);
    assert!(decoded_shape(&raw).is_none());
}
