// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Self-describing model registration and type-erased model instances.
//!
//! A model type owns its wire mapping: for JSON that capability is the type's
//! `serde` implementation, for XML the [`XmlSerializable`] /
//! [`XmlDeserializable`] traits. Registration freezes the statically
//! dispatched routines into plain `fn` pointers inside a [`ModelBinding`] so
//! the codec pipeline can carry them without generics.

use crate::error::{CodecError, Result};
use crate::format::xml::XmlWriter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

/// Custom XML construction for self-describing types.
pub trait XmlDeserializable: Sized {
    /// Build an instance from the element node that represents it.
    fn from_xml(node: roxmltree::Node<'_, '_>) -> Result<Self>;
}

/// Custom XML write contract for self-describing types.
pub trait XmlSerializable {
    /// Write this value as XML, including its own root element.
    fn write_xml(&self, writer: &mut XmlWriter<'_>) -> Result<()>;
}

type Erased = Arc<dyn Any + Send + Sync>;

type JsonDecodeFn = fn(&serde_json::Value) -> Result<Erased>;
type JsonEncodeFn = fn(&(dyn Any + Send + Sync)) -> Result<serde_json::Value>;
type XmlDecodeFn = for<'a, 'input> fn(roxmltree::Node<'a, 'input>) -> Result<Erased>;
type XmlEncodeFn =
    for<'v, 'w, 'o> fn(&'v (dyn Any + Send + Sync), &'w mut XmlWriter<'o>) -> Result<()>;

/// Frozen codec routines for one registered model type.
///
/// Built once per type (typically by generated client code) and copied into
/// [`Shape::Model`](crate::shape::Shape::Model) descriptors.
#[derive(Clone, Copy)]
pub struct ModelBinding {
    type_name: &'static str,
    json_decode: Option<JsonDecodeFn>,
    json_encode: Option<JsonEncodeFn>,
    xml_decode: Option<XmlDecodeFn>,
    xml_encode: Option<XmlEncodeFn>,
}

impl ModelBinding {
    /// Start a binding for the named type with no routines registered.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            json_decode: None,
            json_encode: None,
            xml_decode: None,
            xml_encode: None,
        }
    }

    /// Register the JSON routines of `T` (its serde implementation).
    pub fn with_json<T>(mut self) -> Self
    where
        T: Serialize + DeserializeOwned + Any + Send + Sync,
    {
        self.json_decode = Some(decode_json_model::<T>);
        self.json_encode = Some(encode_json_model::<T>);
        self
    }

    /// Register the XML routines of `T`.
    pub fn with_xml<T>(mut self) -> Self
    where
        T: XmlSerializable + XmlDeserializable + Any + Send + Sync,
    {
        self.xml_decode = Some(decode_xml_model::<T>);
        self.xml_encode = Some(encode_xml_model::<T>);
        self
    }

    /// Name of the bound type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// True when JSON routines are registered.
    pub fn supports_json(&self) -> bool {
        self.json_decode.is_some()
    }

    /// True when XML routines are registered.
    pub fn supports_xml(&self) -> bool {
        self.xml_decode.is_some()
    }

    /// Run the registered JSON construction routine.
    pub fn decode_json(&self, json: &serde_json::Value) -> Result<ModelValue> {
        let decode = self.json_decode.ok_or_else(|| {
            CodecError::model_routine(self.type_name, "no JSON construction routine registered")
        })?;
        Ok(ModelValue {
            binding: *self,
            inner: decode(json)?,
        })
    }

    /// Run the registered JSON write routine.
    pub fn encode_json(&self, value: &ModelValue) -> Result<serde_json::Value> {
        let encode = self.json_encode.ok_or_else(|| {
            CodecError::model_routine(self.type_name, "no JSON write routine registered")
        })?;
        encode(value.inner.as_ref())
    }

    /// Run the registered XML construction routine on an element node.
    pub fn decode_xml(&self, node: roxmltree::Node<'_, '_>) -> Result<ModelValue> {
        let decode = self.xml_decode.ok_or_else(|| {
            CodecError::model_routine(self.type_name, "no XML construction routine registered")
        })?;
        Ok(ModelValue {
            binding: *self,
            inner: decode(node)?,
        })
    }

    /// Run the registered XML write routine.
    pub fn encode_xml(&self, value: &ModelValue, writer: &mut XmlWriter<'_>) -> Result<()> {
        let encode = self.xml_encode.ok_or_else(|| {
            CodecError::model_routine(self.type_name, "no XML write routine registered")
        })?;
        encode(value.inner.as_ref(), writer)
    }
}

impl fmt::Debug for ModelBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBinding")
            .field("type_name", &self.type_name)
            .field("json", &self.supports_json())
            .field("xml", &self.supports_xml())
            .finish()
    }
}

impl PartialEq for ModelBinding {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

impl Eq for ModelBinding {}

/// A decoded instance of a self-describing model, type-erased for transport
/// through the dynamic pipeline. Callers recover the concrete type with
/// [`ModelValue::downcast_ref`].
#[derive(Clone)]
pub struct ModelValue {
    binding: ModelBinding,
    inner: Erased,
}

impl ModelValue {
    /// Wrap a concrete model instance for serialization.
    pub fn new<T: Any + Send + Sync>(value: T, binding: ModelBinding) -> Self {
        Self {
            binding,
            inner: Arc::new(value),
        }
    }

    /// Name of the bound type.
    pub fn type_name(&self) -> &'static str {
        self.binding.type_name
    }

    /// The binding this instance was built with.
    pub fn binding(&self) -> &ModelBinding {
        &self.binding
    }

    /// View the instance as a concrete type.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for ModelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelValue({})", self.binding.type_name)
    }
}

impl PartialEq for ModelValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn decode_json_model<T>(json: &serde_json::Value) -> Result<Erased>
where
    T: DeserializeOwned + Any + Send + Sync,
{
    match serde_json::from_value::<T>(json.clone()) {
        Ok(value) => Ok(Arc::new(value)),
        Err(e) => Err(CodecError::model_routine(
            any::type_name::<T>(),
            e.to_string(),
        )),
    }
}

fn encode_json_model<T>(value: &(dyn Any + Send + Sync)) -> Result<serde_json::Value>
where
    T: Serialize + Any + Send + Sync,
{
    let value = value.downcast_ref::<T>().ok_or_else(|| {
        CodecError::model_routine(any::type_name::<T>(), "value does not match the bound type")
    })?;
    serde_json::to_value(value)
        .map_err(|e| CodecError::model_routine(any::type_name::<T>(), e.to_string()))
}

fn decode_xml_model<T>(node: roxmltree::Node<'_, '_>) -> Result<Erased>
where
    T: XmlDeserializable + Any + Send + Sync,
{
    Ok(Arc::new(T::from_xml(node)?))
}

fn encode_xml_model<T>(value: &(dyn Any + Send + Sync), writer: &mut XmlWriter<'_>) -> Result<()>
where
    T: XmlSerializable + Any + Send + Sync,
{
    let value = value.downcast_ref::<T>().ok_or_else(|| {
        CodecError::model_routine(any::type_name::<T>(), "value does not match the bound type")
    })?;
    value.write_xml(writer)
}
