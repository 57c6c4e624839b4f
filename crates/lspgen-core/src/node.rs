//! Typed field access on meta-model JSON nodes

use crate::error::{MetaModelError, MetaModelResult};
use serde_json::{Map, Value};

pub(crate) type Object = Map<String, Value>;

pub(crate) fn as_object<'a>(value: &'a Value, context: &str) -> MetaModelResult<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| MetaModelError::invalid(context, "an object"))
}

pub(crate) fn field<'a>(object: &'a Object, name: &str, context: &str) -> MetaModelResult<&'a Value> {
    object
        .get(name)
        .ok_or_else(|| MetaModelError::missing(name, context))
}

pub(crate) fn string<'a>(object: &'a Object, name: &str, context: &str) -> MetaModelResult<&'a str> {
    field(object, name, context)?
        .as_str()
        .ok_or_else(|| MetaModelError::invalid(name, "a string"))
}

pub(crate) fn object<'a>(object: &'a Object, name: &str, context: &str) -> MetaModelResult<&'a Object> {
    as_object(field(object, name, context)?, name)
}

pub(crate) fn array<'a>(object: &'a Object, name: &str, context: &str) -> MetaModelResult<&'a [Value]> {
    field(object, name, context)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| MetaModelError::invalid(name, "an array"))
}

/// Like [`array`], but an absent field reads as empty.
pub(crate) fn optional_array<'a>(object: &'a Object, name: &str) -> MetaModelResult<&'a [Value]> {
    match object.get(name) {
        None => Ok(&[]),
        Some(value) => value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| MetaModelError::invalid(name, "an array")),
    }
}

pub(crate) fn optional_bool(object: &Object, name: &str) -> MetaModelResult<bool> {
    match object.get(name) {
        None => Ok(false),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| MetaModelError::invalid(name, "a boolean")),
    }
}

/// The node's `documentation` string, empty when absent.
pub(crate) fn documentation(object: &Object) -> MetaModelResult<String> {
    match object.get("documentation") {
        None => Ok(String::new()),
        Some(value) => value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MetaModelError::invalid("documentation", "a string")),
    }
}
