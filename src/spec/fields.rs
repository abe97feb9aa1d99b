//! Typed reads of optional fields, failing at the field's own pointer when
//! the value has the wrong kind.

use serde_json::{Map, Value};

use crate::error::ParsingError;
use crate::spec::accessor::kind_name;
use crate::spec::pointer::SpecificationPointer;

fn wrong_kind(expected: &str, value: &Value, pointer: &SpecificationPointer, key: &str) -> ParsingError {
    ParsingError::invalid_value(
        format!("Expected {expected}, found {}", kind_name(value)),
        pointer.with_path_element(key),
    )
}

pub(crate) fn optional_str<'a>(
    node: &'a Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<&'a str>, ParsingError> {
    node.get(key)
        .map(|value| {
            value
                .as_str()
                .ok_or_else(|| wrong_kind("a string", value, pointer, key))
        })
        .transpose()
}

pub(crate) fn optional_string(
    node: &Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<String>, ParsingError> {
    Ok(optional_str(node, key, pointer)?.map(str::to_string))
}

pub(crate) fn optional_bool(
    node: &Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<bool>, ParsingError> {
    node.get(key)
        .map(|value| {
            value
                .as_bool()
                .ok_or_else(|| wrong_kind("a boolean", value, pointer, key))
        })
        .transpose()
}

pub(crate) fn flag(
    node: &Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<bool, ParsingError> {
    Ok(optional_bool(node, key, pointer)?.unwrap_or(false))
}

pub(crate) fn optional_u64(
    node: &Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<u64>, ParsingError> {
    node.get(key)
        .map(|value| {
            value
                .as_u64()
                .ok_or_else(|| wrong_kind("a non-negative integer", value, pointer, key))
        })
        .transpose()
}

pub(crate) fn optional_f64(
    node: &Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<f64>, ParsingError> {
    node.get(key)
        .map(|value| {
            value
                .as_f64()
                .ok_or_else(|| wrong_kind("a number", value, pointer, key))
        })
        .transpose()
}

pub(crate) fn optional_array<'a>(
    node: &'a Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<&'a Vec<Value>>, ParsingError> {
    node.get(key)
        .map(|value| {
            value
                .as_array()
                .ok_or_else(|| wrong_kind("a sequence", value, pointer, key))
        })
        .transpose()
}

pub(crate) fn optional_object<'a>(
    node: &'a Map<String, Value>,
    key: &str,
    pointer: &SpecificationPointer,
) -> Result<Option<&'a Map<String, Value>>, ParsingError> {
    node.get(key)
        .map(|value| {
            value
                .as_object()
                .ok_or_else(|| wrong_kind("a mapping", value, pointer, key))
        })
        .transpose()
}
