//! Argument extraction for root operations.
//!
//! The dynamic schema hands resolvers untyped values. Each helper here reads
//! one argument and turns a wrongly shaped value into a `VALIDATION_ERROR`;
//! [`lenient_id`] is the exception and maps anything unusable to `None`.

use async_graphql::dynamic::ObjectAccessor;
use async_graphql::{ErrorExtensions, Value};
use infra::patch::Patch;

use super::error::GqlError;

fn raw<'a>(args: &'a ObjectAccessor<'_>, name: &str) -> Option<&'a Value> {
    args.get(name).map(|v| v.as_value())
}

fn invalid(name: &str, expected: &str) -> async_graphql::Error {
    GqlError::validation(format!("argument `{name}` must be {expected}")).extend()
}

fn missing(name: &str) -> async_graphql::Error {
    GqlError::validation(format!("argument `{name}` is required")).extend()
}

fn as_i32(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Id for "get by id" lookups: omitted, null or out of range all read as `None`.
pub fn lenient_id(args: &ObjectAccessor<'_>) -> Option<i32> {
    raw(args, "id").and_then(as_i32)
}

pub fn required_id(args: &ObjectAccessor<'_>) -> async_graphql::Result<i32> {
    required_i32(args, "id")
}

fn required<T>(
    value: Option<&Value>,
    name: &str,
    expected: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> async_graphql::Result<T> {
    match value {
        None | Some(Value::Null) => Err(missing(name)),
        Some(v) => convert(v).ok_or_else(|| invalid(name, expected)),
    }
}

fn optional<T>(
    value: Option<&Value>,
    name: &str,
    expected: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> async_graphql::Result<Option<T>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => convert(v).map(Some).ok_or_else(|| invalid(name, expected)),
    }
}

fn patch<T>(
    value: Option<&Value>,
    name: &str,
    expected: &str,
    convert: impl Fn(&Value) -> Option<T>,
) -> async_graphql::Result<Patch<T>> {
    match value {
        None => Ok(Patch::Absent),
        Some(Value::Null) => Ok(Patch::Null),
        Some(v) => convert(v).map(Patch::Set).ok_or_else(|| invalid(name, expected)),
    }
}

const INT: &str = "a 32-bit integer";
const FLOAT: &str = "a number";
const STRING: &str = "a string";

pub fn required_string(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<String> {
    required(raw(args, name), name, STRING, as_string)
}

pub fn required_i32(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<i32> {
    required(raw(args, name), name, INT, as_i32)
}

pub fn optional_string(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<Option<String>> {
    optional(raw(args, name), name, STRING, as_string)
}

pub fn optional_i32(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<Option<i32>> {
    optional(raw(args, name), name, INT, as_i32)
}

pub fn optional_f64(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<Option<f64>> {
    optional(raw(args, name), name, FLOAT, as_f64)
}

pub fn patch_string(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<Patch<String>> {
    patch(raw(args, name), name, STRING, as_string)
}

pub fn patch_i32(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<Patch<i32>> {
    patch(raw(args, name), name, INT, as_i32)
}

pub fn patch_f64(args: &ObjectAccessor<'_>, name: &str) -> async_graphql::Result<Patch<f64>> {
    patch(raw(args, name), name, FLOAT, as_f64)
}
