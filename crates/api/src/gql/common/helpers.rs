//! Conversions from row fields to GraphQL output values, and the type
//! references they are declared with.

use async_graphql::{Number, Value};
use chrono::{DateTime, SecondsFormat, Utc};

pub fn text(value: &str) -> Option<Value> {
    Some(Value::from(value))
}

pub fn opt_text(value: &Option<String>) -> Option<Value> {
    value.as_deref().and_then(text)
}

pub fn int(value: i32) -> Option<Value> {
    Some(Value::from(value))
}

pub fn opt_int(value: Option<i32>) -> Option<Value> {
    value.and_then(int)
}

/// Non-finite floats have no JSON representation and resolve to `null`.
pub fn opt_float(value: Option<f64>) -> Option<Value> {
    value.and_then(Number::from_f64).map(Value::Number)
}

pub fn timestamp(value: &DateTime<Utc>) -> Option<Value> {
    Some(Value::String(value.to_rfc3339_opts(SecondsFormat::Micros, true)))
}

/// Type references shared by object fields and operation arguments.
pub mod ty {
    use async_graphql::dynamic::TypeRef;

    use crate::gql::composer::DATE_TIME;

    pub fn string() -> TypeRef {
        TypeRef::named(TypeRef::STRING)
    }

    pub fn string_nn() -> TypeRef {
        TypeRef::named_nn(TypeRef::STRING)
    }

    pub fn int() -> TypeRef {
        TypeRef::named(TypeRef::INT)
    }

    pub fn int_nn() -> TypeRef {
        TypeRef::named_nn(TypeRef::INT)
    }

    pub fn float() -> TypeRef {
        TypeRef::named(TypeRef::FLOAT)
    }

    pub fn date_time_nn() -> TypeRef {
        TypeRef::named_nn(DATE_TIME)
    }
}
