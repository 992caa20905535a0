//! Extended JSON conversion
//!
//! Turns `serde_json` values into [`Value`]s, recognising the canonical and
//! relaxed Extended JSON wrappers (`{"$oid": ...}`, `{"$date": ...}`, ...).
//! Objects that look like a wrapper but do not parse as one are kept as
//! plain documents.

use super::types::{Document, ObjectId, Value};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use base64::Engine as _;
use chrono::{DateTime, Utc};

/// Convert a top-level JSON value into a document
pub fn document_from_json(value: JsonValue) -> Result<Document> {
    match value_from_json(value) {
        Value::Document(doc) => Ok(doc),
        other => Err(Error::decode(format!(
            "Expected a JSON object at the top level, got {}",
            other.describe()
        ))),
    }
}

/// Convert any JSON value into a document value
pub fn value_from_json(value: JsonValue) -> Value {
    match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Boolean(b),
        JsonValue::Number(n) => number_value(&n),
        JsonValue::String(s) => Value::String(s),
        JsonValue::Array(items) => Value::Array(items.into_iter().map(value_from_json).collect()),
        JsonValue::Object(map) => match wrapper_value(&map) {
            Some(value) => value,
            None => Value::Document(
                map.into_iter()
                    .map(|(k, v)| (k, value_from_json(v)))
                    .collect(),
            ),
        },
    }
}

/// Plain JSON numbers: int32 when it fits, otherwise double
///
/// Only `$numberLong` produces an int64, so a plain integer field never
/// changes type with the magnitude of its values.
fn number_value(n: &serde_json::Number) -> Value {
    match n.as_i64().map(i32::try_from) {
        Some(Ok(small)) => Value::Int32(small),
        _ => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
    }
}

/// Recognise an Extended JSON type wrapper
fn wrapper_value(map: &JsonObject) -> Option<Value> {
    let first = map.keys().next()?;
    if !first.starts_with('$') {
        return None;
    }

    match map.len() {
        1 => single_key_wrapper(first, &map[first.as_str()]),
        2 => two_key_wrapper(map),
        _ => None,
    }
}

fn single_key_wrapper(key: &str, inner: &JsonValue) -> Option<Value> {
    match key {
        "$oid" => ObjectId::parse_str(inner.as_str()?).ok().map(Value::ObjectId),
        "$date" => parse_date(inner).map(Value::DateTime),
        "$numberLong" => inner.as_str()?.parse().ok().map(Value::Int64),
        "$numberInt" => inner.as_str()?.parse().ok().map(Value::Int32),
        "$numberDouble" => inner.as_str()?.parse().ok().map(Value::Double),
        "$numberDecimal" => Some(Value::Decimal128(inner.as_str()?.to_string())),
        "$binary" => {
            let obj = inner.as_object()?;
            binary_value(obj.get("base64")?.as_str()?, obj.get("subType")?.as_str()?)
        }
        "$regularExpression" => {
            let obj = inner.as_object()?;
            Some(Value::Regex {
                pattern: obj.get("pattern")?.as_str()?.to_string(),
                options: obj.get("options")?.as_str()?.to_string(),
            })
        }
        "$code" => Some(Value::JavaScript(inner.as_str()?.to_string())),
        "$symbol" => Some(Value::Symbol(inner.as_str()?.to_string())),
        "$timestamp" => {
            let obj = inner.as_object()?;
            Some(Value::Timestamp {
                time: u32::try_from(obj.get("t")?.as_u64()?).ok()?,
                increment: u32::try_from(obj.get("i")?.as_u64()?).ok()?,
            })
        }
        "$minKey" => Some(Value::MinKey),
        "$maxKey" => Some(Value::MaxKey),
        "$undefined" => Some(Value::Undefined),
        "$dbPointer" => {
            let obj = inner.as_object()?;
            let namespace = obj.get("$ref")?.as_str()?.to_string();
            let id = obj.get("$id")?.as_object()?.get("$oid")?.as_str()?;
            Some(Value::DbPointer {
                namespace,
                id: ObjectId::parse_str(id).ok()?,
            })
        }
        _ => None,
    }
}

/// Legacy wrappers spread over two keys
fn two_key_wrapper(map: &JsonObject) -> Option<Value> {
    if let (Some(regex), Some(options)) = (map.get("$regex"), map.get("$options")) {
        return Some(Value::Regex {
            pattern: regex.as_str()?.to_string(),
            options: options.as_str()?.to_string(),
        });
    }
    if let (Some(data), Some(subtype)) = (map.get("$binary"), map.get("$type")) {
        return binary_value(data.as_str()?, subtype.as_str()?);
    }
    if let (Some(code), Some(_scope)) = (map.get("$code"), map.get("$scope")) {
        return Some(Value::JavaScript(code.as_str()?.to_string()));
    }
    None
}

fn binary_value(data: &str, subtype: &str) -> Option<Value> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .ok()?;
    let subtype = u8::from_str_radix(subtype, 16).ok()?;
    Some(Value::Binary { subtype, bytes })
}

/// `$date` may hold an ISO string, epoch millis, or a `$numberLong`
fn parse_date(inner: &JsonValue) -> Option<DateTime<Utc>> {
    match inner {
        JsonValue::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        JsonValue::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        JsonValue::Object(obj) => {
            let millis = obj.get("$numberLong")?.as_str()?.parse().ok()?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}
