//! Value classification
//!
//! Maps one terminal value to a [`TypeTag`]. Values with no rule (containers,
//! replication timestamps, `undefined`, db pointers) come back as
//! [`Unclassified`] so the caller decides how to recover.

use super::types::TypeTag;
use crate::document::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Strings made only of digits and whitespace are never dates
static DIGITS_ONLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\s]+$").unwrap());

const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%b %d %Y", "%d %b %Y"];

/// Which optional distinctions the classifier makes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClassifierPolicy {
    /// Decimals become `Decimal` instead of `Number`
    #[serde(default)]
    pub distinct_decimal: bool,
    /// Object ids become `Identifier` instead of `String`
    #[serde(default)]
    pub distinct_identifier: bool,
}

/// A value no classification rule matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unclassified {
    /// Description of the offending value
    pub description: String,
}

/// Classify one terminal value
pub fn classify(value: &Value, policy: &ClassifierPolicy) -> Result<TypeTag, Unclassified> {
    let tag = match value {
        Value::Boolean(_) => TypeTag::Boolean,
        Value::Double(_) | Value::Int32(_) => TypeTag::Number,
        Value::Decimal128(_) if policy.distinct_decimal => TypeTag::Decimal,
        Value::Decimal128(_) => TypeTag::Number,
        Value::DateTime(_) => TypeTag::Date,
        Value::String(s) if looks_like_date(s) => TypeTag::Date,
        Value::String(_) => TypeTag::String,
        Value::ObjectId(_) if policy.distinct_identifier => TypeTag::Identifier,
        Value::ObjectId(_) => TypeTag::String,
        Value::Binary { .. } => TypeTag::Binary,
        Value::Int64(_) => TypeTag::BigInteger,
        Value::Null
        | Value::Regex { .. }
        | Value::JavaScript(_)
        | Value::Symbol(_)
        | Value::MinKey
        | Value::MaxKey => TypeTag::Mixed,
        Value::Document(_)
        | Value::Array(_)
        | Value::Timestamp { .. }
        | Value::Undefined
        | Value::DbPointer { .. } => {
            return Err(Unclassified {
                description: value.describe(),
            })
        }
    };
    Ok(tag)
}

/// Check whether a string parses as a calendar date
///
/// Runs of digits and whitespace are rejected so numeric identifiers stored
/// as text are not mistaken for dates.
pub fn looks_like_date(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() || DIGITS_ONLY.is_match(s) {
        return false;
    }

    DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
        || DATE_TIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}
