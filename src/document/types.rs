//! Document value types
//!
//! A [`Value`] covers the dynamic shapes found in document stores: JSON
//! primitives plus the database-native types that Extended JSON encodes
//! (dates, binary blobs, 64-bit integers, decimals, object ids, ...).

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;

/// A document: field name to value. Key order is not significant.
pub type Document = BTreeMap<String, Value>;

/// A 12-byte database-native object identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Create an object id from raw bytes
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse an object id from its 24-character hex form
    pub fn parse_str(s: &str) -> Result<Self> {
        if s.len() != 24 || !s.is_ascii() {
            return Err(Error::decode(format!("Invalid ObjectId '{s}'")));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|e| Error::decode(format!("Invalid ObjectId '{s}': {e}")))?;
        }
        Ok(Self(bytes))
    }

    /// Raw bytes
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// A dynamically shaped document value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Double(f64),
    Int32(i32),
    Int64(i64),
    /// Arbitrary-precision decimal, kept as its decimal text
    Decimal128(String),
    String(String),
    DateTime(DateTime<Utc>),
    Binary {
        subtype: u8,
        bytes: Vec<u8>,
    },
    ObjectId(ObjectId),
    Regex {
        pattern: String,
        options: String,
    },
    JavaScript(String),
    Symbol(String),
    /// Internal replication timestamp
    Timestamp {
        time: u32,
        increment: u32,
    },
    MinKey,
    MaxKey,
    Undefined,
    DbPointer {
        namespace: String,
        id: ObjectId,
    },
    Document(Document),
    Array(Vec<Value>),
}

impl Value {
    /// Short name of the value's dynamic type
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "bool",
            Value::Double(_) => "double",
            Value::Int32(_) => "int",
            Value::Int64(_) => "long",
            Value::Decimal128(_) => "decimal",
            Value::String(_) => "string",
            Value::DateTime(_) => "date",
            Value::Binary { .. } => "binData",
            Value::ObjectId(_) => "objectId",
            Value::Regex { .. } => "regex",
            Value::JavaScript(_) => "javascript",
            Value::Symbol(_) => "symbol",
            Value::Timestamp { .. } => "timestamp",
            Value::MinKey => "minKey",
            Value::MaxKey => "maxKey",
            Value::Undefined => "undefined",
            Value::DbPointer { .. } => "dbPointer",
            Value::Document(_) => "object",
            Value::Array(_) => "array",
        }
    }

    /// Human-readable description used in diagnostics
    pub fn describe(&self) -> String {
        match self {
            Value::Timestamp { time, increment } => format!("timestamp({time}, {increment})"),
            Value::DbPointer { namespace, id } => format!("dbPointer({namespace}, {id})"),
            Value::Document(doc) => format!("object with {} field(s)", doc.len()),
            Value::Array(items) => format!("array of {} element(s)", items.len()),
            other => other.type_name().to_string(),
        }
    }

    /// Whether this value is a plain document or an array
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Document(_) | Value::Array(_))
    }

    /// Borrow as a document
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}
