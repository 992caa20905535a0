//! Document model and decoding
//!
//! Supports: JSON, JSONL, MongoDB Extended JSON
//!
//! # Overview
//!
//! Documents are maps from field name to a dynamically shaped [`Value`].
//! Besides JSON primitives a value may carry database-native types (dates,
//! binary blobs, 64-bit integers, decimals, object ids, regular expressions,
//! ...), which Extended JSON encodes as `$`-prefixed wrapper objects.

mod decoders;
mod extended;
mod types;

pub use decoders::{decode_line, DocumentDecoder, DocumentFormat, JsonDecoder, JsonlDecoder};
pub use extended::{document_from_json, value_from_json};
pub use types::{Document, ObjectId, Value};
