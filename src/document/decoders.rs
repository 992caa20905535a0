//! Decoder implementations
//!
//! Each decoder turns a text body into documents.

use super::extended::document_from_json;
use super::types::Document;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use std::path::Path;

/// Text format of a document file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// A JSON array of objects, or a single object
    #[default]
    Json,
    /// JSON Lines (one object per line)
    Jsonl,
}

impl DocumentFormat {
    /// File extensions recognised for each format, in lookup order
    pub const EXTENSIONS: [&'static str; 3] = ["json", "jsonl", "ndjson"];

    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl" | "ndjson") => DocumentFormat::Jsonl,
            _ => DocumentFormat::Json,
        }
    }

    /// Build the decoder for this format
    pub fn decoder(self) -> Box<dyn DocumentDecoder> {
        match self {
            DocumentFormat::Json => Box::new(JsonDecoder::new()),
            DocumentFormat::Jsonl => Box::new(JsonlDecoder::new()),
        }
    }
}

/// Decodes a text body into documents
pub trait DocumentDecoder: Send + Sync {
    /// Decode every document in the body
    fn decode(&self, body: &str) -> Result<Vec<Document>>;
}

// ============================================================================
// JSON Decoder
// ============================================================================

/// JSON decoder: an array of documents or a single document
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for JsonDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Document>> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let value: JsonValue = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        match value {
            JsonValue::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    document_from_json(item)
                        .map_err(|e| Error::decode(format!("Element {i}: {e}")))
                })
                .collect(),
            other => Ok(vec![document_from_json(other)?]),
        }
    }
}

// ============================================================================
// JSONL Decoder
// ============================================================================

/// JSON Lines decoder (one JSON object per line)
#[derive(Debug, Clone, Default)]
pub struct JsonlDecoder;

impl JsonlDecoder {
    /// Create a new JSONL decoder
    pub fn new() -> Self {
        Self
    }
}

impl DocumentDecoder for JsonlDecoder {
    fn decode(&self, body: &str) -> Result<Vec<Document>> {
        let mut documents = Vec::new();

        for (line_num, line) in body.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            documents.push(decode_line(line, line_num + 1)?);
        }

        Ok(documents)
    }
}

/// Decode one JSON Lines entry; `line_num` is 1-based
pub fn decode_line(line: &str, line_num: usize) -> Result<Document> {
    let value: JsonValue = serde_json::from_str(line)
        .map_err(|e| Error::decode(format!("Failed to parse JSONL at line {line_num}: {e}")))?;
    document_from_json(value)
        .map_err(|e| Error::decode(format!("Line {line_num}: {e}")))
}
