//! Common types used throughout docschema
//!
//! This module contains shared type definitions, type aliases,
//! and the policy enums that select between inference behaviours.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Scan Mode
// ============================================================================

/// How a document source enumerates its documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    /// Visit every document
    #[default]
    Full,
    /// Uniform random sample of at most `n` documents
    Sample(usize),
}

impl ScanMode {
    /// Build a scan mode from an optional sample size
    pub fn from_sample(sample: Option<usize>) -> Self {
        sample.map_or(ScanMode::Full, ScanMode::Sample)
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanMode::Full => write!(f, "full scan"),
            ScanMode::Sample(n) => write!(f, "sample of {n}"),
        }
    }
}

// ============================================================================
// Conflict Policy
// ============================================================================

/// What happens when two distinct types are observed at one path
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Record every distinct type in a union (first-seen order)
    #[default]
    Union,
    /// Collapse to Mixed on the first conflict
    Mixed,
}

// ============================================================================
// Array Policy
// ============================================================================

/// Which elements of an array of documents shape the element schema
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ArrayPolicy {
    /// Only the first element seeds the nested shape
    #[default]
    First,
    /// Every document element contributes
    All,
}

// ============================================================================
// Log Level
// ============================================================================

/// Log level for the command-line runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_mode_from_sample() {
        assert_eq!(ScanMode::from_sample(None), ScanMode::Full);
        assert_eq!(ScanMode::from_sample(Some(50)), ScanMode::Sample(50));
        assert_eq!(ScanMode::Sample(50).to_string(), "sample of 50");
    }

    #[test]
    fn test_policy_serde() {
        let policy: ConflictPolicy = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(policy, ConflictPolicy::Mixed);

        let json = serde_json::to_string(&ArrayPolicy::All).unwrap();
        assert_eq!(json, "\"all\"");

        assert_eq!(ConflictPolicy::default(), ConflictPolicy::Union);
        assert_eq!(ArrayPolicy::default(), ArrayPolicy::First);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(tracing::Level::from(LogLevel::Debug), tracing::Level::DEBUG);
        assert_eq!(tracing::Level::from(LogLevel::default()), tracing::Level::INFO);
    }

    #[test]
    fn test_option_string_none_if_empty() {
        assert_eq!(
            Some("$type".to_string()).none_if_empty(),
            Some("$type".to_string())
        );
        assert_eq!(Some(String::new()).none_if_empty(), None);
        assert_eq!(None::<String>.none_if_empty(), None);
        assert_eq!(String::new().none_if_empty(), None);
    }
}
