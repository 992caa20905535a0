//! Error types for docschema
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for docschema
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Failed to connect to '{target}': {message}")]
    ConnectionFailure { target: String, message: String },

    #[error("Collection '{collection}' is unavailable: {message}")]
    SourceUnavailable { collection: String, message: String },

    #[error("No documents found in '{collection}'")]
    EmptySource { collection: String },

    #[error("Failed to decode document: {message}")]
    Decode { message: String },

    // ============================================================================
    // Inference Errors
    // ============================================================================
    #[error("Unsupported type at '{path}': {description}")]
    UnsupportedType { path: String, description: String },

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a connection failure
    pub fn connection(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConnectionFailure {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create a source unavailable error
    pub fn unavailable(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            collection: collection.into(),
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unsupported type error
    pub fn unsupported(path: impl Into<String>, description: impl Into<String>) -> Self {
        Self::UnsupportedType {
            path: path.into(),
            description: description.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether the run should abort on this error.
    ///
    /// Unsupported field types are recovered per field and an empty source is
    /// reported as a notice; everything else stops the run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::UnsupportedType { .. } | Error::EmptySource { .. })
    }
}

/// Result type alias for docschema
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("target");
        assert_eq!(err.to_string(), "Missing required config field: target");

        let err = Error::unsupported("a.b", "Timestamp(1, 2)");
        assert_eq!(err.to_string(), "Unsupported type at 'a.b': Timestamp(1, 2)");

        let err = Error::EmptySource {
            collection: "users".to_string(),
        };
        assert_eq!(err.to_string(), "No documents found in 'users'");
    }

    #[test]
    fn test_is_fatal() {
        assert!(!Error::unsupported("x", "undefined").is_fatal());
        assert!(!Error::EmptySource {
            collection: "users".to_string()
        }
        .is_fatal());

        assert!(Error::connection("postgres://db", "refused").is_fatal());
        assert!(Error::unavailable("users", "no such table").is_fatal());
        assert!(Error::config("bad").is_fatal());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
