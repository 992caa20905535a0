//! Configuration for schema inference runs
//!
//! Settings can come from a YAML or JSON file and are overridden by
//! command-line flags.

use crate::error::{Error, Result};
use crate::schema::{ClassifierPolicy, RenderOptions, DEFAULT_INDENT};
use crate::types::{ArrayPolicy, ConflictPolicy, OptionStringExt, ScanMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted indentation width
pub const MAX_INDENT: usize = 16;

// ============================================================================
// Inference Config
// ============================================================================

/// Settings for one inference run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Wrap every rendered leaf under this key instead of suffixing `type` fields
    #[serde(default)]
    pub type_key: Option<String>,

    /// Spaces per indentation level
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// How conflicting types at one path are recorded
    #[serde(default)]
    pub conflicts: ConflictPolicy,

    /// Which array elements shape nested element schemas
    #[serde(default)]
    pub arrays: ArrayPolicy,

    /// Classifier distinctions
    #[serde(flatten)]
    pub classifier: ClassifierPolicy,

    /// Sample size (absent = scan every document)
    #[serde(default)]
    pub sample: Option<usize>,
}

fn default_indent() -> usize {
    DEFAULT_INDENT.len()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            type_key: None,
            indent: default_indent(),
            conflicts: ConflictPolicy::default(),
            arrays: ArrayPolicy::default(),
            classifier: ClassifierPolicy::default(),
            sample: None,
        }
    }
}

impl InferenceConfig {
    /// Create a config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {e}",
                    path.display()
                ))
            }
        })?;

        let config = if path.extension().and_then(|e| e.to_str()) == Some("json") {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a JSON config
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the type key; an empty key clears it
    #[must_use]
    pub fn with_type_key(mut self, key: impl Into<String>) -> Self {
        self.type_key = key.into().none_if_empty();
        self
    }

    /// Set the conflict policy
    #[must_use]
    pub fn with_conflicts(mut self, policy: ConflictPolicy) -> Self {
        self.conflicts = policy;
        self
    }

    /// Set the array policy
    #[must_use]
    pub fn with_arrays(mut self, policy: ArrayPolicy) -> Self {
        self.arrays = policy;
        self
    }

    /// Set the sample size
    #[must_use]
    pub fn with_sample(mut self, sample: usize) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.indent > MAX_INDENT {
            return Err(Error::invalid_value(
                "indent",
                format!("must be at most {MAX_INDENT}, got {}", self.indent),
            ));
        }

        if self.sample == Some(0) {
            return Err(Error::invalid_value("sample", "must be greater than zero"));
        }

        if let Some(key) = &self.type_key {
            if key.is_empty() {
                return Err(Error::invalid_value("type_key", "must not be empty"));
            }
            if key.contains(crate::schema::PATH_SEPARATOR) {
                return Err(Error::invalid_value(
                    "type_key",
                    format!("'{key}' must not contain '.'"),
                ));
            }
        }

        Ok(())
    }

    /// Scan mode selected by the sample size
    pub fn scan_mode(&self) -> ScanMode {
        ScanMode::from_sample(self.sample)
    }

    /// Rendering options
    pub fn render_options(&self) -> RenderOptions {
        let options = RenderOptions::default().with_indent_width(self.indent);
        match &self.type_key {
            Some(key) => options.with_type_key(key.clone()),
            None => options,
        }
    }
}
