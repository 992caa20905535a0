//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::InferenceConfig;
use crate::error::{Error, Result, ResultExt};
use crate::schema::{InferenceOutcome, InferredSchema, SchemaInferrer};
use crate::source::SourceTarget;
use crate::types::{ArrayPolicy, ConflictPolicy};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Instant;

/// Flags of the `infer` command that override config file values
#[derive(Debug, Clone, Default)]
pub struct InferOverrides {
    pub sample: Option<usize>,
    pub type_key: Option<String>,
    pub conflicts: Option<ConflictPolicy>,
    pub arrays: Option<ArrayPolicy>,
    pub indent: Option<usize>,
    pub distinct_decimal: bool,
    pub distinct_identifier: bool,
}

impl InferOverrides {
    /// Apply the flags on top of a base config and validate the result
    pub fn apply(self, mut config: InferenceConfig) -> Result<InferenceConfig> {
        if let Some(sample) = self.sample {
            config = config.with_sample(sample);
        }
        if let Some(key) = self.type_key {
            config = config.with_type_key(key);
        }
        if let Some(policy) = self.conflicts {
            config = config.with_conflicts(policy);
        }
        if let Some(policy) = self.arrays {
            config = config.with_arrays(policy);
        }
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        config.classifier.distinct_decimal |= self.distinct_decimal;
        config.classifier.distinct_identifier |= self.distinct_identifier;

        config.validate()?;
        Ok(config)
    }
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    ///
    /// Non-fatal errors (an empty collection) are reported as a notice and
    /// the run still succeeds.
    pub async fn run(&self) -> Result<()> {
        match self.dispatch().await {
            Err(e) if !e.is_fatal() => {
                self.output_notice(&e);
                Ok(())
            }
            other => other,
        }
    }

    async fn dispatch(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Infer {
                target,
                collection,
                sample,
                type_key,
                output,
                config,
                conflicts,
                arrays,
                indent,
                distinct_decimal,
                distinct_identifier,
            } => {
                let overrides = InferOverrides {
                    sample: *sample,
                    type_key: type_key.clone(),
                    conflicts: *conflicts,
                    arrays: *arrays,
                    indent: *indent,
                    distinct_decimal: *distinct_decimal,
                    distinct_identifier: *distinct_identifier,
                };
                let config = self.load_config(config.as_deref(), overrides)?;
                self.infer(target, collection, &config, output.as_deref())
                    .await
            }
            Commands::Check { target } => self.check(target).await,
            Commands::Collections { target } => self.collections(target).await,
        }
    }

    /// Load configuration
    fn load_config(
        &self,
        path: Option<&Path>,
        overrides: InferOverrides,
    ) -> Result<InferenceConfig> {
        let base = match path {
            Some(path) => InferenceConfig::load(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => InferenceConfig::default(),
        };
        overrides.apply(base)
    }

    /// Infer and print the schema of one collection
    async fn infer(
        &self,
        target: &str,
        collection: &str,
        config: &InferenceConfig,
        output: Option<&Path>,
    ) -> Result<()> {
        let started = Instant::now();
        let target = parse_target(target)?;
        tracing::debug!("Opening '{}' in {}", collection, target);

        let mut source = target.open(collection).await?;
        let inferrer = SchemaInferrer::from_config(config);
        let outcome = inferrer
            .infer(source.as_mut(), config.scan_mode())
            .await?;

        let schema = match outcome {
            InferenceOutcome::Empty => {
                return Err(Error::EmptySource {
                    collection: collection.to_string(),
                });
            }
            InferenceOutcome::Schema(schema) => schema,
        };

        let text = inferrer.render(&schema.tree);

        if let Some(path) = output {
            write_output(path, &text).await?;
            tracing::info!("Schema written to {}", path.display());
        }

        for skipped in &schema.stats.skipped {
            tracing::debug!(path = %skipped.path, "Skipped {}", skipped.description);
        }

        self.output_schema(collection, &schema, &text);

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Inference finished"
        );
        Ok(())
    }

    /// Check that a target is reachable
    async fn check(&self, target: &str) -> Result<()> {
        let target = parse_target(target)?;

        match target.check().await {
            Ok(()) => {
                let count = target.list_collections().await.map(|c| c.len()).unwrap_or(0);
                let message = format!("Connection successful. Found {count} collection(s).");
                match self.cli.format {
                    OutputFormat::Text => println!("{message}"),
                    _ => self.output_message(&json!({
                        "type": "CONNECTION_STATUS",
                        "connectionStatus": {
                            "status": "SUCCEEDED",
                            "message": message
                        }
                    })),
                }
                Ok(())
            }
            Err(e) => {
                if self.cli.format != OutputFormat::Text {
                    self.output_message(&json!({
                        "type": "CONNECTION_STATUS",
                        "connectionStatus": {
                            "status": "FAILED",
                            "message": e.to_string()
                        }
                    }));
                }
                Err(e)
            }
        }
    }

    /// List collections under a target
    async fn collections(&self, target: &str) -> Result<()> {
        let target = parse_target(target)?;
        let collections = target.list_collections().await?;

        match self.cli.format {
            OutputFormat::Text => {
                for name in &collections {
                    println!("{name}");
                }
            }
            _ => self.output_message(&json!({
                "type": "COLLECTIONS",
                "collections": collections,
                "target": target.to_string()
            })),
        }
        Ok(())
    }

    fn output_schema(&self, collection: &str, schema: &InferredSchema, text: &str) {
        match self.cli.format {
            OutputFormat::Text => {
                println!("{text}");
                if !schema.stats.skipped.is_empty() {
                    eprintln!(
                        "Skipped {} field(s) with unsupported types",
                        schema.stats.skipped.len()
                    );
                }
            }
            _ => {
                let skipped: Vec<Value> = schema
                    .stats
                    .skipped
                    .iter()
                    .map(|s| json!({ "path": s.path, "description": s.description }))
                    .collect();
                self.output_message(&json!({
                    "type": "SCHEMA",
                    "collection": collection,
                    "documents": schema.stats.documents,
                    "schema": schema.tree.to_json(),
                    "rendered": text,
                    "skipped": skipped
                }));
            }
        }
    }

    fn output_notice(&self, notice: &Error) {
        let message = notice.to_string();
        match (self.cli.format, notice) {
            (OutputFormat::Text, _) => println!("{message}"),
            (_, Error::EmptySource { collection }) => self.output_message(&json!({
                "type": "EMPTY",
                "collection": collection,
                "message": message
            })),
            _ => self.output_message(&json!({
                "type": "NOTICE",
                "message": message
            })),
        }
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json | OutputFormat::Text => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Parse a non-empty target argument
fn parse_target(target: &str) -> Result<SourceTarget> {
    if target.trim().is_empty() {
        return Err(Error::missing_field("target"));
    }
    Ok(SourceTarget::parse(target))
}

/// Write the rendered schema to a file, creating parent directories
pub async fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::output(format!("Failed to create {}: {e}", parent.display())))?;
    }
    tokio::fs::write(path, text)
        .await
        .map_err(|e| Error::output(format!("Failed to write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ClassifierPolicy;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_overrides_replace_file_values() {
        let base = InferenceConfig::default()
            .with_sample(50)
            .with_conflicts(ConflictPolicy::Mixed);

        let config = InferOverrides {
            sample: Some(10),
            indent: Some(4),
            distinct_identifier: true,
            ..InferOverrides::default()
        }
        .apply(base)
        .unwrap();

        assert_eq!(config.sample, Some(10));
        assert_eq!(config.indent, 4);
        assert_eq!(config.conflicts, ConflictPolicy::Mixed);
        assert_eq!(
            config.classifier,
            ClassifierPolicy {
                distinct_decimal: false,
                distinct_identifier: true,
            }
        );
    }

    #[test]
    fn test_overrides_are_validated() {
        let result = InferOverrides {
            sample: Some(0),
            ..InferOverrides::default()
        }
        .apply(InferenceConfig::default());
        assert!(matches!(result, Err(Error::InvalidConfigValue { .. })));
    }

    #[test]
    fn test_load_config_file_with_overrides() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "type_key: kind\narrays: all").unwrap();

        let runner = Runner::new(Cli {
            format: OutputFormat::Text,
            verbose: false,
            command: Commands::Check {
                target: ".".to_string(),
            },
        });

        let config = runner
            .load_config(
                Some(file.path()),
                InferOverrides {
                    conflicts: Some(ConflictPolicy::Mixed),
                    ..InferOverrides::default()
                },
            )
            .unwrap();

        assert_eq!(config.type_key.as_deref(), Some("kind"));
        assert_eq!(config.arrays, ArrayPolicy::All);
        assert_eq!(config.conflicts, ConflictPolicy::Mixed);
    }

    #[test]
    fn test_empty_target_is_rejected() {
        assert!(matches!(
            parse_target("  "),
            Err(Error::MissingConfigField { .. })
        ));
        assert!(parse_target("./dump").is_ok());
    }

    fn infer_runner(target: &Path, collection: &str) -> Runner {
        Runner::new(Cli {
            format: OutputFormat::Json,
            verbose: false,
            command: Commands::Infer {
                target: target.display().to_string(),
                collection: collection.to_string(),
                sample: None,
                type_key: None,
                output: None,
                config: None,
                conflicts: None,
                arrays: None,
                indent: None,
                distinct_decimal: false,
                distinct_identifier: false,
            },
        })
    }

    #[tokio::test]
    async fn test_empty_collection_is_a_notice() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nothing.json"), "[]").unwrap();

        let runner = infer_runner(dir.path(), "nothing");
        assert!(matches!(
            runner.dispatch().await,
            Err(Error::EmptySource { .. })
        ));
        assert!(runner.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_collection_fails_the_run() {
        let dir = tempfile::tempdir().unwrap();

        let result = infer_runner(dir.path(), "absent").run().await;
        assert!(result.unwrap_err().is_fatal());
    }

    #[tokio::test]
    async fn test_write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path: PathBuf = dir.path().join("nested").join("schema.txt");

        write_output(&path, "{\n  a: Number\n}").await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "{\n  a: Number\n}"
        );
    }
}
