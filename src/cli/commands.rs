//! CLI commands and argument parsing

use crate::types::{ArrayPolicy, ConflictPolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Infer a schema from a collection of semi-structured documents
#[derive(Parser, Debug)]
#[command(name = "docschema")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Infer the schema of one collection
    Infer {
        /// Database connection string, or a document file or directory
        target: String,

        /// Collection (table or file stem) to read
        collection: String,

        /// Sample this many documents instead of scanning all of them
        #[arg(long)]
        sample: Option<usize>,

        /// Wrap every leaf as `{ <KEY>: Type }`
        #[arg(long)]
        type_key: Option<String>,

        /// Also write the rendered schema to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settings file (YAML or JSON); flags override it
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// How conflicting types at one path are recorded
        #[arg(long)]
        conflicts: Option<ConflictPolicy>,

        /// Which array elements shape nested element schemas
        #[arg(long)]
        arrays: Option<ArrayPolicy>,

        /// Spaces per indentation level
        #[arg(long)]
        indent: Option<usize>,

        /// Report decimals as Decimal128 instead of Number
        #[arg(long)]
        distinct_decimal: bool,

        /// Report object ids as ObjectId instead of String
        #[arg(long)]
        distinct_identifier: bool,
    },

    /// Test that a target is reachable
    Check {
        /// Database connection string, or a document file or directory
        target: String,
    },

    /// List the collections available under a target
    Collections {
        /// Database connection string, or a document file or directory
        target: String,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain schema text
    Text,
    /// JSON output (one message per line)
    Json,
    /// Human-readable JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_infer() {
        let cli = Cli::try_parse_from([
            "docschema",
            "infer",
            "./dump",
            "users",
            "--sample",
            "100",
            "--conflicts",
            "mixed",
            "--arrays",
            "all",
            "--distinct-decimal",
        ])
        .unwrap();

        match cli.command {
            Commands::Infer {
                target,
                collection,
                sample,
                conflicts,
                arrays,
                distinct_decimal,
                distinct_identifier,
                ..
            } => {
                assert_eq!(target, "./dump");
                assert_eq!(collection, "users");
                assert_eq!(sample, Some(100));
                assert_eq!(conflicts, Some(ConflictPolicy::Mixed));
                assert_eq!(arrays, Some(ArrayPolicy::All));
                assert!(distinct_decimal);
                assert!(!distinct_identifier);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_infer_requires_collection() {
        assert!(Cli::try_parse_from(["docschema", "infer", "./dump"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli =
            Cli::try_parse_from(["docschema", "collections", "./dump", "-v", "-f", "json"])
                .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }
}
