//! CLI module
//!
//! Command-line interface for inferring schemas.
//!
//! # Commands
//!
//! - `infer` - Infer and print the schema of one collection
//! - `check` - Test that a target is reachable
//! - `collections` - List collections under a target

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{write_output, InferOverrides, Runner};
