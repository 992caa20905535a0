// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # docschema
//!
//! Infers a nested type schema from a collection of semi-structured
//! documents (JSON, JSON Lines, MongoDB Extended JSON, or database tables
//! read through DuckDB).
//!
//! ## Features
//!
//! - **Path flattening**: array positions collapse onto one `[]` segment
//! - **Type widening**: conflicting types become unions, or Mixed
//! - **Sampling**: uniform random samples instead of full scans
//! - **Database sources**: PostgreSQL, MySQL, SQLite and DuckDB via DuckDB
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docschema::{open_source, InferenceOutcome, SchemaInferrer, ScanMode};
//!
//! #[tokio::main]
//! async fn main() -> docschema::Result<()> {
//!     let mut source = open_source("./dump", "users").await?;
//!     let inferrer = SchemaInferrer::new();
//!
//!     match inferrer.infer(source.as_mut(), ScanMode::Sample(1000)).await? {
//!         InferenceOutcome::Empty => println!("No documents"),
//!         InferenceOutcome::Schema(schema) => println!("{}", inferrer.render(&schema.tree)),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ Flatten  │ → │ Classify │ → │  Merge   │ → │  Build   │ → │  Render  │
//! │ paths    │   │ TypeTag  │   │ facts    │   │ tree     │   │ text     │
//! └──────────┘   └──────────┘   └──────────┘   └──────────┘   └──────────┘
//!       ↑
//! ┌─────┴──────────────────────────┐
//! │ DocumentSource (files, DuckDB) │
//! └────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Run configuration
pub mod config;

/// Document model and decoding
pub mod document;

/// Schema inference pipeline
pub mod schema;

/// Document sources (files, databases)
pub mod source;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::InferenceConfig;
pub use document::{Document, Value};
pub use schema::{infer_schema, InferenceOutcome, SchemaInferrer, SchemaNode, TypeTag};
pub use source::{open_source, DocumentSource, SourceTarget};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
