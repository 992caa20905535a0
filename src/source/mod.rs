//! Document sources
//!
//! A source yields the documents of one named collection, fully or as a
//! uniform random sample. Files (JSON, JSON Lines) are read directly;
//! databases are attached through DuckDB.

mod database;
mod file;
mod target;
mod types;

pub use database::{mask_password, DatabaseEngine, DatabaseKind, DatabaseSource};
pub use file::{sample_documents, JsonFileSource};
pub use target::{open_source, SourceTarget};
pub use types::{stream_documents, DocumentSource, DocumentStream};
