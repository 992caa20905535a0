//! Target resolution
//!
//! A target names where collections live: a database connection string or a
//! path to a file or directory of document files.

use super::database::{DatabaseEngine, DatabaseKind, DatabaseSource};
use super::file::JsonFileSource;
use super::types::DocumentSource;
use crate::error::Result;
use std::path::PathBuf;

/// Where collections are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceTarget {
    /// A JSON/JSONL file or a directory of them
    Files(PathBuf),
    /// A database attached through DuckDB
    Database {
        kind: DatabaseKind,
        location: String,
    },
}

impl SourceTarget {
    /// Parse a target string
    pub fn parse(target: &str) -> Self {
        let target = target.trim();

        if target.starts_with("postgres://") || target.starts_with("postgresql://") {
            return Self::database(DatabaseKind::Postgres, target);
        }
        if target.starts_with("mysql://") {
            return Self::database(DatabaseKind::Mysql, target);
        }
        if let Some(path) = target.strip_prefix("sqlite:") {
            return Self::database(DatabaseKind::Sqlite, path.trim_start_matches("//"));
        }
        if let Some(path) = target.strip_prefix("duckdb:") {
            return Self::database(DatabaseKind::Duckdb, path.trim_start_matches("//"));
        }

        let lower = target.to_lowercase();
        if lower.ends_with(".sqlite") || lower.ends_with(".db") {
            return Self::database(DatabaseKind::Sqlite, target);
        }
        if lower.ends_with(".duckdb") {
            return Self::database(DatabaseKind::Duckdb, target);
        }

        Self::Files(PathBuf::from(target))
    }

    fn database(kind: DatabaseKind, location: &str) -> Self {
        Self::Database {
            kind,
            location: location.to_string(),
        }
    }

    /// Open a collection as a document source
    pub async fn open(&self, collection: &str) -> Result<Box<dyn DocumentSource>> {
        match self {
            Self::Files(path) => Ok(Box::new(JsonFileSource::open(path, collection)?)),
            Self::Database { kind, location } => {
                let engine = DatabaseEngine::connect(*kind, location)?;
                Ok(Box::new(DatabaseSource::new(engine, collection)))
            }
        }
    }

    /// Check that the target is reachable
    pub async fn check(&self) -> Result<()> {
        match self {
            Self::Files(path) => JsonFileSource::check(path),
            Self::Database { kind, location } => {
                DatabaseEngine::connect(*kind, location)?.check_connection()
            }
        }
    }

    /// List the collections available under the target
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        match self {
            Self::Files(path) => JsonFileSource::list_collections(path),
            Self::Database { kind, location } => {
                DatabaseEngine::connect(*kind, location)?.list_tables()
            }
        }
    }
}

impl std::fmt::Display for SourceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Files(path) => write!(f, "{}", path.display()),
            Self::Database { kind, location } => {
                write!(f, "{kind}:{}", super::database::mask_password(location))
            }
        }
    }
}

/// Parse a target string and open one of its collections
pub async fn open_source(target: &str, collection: &str) -> Result<Box<dyn DocumentSource>> {
    SourceTarget::parse(target).open(collection).await
}
