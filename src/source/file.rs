//! File-backed document source
//!
//! A target directory holds one file per collection (`<name>.json`,
//! `<name>.jsonl` or `<name>.ndjson`). A target may also name a single file,
//! in which case the collection name is only a label.

use super::types::{stream_documents, DocumentSource, DocumentStream};
use crate::document::{Document, DocumentFormat};
use crate::error::{Error, Result};
use crate::types::ScanMode;
use async_trait::async_trait;
use rand::seq::IteratorRandom;
use std::path::{Path, PathBuf};

/// Documents stored in a JSON or JSON Lines file
#[derive(Debug)]
pub struct JsonFileSource {
    /// File holding the collection
    path: PathBuf,
    /// Collection name
    collection: String,
    /// File format
    format: DocumentFormat,
    /// Documents decoded by `has_documents`, handed out once
    loaded: Option<Vec<Document>>,
}

impl JsonFileSource {
    /// Create a source reading a specific file
    pub fn from_file(path: impl AsRef<Path>, collection: impl Into<String>) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            format: DocumentFormat::from_path(&path),
            path,
            collection: collection.into(),
            loaded: None,
        }
    }

    /// Resolve a collection under a target directory (or a target file)
    pub fn open(target: impl AsRef<Path>, collection: &str) -> Result<Self> {
        let target = target.as_ref();

        if target.is_file() {
            return Ok(Self::from_file(target, collection));
        }

        if !target.is_dir() {
            return Err(Error::connection(
                target.display().to_string(),
                "no such file or directory",
            ));
        }

        DocumentFormat::EXTENSIONS
            .iter()
            .map(|ext| target.join(format!("{collection}.{ext}")))
            .find(|candidate| candidate.is_file())
            .map(|path| Self::from_file(path, collection))
            .ok_or_else(|| {
                Error::unavailable(
                    collection,
                    format!(
                        "no {collection}.json, {collection}.jsonl or {collection}.ndjson in {}",
                        target.display()
                    ),
                )
            })
    }

    /// Check that a target exists
    pub fn check(target: impl AsRef<Path>) -> Result<()> {
        let target = target.as_ref();
        if target.exists() {
            Ok(())
        } else {
            Err(Error::connection(
                target.display().to_string(),
                "no such file or directory",
            ))
        }
    }

    /// List collections (document files) under a target directory
    pub fn list_collections(target: impl AsRef<Path>) -> Result<Vec<String>> {
        let target = target.as_ref();
        Self::check(target)?;

        if target.is_file() {
            return Ok(target
                .file_stem()
                .map(|s| vec![s.to_string_lossy().to_string()])
                .unwrap_or_default());
        }

        let mut collections: Vec<String> = std::fs::read_dir(target)
            .map_err(|e| Error::connection(target.display().to_string(), e.to_string()))?
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| DocumentFormat::EXTENSIONS.contains(&e))
            })
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect();

        collections.sort();
        collections.dedup();
        Ok(collections)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Document>> {
        tracing::debug!("Reading {}", self.path.display());

        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::unavailable(&self.collection, e.to_string()))?;

        self.format.decoder().decode(&body)
    }
}

#[async_trait]
impl DocumentSource for JsonFileSource {
    fn collection(&self) -> &str {
        &self.collection
    }

    async fn has_documents(&mut self) -> Result<bool> {
        if self.loaded.is_none() {
            self.loaded = Some(self.load().await?);
        }
        Ok(self.loaded.as_ref().is_some_and(|docs| !docs.is_empty()))
    }

    async fn documents(&mut self, mode: ScanMode) -> Result<DocumentStream<'_>> {
        let documents = match self.loaded.take() {
            Some(documents) => documents,
            None => self.load().await?,
        };

        let documents = match mode {
            ScanMode::Full => documents,
            ScanMode::Sample(size) => sample_documents(documents, size),
        };

        Ok(stream_documents(documents))
    }
}

/// Uniform random sample of at most `size` documents (reservoir sampling)
pub fn sample_documents(documents: Vec<Document>, size: usize) -> Vec<Document> {
    if documents.len() <= size {
        return documents;
    }
    documents
        .into_iter()
        .choose_multiple(&mut rand::rng(), size)
}
