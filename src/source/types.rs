//! Document source traits

use crate::document::Document;
use crate::error::{Error, Result};
use crate::types::ScanMode;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Lazy, finite, non-restartable sequence of documents
pub type DocumentStream<'a> = Pin<Box<dyn Stream<Item = Result<Document>> + Send + 'a>>;

/// Stream already-loaded documents
pub fn stream_documents<'a>(documents: Vec<Document>) -> DocumentStream<'a> {
    Box::pin(futures::stream::iter(
        documents.into_iter().map(Ok::<Document, Error>),
    ))
}

/// A collection of documents that can be scanned or sampled
#[async_trait]
pub trait DocumentSource: Send {
    /// Name of the collection being read
    fn collection(&self) -> &str;

    /// Check whether at least one document is available
    async fn has_documents(&mut self) -> Result<bool>;

    /// Produce the documents, all of them or a uniform random sample
    async fn documents(&mut self, mode: ScanMode) -> Result<DocumentStream<'_>>;
}
