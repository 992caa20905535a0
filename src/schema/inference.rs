//! Schema inference over a document stream

use super::builder::build_schema;
use super::classify::{classify, ClassifierPolicy};
use super::flatten::{flatten, flatten_value, FlattenOptions, Observation, Terminal};
use super::merge::SchemaFacts;
use super::render::{render, RenderOptions};
use super::types::SchemaNode;
use crate::config::InferenceConfig;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::source::DocumentSource;
use crate::types::{ArrayPolicy, ConflictPolicy, ScanMode};
use futures::StreamExt;
use std::collections::VecDeque;

/// A field whose value could not be classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// Normalized path of the field
    pub path: String,
    /// Description of the value
    pub description: String,
}

/// Counters collected during a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InferenceStats {
    /// Documents consumed
    pub documents: usize,
    /// Observations merged into the accumulator
    pub observations: usize,
    /// Fields skipped because no type rule matched
    pub skipped: Vec<SkippedField>,
}

/// Result of a successful run over a non-empty source
#[derive(Debug, Clone)]
pub struct InferredSchema {
    /// Nested schema tree
    pub tree: SchemaNode,
    /// Accumulated path facts the tree was built from
    pub facts: SchemaFacts,
    /// Run counters
    pub stats: InferenceStats,
}

/// Outcome of a run
#[derive(Debug, Clone)]
pub enum InferenceOutcome {
    /// The source had no documents
    Empty,
    /// A schema was inferred
    Schema(InferredSchema),
}

impl InferenceOutcome {
    /// Get the schema, if any
    pub fn schema(&self) -> Option<&InferredSchema> {
        match self {
            InferenceOutcome::Empty => None,
            InferenceOutcome::Schema(schema) => Some(schema),
        }
    }

    /// Check if the source was empty
    pub fn is_empty(&self) -> bool {
        matches!(self, InferenceOutcome::Empty)
    }
}

/// Schema inferrer with configuration options
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    /// How conflicting types are recorded
    conflicts: ConflictPolicy,
    /// Which array elements shape nested schemas
    arrays: ArrayPolicy,
    /// Classifier distinctions
    classifier: ClassifierPolicy,
    /// Rendering options (indent, type key wrapping)
    render: RenderOptions,
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an inferrer from a run configuration
    pub fn from_config(config: &InferenceConfig) -> Self {
        Self {
            conflicts: config.conflicts,
            arrays: config.arrays,
            classifier: config.classifier,
            render: config.render_options(),
        }
    }

    /// Set the conflict policy
    #[must_use]
    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflicts = policy;
        self
    }

    /// Set the array policy
    #[must_use]
    pub fn with_array_policy(mut self, policy: ArrayPolicy) -> Self {
        self.arrays = policy;
        self
    }

    /// Set the classifier policy
    #[must_use]
    pub fn with_classifier_policy(mut self, policy: ClassifierPolicy) -> Self {
        self.classifier = policy;
        self
    }

    /// Wrap rendered leaves under a custom type key
    #[must_use]
    pub fn with_type_key(mut self, key: impl Into<String>) -> Self {
        self.render.type_key = Some(key.into());
        self
    }

    /// Set the rendering options
    #[must_use]
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    fn flatten_options(&self) -> FlattenOptions {
        FlattenOptions {
            arrays: self.arrays,
            // A custom type key wraps every leaf, which already disambiguates
            suffix_type_key: self.render.type_key.is_none(),
        }
    }

    /// Create an empty accumulator for this inferrer's policy
    pub fn new_facts(&self) -> SchemaFacts {
        SchemaFacts::with_policy(self.conflicts)
    }

    /// Merge every field of one document into the accumulator
    pub fn observe_document(
        &self,
        facts: &mut SchemaFacts,
        document: &Document,
        stats: &mut InferenceStats,
    ) {
        let options = self.flatten_options();
        let mut queue: VecDeque<Observation<'_>> = flatten(document, &options).into();

        while let Some(Observation { path, terminal }) = queue.pop_front() {
            let value = match terminal {
                Terminal::Tag(tag) => {
                    facts.merge(&path, tag);
                    stats.observations += 1;
                    continue;
                }
                Terminal::Value(value) => value,
            };

            match classify(value, &self.classifier) {
                Ok(tag) => {
                    facts.merge(&path, tag);
                    stats.observations += 1;
                }
                // Containers handed over as array elements are walked in place
                Err(_) if value.is_container() => {
                    queue.extend(flatten_value(&path, value, &options));
                }
                Err(unclassified) => {
                    let err = Error::unsupported(&path, &unclassified.description);
                    tracing::warn!("{err}; skipping field");
                    stats.skipped.push(SkippedField {
                        path,
                        description: unclassified.description,
                    });
                }
            }
        }

        stats.documents += 1;
    }

    /// Infer a schema from in-memory documents
    pub fn infer_documents<'d>(
        &self,
        documents: impl IntoIterator<Item = &'d Document>,
    ) -> InferenceOutcome {
        let mut documents = documents.into_iter().peekable();
        if documents.peek().is_none() {
            return InferenceOutcome::Empty;
        }

        let mut facts = self.new_facts();
        let mut stats = InferenceStats::default();
        for document in documents {
            self.observe_document(&mut facts, document, &mut stats);
        }

        self.finish(facts, stats)
    }

    /// Infer a schema from a document source
    ///
    /// Documents are processed one at a time; source errors abort the run.
    pub async fn infer(
        &self,
        source: &mut dyn DocumentSource,
        mode: ScanMode,
    ) -> Result<InferenceOutcome> {
        if !source.has_documents().await? {
            tracing::info!("Collection '{}' has no documents", source.collection());
            return Ok(InferenceOutcome::Empty);
        }

        tracing::debug!("Reading '{}' ({mode})", source.collection());

        let mut facts = self.new_facts();
        let mut stats = InferenceStats::default();
        let mut documents = source.documents(mode).await?;

        while let Some(document) = documents.next().await {
            let document = document?;
            self.observe_document(&mut facts, &document, &mut stats);
        }

        if stats.documents == 0 {
            return Ok(InferenceOutcome::Empty);
        }

        tracing::info!(
            documents = stats.documents,
            paths = facts.len(),
            skipped = stats.skipped.len(),
            "Schema inference complete"
        );

        Ok(self.finish(facts, stats))
    }

    fn finish(&self, facts: SchemaFacts, stats: InferenceStats) -> InferenceOutcome {
        let tree = build_schema(&facts);
        InferenceOutcome::Schema(InferredSchema { tree, facts, stats })
    }

    /// Render a schema tree with this inferrer's options
    pub fn render(&self, tree: &SchemaNode) -> String {
        render(tree, &self.render)
    }
}

/// Infer and render a schema from in-memory documents (convenience function)
///
/// Returns `None` when there are no documents.
pub fn infer_schema(documents: &[Document]) -> Option<String> {
    let inferrer = SchemaInferrer::new();
    match inferrer.infer_documents(documents) {
        InferenceOutcome::Empty => None,
        InferenceOutcome::Schema(schema) => Some(inferrer.render(&schema.tree)),
    }
}
