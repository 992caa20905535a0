//! Schema inference module
//!
//! Infers a nested type description from a stream of documents.
//!
//! # Pipeline
//!
//! - **Flatten**: walk each document into dotted paths, collapsing array
//!   positions onto one `[]` segment
//! - **Classify**: map each terminal value to a [`TypeTag`]
//! - **Merge**: widen the accumulated type per path (tag, union, Mixed)
//! - **Build**: rebuild the nested tree from the path facts
//! - **Render**: write the tree as indented text

mod builder;
mod classify;
mod flatten;
mod inference;
mod merge;
mod render;
mod types;

pub use builder::build_schema;
pub use classify::{classify, looks_like_date, ClassifierPolicy, Unclassified};
pub use flatten::{
    flatten, flatten_value, join_path, FlattenOptions, Observation, Terminal, DEFAULT_TYPE_KEY,
    INDEX_TOKEN, PATH_SEPARATOR,
};
pub use inference::{
    infer_schema, InferenceOutcome, InferenceStats, InferredSchema, SchemaInferrer, SkippedField,
};
pub use merge::{merge_field_type, SchemaFacts};
pub use render::{render, render_key, RenderOptions, DEFAULT_INDENT};
pub use types::{FieldType, SchemaNode, TypeTag};
