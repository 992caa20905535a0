//! Type merging across observations
//!
//! A path's type only ever widens: a tag, then a union on the first
//! conflict, then Mixed. Mixed absorbs everything that follows.

use super::types::{FieldType, TypeTag};
use crate::types::ConflictPolicy;
use std::collections::BTreeMap;

impl FieldType {
    /// Fold a new observation into this field type.
    ///
    /// Returns true if the field type changed.
    pub fn absorb(&mut self, tag: TypeTag, policy: ConflictPolicy) -> bool {
        if self.is_mixed() || self.contains(tag) {
            return false;
        }

        let widened = match (&*self, policy) {
            _ if tag.is_mixed() => FieldType::Single(TypeTag::Mixed),
            (_, ConflictPolicy::Mixed) => FieldType::Single(TypeTag::Mixed),
            (FieldType::Single(existing), ConflictPolicy::Union) => {
                FieldType::Union(vec![*existing, tag])
            }
            (FieldType::Union(members), ConflictPolicy::Union) => {
                let mut members = members.clone();
                members.push(tag);
                FieldType::Union(members)
            }
        };

        *self = widened;
        true
    }
}

/// Merge one observation into an optional existing field type
pub fn merge_field_type(
    existing: Option<&FieldType>,
    tag: TypeTag,
    policy: ConflictPolicy,
) -> FieldType {
    match existing {
        None => FieldType::Single(tag),
        Some(field_type) => {
            let mut merged = field_type.clone();
            merged.absorb(tag, policy);
            merged
        }
    }
}

/// The accumulator: normalized path to the widest type observed there
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaFacts {
    fields: BTreeMap<String, FieldType>,
    policy: ConflictPolicy,
}

impl SchemaFacts {
    /// Create an empty accumulator with the default conflict policy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty accumulator with a conflict policy
    pub fn with_policy(policy: ConflictPolicy) -> Self {
        Self {
            fields: BTreeMap::new(),
            policy,
        }
    }

    /// Conflict policy in use
    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Record that `tag` was observed at `path`.
    ///
    /// Returns true if the accumulator changed.
    pub fn merge(&mut self, path: &str, tag: TypeTag) -> bool {
        match self.fields.get_mut(path) {
            Some(field_type) => field_type.absorb(tag, self.policy),
            None => {
                self.fields.insert(path.to_string(), FieldType::Single(tag));
                true
            }
        }
    }

    /// Get the field type recorded at a path
    pub fn get(&self, path: &str) -> Option<&FieldType> {
        self.fields.get(path)
    }

    /// Number of recorded paths
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate paths in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Recorded paths in sorted order
    pub fn paths(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}
