//! Schema tree reconstruction
//!
//! Rebuilds the nested shape from flattened path facts. Paths are applied in
//! sorted order. When one path is a prefix of another (a field that was a
//! scalar in some documents and an object in others) the structure wins and
//! the scalar fact is dropped. An object and a list competing for the same
//! slot cannot be reconciled: the first one built is kept and the later path
//! is skipped with a warning.

use super::flatten::{INDEX_TOKEN, PATH_SEPARATOR};
use super::merge::SchemaFacts;
use super::types::{FieldType, SchemaNode};

/// Build the nested schema tree from accumulated facts
pub fn build_schema(facts: &SchemaFacts) -> SchemaNode {
    let mut root = SchemaNode::object();
    for (path, field_type) in facts.iter() {
        insert_path(&mut root, path, field_type);
    }
    root
}

/// Place one path's type into the tree
fn insert_path(root: &mut SchemaNode, path: &str, field_type: &FieldType) {
    let mut slot = root;

    for segment in path.split(PATH_SEPARATOR) {
        let next = if segment == INDEX_TOKEN {
            descend_list(slot, path)
        } else {
            descend_field(slot, segment, path)
        };
        match next {
            Some(next) => slot = next,
            None => return,
        }
    }

    if is_placeholder(slot) || slot.is_terminal() {
        *slot = SchemaNode::from(field_type);
    } else {
        tracing::debug!(path, "Keeping nested structure over scalar type {field_type}");
    }
}

/// Empty objects only exist as freshly created slots
fn is_placeholder(node: &SchemaNode) -> bool {
    matches!(node, SchemaNode::Object(fields) if fields.is_empty())
}

fn descend_field<'n>(
    slot: &'n mut SchemaNode,
    segment: &str,
    path: &str,
) -> Option<&'n mut SchemaNode> {
    if slot.is_terminal() {
        tracing::debug!(path, "Replacing scalar type with nested object");
        *slot = SchemaNode::object();
    }

    match slot {
        SchemaNode::Object(fields) => Some(
            fields
                .entry(segment.to_string())
                .or_insert_with(SchemaNode::object),
        ),
        _ => {
            tracing::warn!(path, "Path expects an object where a list was built, skipping");
            None
        }
    }
}

fn descend_list<'n>(slot: &'n mut SchemaNode, path: &str) -> Option<&'n mut SchemaNode> {
    if slot.is_terminal() || is_placeholder(slot) {
        *slot = SchemaNode::list(SchemaNode::object());
    }

    match slot {
        SchemaNode::List(element) => Some(element.as_mut()),
        _ => {
            tracing::warn!(path, "Path expects a list where an object was built, skipping");
            None
        }
    }
}
