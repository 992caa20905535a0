//! Path flattening
//!
//! Walks a document depth-first and emits one [`Observation`] per terminal
//! value. Array positions collapse onto the [`INDEX_TOKEN`] segment so every
//! element of an array shares one path. The walk uses an explicit stack, so
//! deeply nested documents cannot overflow the call stack.

use super::types::TypeTag;
use crate::document::{Document, Value};
use crate::types::ArrayPolicy;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Synthetic segment standing for any array position
pub const INDEX_TOKEN: &str = "[]";

/// Field name reserved for type annotations in rendered schemas
pub const DEFAULT_TYPE_KEY: &str = "type";

/// What was found at a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal<'a> {
    /// A value still to be classified
    Value(&'a Value),
    /// A type decided during the walk (empty containers)
    Tag(TypeTag),
}

/// One (path, terminal) pair produced by the walk
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<'a> {
    pub path: String,
    pub terminal: Terminal<'a>,
}

/// Options for the walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlattenOptions {
    /// Which document elements of an array shape the element path
    pub arrays: ArrayPolicy,
    /// Append a [`DEFAULT_TYPE_KEY`] segment to the path of any value stored
    /// under a field literally named [`DEFAULT_TYPE_KEY`]
    pub suffix_type_key: bool,
}

struct Pending<'a> {
    path: String,
    value: &'a Value,
    /// The field name equals the reserved type key
    type_key_field: bool,
}

/// Join a parent path and a segment
pub fn join_path(parent: &str, segment: &str) -> String {
    if parent.is_empty() {
        segment.to_string()
    } else {
        format!("{parent}{PATH_SEPARATOR}{segment}")
    }
}

/// Flatten a whole document
pub fn flatten<'a>(document: &'a Document, options: &FlattenOptions) -> Vec<Observation<'a>> {
    let mut stack: Vec<Pending<'a>> = Vec::with_capacity(document.len());
    push_fields(&mut stack, "", document, options);
    walk(stack, options)
}

/// Flatten a single value found at `path`
///
/// Used to recover containers that reached the classifier as array elements.
pub fn flatten_value<'a>(
    path: &str,
    value: &'a Value,
    options: &FlattenOptions,
) -> Vec<Observation<'a>> {
    let stack = vec![Pending {
        path: path.to_string(),
        value,
        type_key_field: false,
    }];
    walk(stack, options)
}

fn push_fields<'a>(
    stack: &mut Vec<Pending<'a>>,
    parent: &str,
    document: &'a Document,
    options: &FlattenOptions,
) {
    // Reverse so fields pop in key order
    for (key, value) in document.iter().rev() {
        stack.push(Pending {
            path: join_path(parent, key),
            value,
            type_key_field: options.suffix_type_key && key == DEFAULT_TYPE_KEY,
        });
    }
}

fn walk<'a>(mut stack: Vec<Pending<'a>>, options: &FlattenOptions) -> Vec<Observation<'a>> {
    let mut out = Vec::new();

    while let Some(Pending {
        path,
        value,
        type_key_field,
    }) = stack.pop()
    {
        // Containers move down too, or `type: [..]` would read as a type annotation
        let path = if type_key_field {
            join_path(&path, DEFAULT_TYPE_KEY)
        } else {
            path
        };

        match value {
            Value::Document(doc) if !doc.is_empty() => {
                push_fields(&mut stack, &path, doc, options);
            }
            Value::Array(items) if !items.is_empty() => {
                let element_path = join_path(&path, INDEX_TOKEN);
                push_elements(&mut stack, &mut out, element_path, items, options);
            }
            Value::Document(_) | Value::Array(_) => {
                out.push(Observation {
                    path,
                    terminal: Terminal::Tag(TypeTag::Mixed),
                });
            }
            scalar => {
                out.push(Observation {
                    path,
                    terminal: Terminal::Value(scalar),
                });
            }
        }
    }

    out
}

fn push_elements<'a>(
    stack: &mut Vec<Pending<'a>>,
    out: &mut Vec<Observation<'a>>,
    element_path: String,
    items: &'a [Value],
    options: &FlattenOptions,
) {
    let first_is_document = matches!(items.first(), Some(Value::Document(_)));

    match options.arrays {
        ArrayPolicy::First if first_is_document => {
            stack.push(Pending {
                path: element_path,
                value: &items[0],
                type_key_field: false,
            });
        }
        ArrayPolicy::All => {
            for item in items.iter().rev() {
                stack.push(Pending {
                    path: element_path.clone(),
                    value: item,
                    type_key_field: false,
                });
            }
        }
        // Scalar arrays: every element is handed to the classifier as is
        ArrayPolicy::First => {
            out.extend(items.iter().map(|item| Observation {
                path: element_path.clone(),
                terminal: Terminal::Value(item),
            }));
        }
    }
}
