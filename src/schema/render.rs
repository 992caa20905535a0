//! Textual schema rendering
//!
//! Objects render as brace blocks with one `key: value` entry per line,
//! lists as bracket blocks around their single element, leaves as type
//! names and unions as `A | B`. Output carries no trailing newline.

use super::types::{SchemaNode, TypeTag};
use regex::Regex;
use std::sync::LazyLock;

/// Keys matching this are written bare, anything else is quoted
static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Default per-level indentation
pub const DEFAULT_INDENT: &str = "  ";

/// Options for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Indentation string for one nesting level
    pub indent: String,
    /// Wrap every leaf as `{ <key>: <Type> }`
    pub type_key: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            type_key: None,
        }
    }
}

impl RenderOptions {
    /// Use `width` spaces per level
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Wrap leaves under a type key
    #[must_use]
    pub fn with_type_key(mut self, key: impl Into<String>) -> Self {
        self.type_key = Some(key.into());
        self
    }
}

/// Render a schema tree
pub fn render(node: &SchemaNode, options: &RenderOptions) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0, options);
    out
}

/// Quote a key unless it is a bare identifier
pub fn render_key(key: &str) -> String {
    if IDENTIFIER_REGEX.is_match(key) {
        key.to_string()
    } else {
        let mut quoted = String::with_capacity(key.len() + 2);
        quoted.push('\'');
        for c in key.chars() {
            match c {
                '\\' => quoted.push_str("\\\\"),
                '\'' => quoted.push_str("\\'"),
                '\n' => quoted.push_str("\\n"),
                '\r' => quoted.push_str("\\r"),
                '\t' => quoted.push_str("\\t"),
                c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", u32::from(c))),
                c => quoted.push(c),
            }
        }
        quoted.push('\'');
        quoted
    }
}

fn write_node(out: &mut String, node: &SchemaNode, depth: usize, options: &RenderOptions) {
    match node {
        SchemaNode::Object(fields) => {
            write_entries(
                out,
                fields.iter().map(|(k, v)| (k.as_str(), Entry::Node(v))),
                depth,
                options,
            );
        }
        SchemaNode::List(element) => {
            out.push_str("[\n");
            push_indent(out, depth + 1, options);
            write_node(out, element, depth + 1, options);
            out.push('\n');
            push_indent(out, depth, options);
            out.push(']');
        }
        SchemaNode::Leaf(tag) => write_types(out, std::slice::from_ref(tag), depth, options),
        SchemaNode::Union(members) => write_types(out, members, depth, options),
    }
}

enum Entry<'a> {
    Node(&'a SchemaNode),
    Types(&'a [TypeTag]),
}

fn write_entries<'a>(
    out: &mut String,
    entries: impl ExactSizeIterator<Item = (&'a str, Entry<'a>)>,
    depth: usize,
    options: &RenderOptions,
) {
    let count = entries.len();
    if count == 0 {
        out.push_str("{}");
        return;
    }

    out.push_str("{\n");
    for (i, (key, entry)) in entries.enumerate() {
        push_indent(out, depth + 1, options);
        out.push_str(&render_key(key));
        out.push_str(": ");
        match entry {
            Entry::Node(node) => write_node(out, node, depth + 1, options),
            Entry::Types(types) => write_type_names(out, types),
        }
        if i + 1 < count {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, depth, options);
    out.push('}');
}

fn write_types(out: &mut String, types: &[TypeTag], depth: usize, options: &RenderOptions) {
    match &options.type_key {
        Some(key) => write_entries(
            out,
            std::iter::once((key.as_str(), Entry::Types(types))),
            depth,
            options,
        ),
        None => write_type_names(out, types),
    }
}

fn write_type_names(out: &mut String, types: &[TypeTag]) {
    for (i, tag) in types.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        out.push_str(tag.canonical_name());
    }
}

fn push_indent(out: &mut String, depth: usize, options: &RenderOptions) {
    for _ in 0..depth {
        out.push_str(&options.indent);
    }
}
