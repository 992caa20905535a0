//! Schema types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Semantic type assigned to an observed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TypeTag {
    Boolean,
    Number,
    Date,
    String,
    /// Database-native object identifier
    Identifier,
    Binary,
    /// Arbitrary-precision decimal, when kept apart from Number
    Decimal,
    /// 64-bit integer
    BigInteger,
    /// Catch-all: no single type describes every observation
    Mixed,
}

impl TypeTag {
    /// Name used in rendered schemas
    pub fn canonical_name(self) -> &'static str {
        match self {
            TypeTag::Boolean => "Boolean",
            TypeTag::Number => "Number",
            TypeTag::Date => "Date",
            TypeTag::String => "String",
            TypeTag::Identifier => "ObjectId",
            TypeTag::Binary => "Buffer",
            TypeTag::Decimal => "Decimal128",
            TypeTag::BigInteger => "BigInt",
            TypeTag::Mixed => "Mixed",
        }
    }

    /// Check if this is the catch-all tag
    pub fn is_mixed(self) -> bool {
        self == TypeTag::Mixed
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// Accumulated type knowledge for one path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Every observation agreed on one tag (possibly Mixed)
    Single(TypeTag),
    /// Two or more distinct non-Mixed tags, in first-seen order
    Union(Vec<TypeTag>),
}

impl FieldType {
    /// Check if this field has collapsed to Mixed
    pub fn is_mixed(&self) -> bool {
        matches!(self, FieldType::Single(TypeTag::Mixed))
    }

    /// Tags recorded for this field, in first-seen order
    pub fn members(&self) -> &[TypeTag] {
        match self {
            FieldType::Single(tag) => std::slice::from_ref(tag),
            FieldType::Union(members) => members,
        }
    }

    /// Check if a tag has been recorded
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.members().contains(&tag)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Single(tag) => write!(f, "{tag}"),
            FieldType::Union(members) => {
                for (i, tag) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{tag}")?;
                }
                Ok(())
            }
        }
    }
}

/// Nested schema tree rebuilt from the accumulated path facts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    /// Field name to nested node
    Object(BTreeMap<String, SchemaNode>),
    /// Array placeholder; the sole element describes every item
    List(Box<SchemaNode>),
    /// A single type
    Leaf(TypeTag),
    /// Union of types, first-seen order
    Union(Vec<TypeTag>),
}

impl Default for SchemaNode {
    fn default() -> Self {
        SchemaNode::Object(BTreeMap::new())
    }
}

impl From<&FieldType> for SchemaNode {
    fn from(field_type: &FieldType) -> Self {
        match field_type {
            FieldType::Single(tag) => SchemaNode::Leaf(*tag),
            FieldType::Union(members) => SchemaNode::Union(members.clone()),
        }
    }
}

impl SchemaNode {
    /// Create an empty object node
    pub fn object() -> Self {
        Self::default()
    }

    /// Create a list node around an element
    pub fn list(element: SchemaNode) -> Self {
        SchemaNode::List(Box::new(element))
    }

    /// Leaf or union, i.e. a node carrying types rather than structure
    pub fn is_terminal(&self) -> bool {
        matches!(self, SchemaNode::Leaf(_) | SchemaNode::Union(_))
    }

    /// Get a field of an object node
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        match self {
            SchemaNode::Object(fields) => fields.get(key),
            _ => None,
        }
    }

    /// Get the element of a list node
    pub fn element(&self) -> Option<&SchemaNode> {
        match self {
            SchemaNode::List(element) => Some(element),
            _ => None,
        }
    }

    /// Convert to a JSON value
    ///
    /// Objects become objects, lists a one-element array, leaves their type
    /// name and unions `{"union": [...]}`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            SchemaNode::Object(fields) => JsonValue::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            SchemaNode::List(element) => JsonValue::Array(vec![element.to_json()]),
            SchemaNode::Leaf(tag) => JsonValue::String(tag.canonical_name().to_string()),
            SchemaNode::Union(members) => serde_json::json!({
                "union": members
                    .iter()
                    .map(|t| t.canonical_name())
                    .collect::<Vec<_>>()
            }),
        }
    }

    /// Convert to pretty JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_json()).unwrap_or_default()
    }
}
