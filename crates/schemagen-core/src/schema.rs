//! Typed JSON Schema tree
//!
//! A [`SchemaDocument`] is the root of the generated schema: the `$schema`
//! dialect marker plus a root [`SchemaNode`]. Nodes own their children through
//! `properties` (objects) or `items` (arrays), so the tree has no sharing.
//!
//! Fields are declared in alphabetical order and `properties` is a `BTreeMap`,
//! which keeps the serialized output sorted the same way `helm schema-gen`
//! printed it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PathError, Result};

/// Dialect written to the `$schema` key of every generated document
pub const SCHEMA_DIALECT: &str = "http://json-schema.org/schema#";

/// JSON Schema `type` keyword values
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
    Null,
}

impl SchemaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaType::Object => "object",
            SchemaType::Array => "array",
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Number => "number",
            SchemaType::Boolean => "boolean",
            SchemaType::Null => "null",
        }
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One JSON Schema fragment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaNode {
    /// Allowed values (`@schemaEnum`)
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    enum_values: Option<Vec<String>>,

    /// Element schema for arrays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<SchemaNode>>,

    /// Inclusive upper bound (`@schemaMaximum`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    maximum: Option<i64>,

    /// Inclusive lower bound (`@schemaMinimum`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minimum: Option<i64>,

    /// Regex for string values (`@schemaRegex`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pattern: Option<String>,

    /// Child schemas for objects
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<BTreeMap<String, SchemaNode>>,

    #[serde(rename = "type")]
    kind: SchemaType,
}

impl SchemaNode {
    /// Create a leaf node of the given type
    ///
    /// Object nodes start with an empty `properties` map so that they can be
    /// walked into even when the source mapping was empty.
    pub fn new(kind: SchemaType) -> Self {
        Self {
            enum_values: None,
            items: None,
            maximum: None,
            minimum: None,
            pattern: None,
            properties: (kind == SchemaType::Object).then(BTreeMap::new),
            kind,
        }
    }

    /// Create an object node from its children
    pub fn object(properties: BTreeMap<String, SchemaNode>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::new(SchemaType::Object)
        }
    }

    /// Create an array node, optionally constraining its elements
    pub fn array(items: Option<SchemaNode>) -> Self {
        Self {
            items: items.map(Box::new),
            ..Self::new(SchemaType::Array)
        }
    }

    pub fn kind(&self) -> SchemaType {
        self.kind
    }

    pub fn properties(&self) -> Option<&BTreeMap<String, SchemaNode>> {
        self.properties.as_ref()
    }

    /// Get a direct child by key
    pub fn property(&self, key: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    pub fn items(&self) -> Option<&SchemaNode> {
        self.items.as_deref()
    }

    pub fn enum_values(&self) -> Option<&[String]> {
        self.enum_values.as_deref()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn minimum(&self) -> Option<i64> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<i64> {
        self.maximum
    }

    pub fn set_enum_values(&mut self, values: Vec<String>) {
        self.enum_values = Some(values);
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = Some(pattern.into());
    }

    pub fn set_minimum(&mut self, minimum: i64) {
        self.minimum = Some(minimum);
    }

    pub fn set_maximum(&mut self, maximum: i64) {
        self.maximum = Some(maximum);
    }

    /// Resolve a dotted key path (e.g. `database.port`) to a descendant node
    ///
    /// Each segment descends through `properties`; the resolver never creates
    /// nodes and never looks into array `items`.
    pub fn walk(&self, path: &str) -> std::result::Result<&SchemaNode, PathError> {
        let mut node = self;
        for segment in path.split('.') {
            let properties = node
                .properties
                .as_ref()
                .ok_or_else(|| not_an_object(path, segment))?;
            node = properties
                .get(segment)
                .ok_or_else(|| not_found(path, segment))?;
        }
        Ok(node)
    }

    /// Mutable twin of [`SchemaNode::walk`]
    pub fn walk_mut(&mut self, path: &str) -> std::result::Result<&mut SchemaNode, PathError> {
        let mut node = self;
        for segment in path.split('.') {
            let properties = node
                .properties
                .as_mut()
                .ok_or_else(|| not_an_object(path, segment))?;
            node = properties
                .get_mut(segment)
                .ok_or_else(|| not_found(path, segment))?;
        }
        Ok(node)
    }

    /// Every dotted key path reachable through `properties`, depth first
    pub fn key_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        collect_key_paths(self, "", &mut paths);
        paths
    }
}

fn collect_key_paths(node: &SchemaNode, prefix: &str, out: &mut Vec<String>) {
    let Some(properties) = &node.properties else {
        return;
    };
    for (key, child) in properties {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        collect_key_paths(child, &path, out);
        out.push(path);
    }
}

fn not_found(path: &str, segment: &str) -> PathError {
    PathError::NotFound {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

fn not_an_object(path: &str, segment: &str) -> PathError {
    PathError::NotAnObject {
        path: path.to_string(),
        segment: segment.to_string(),
    }
}

/// A complete generated schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub dialect: String,

    #[serde(flatten)]
    pub root: SchemaNode,
}

impl SchemaDocument {
    pub fn new(root: SchemaNode) -> Self {
        Self {
            dialect: SCHEMA_DIALECT.to_string(),
            root,
        }
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generic JSON form, for callers that want to post-process the schema
    pub fn to_json_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
