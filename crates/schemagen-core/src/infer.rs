//! Schema inference from values.yaml
//!
//! Walks a decoded YAML value and builds the matching [`SchemaNode`] tree:
//! mappings become objects, sequences become arrays, scalars map to their
//! JSON Schema type.
//!
//! Arrays take their `items` schema from the first element only. Later
//! elements are not inspected, so a heterogeneous sequence is described by
//! whatever its head is. An empty sequence gets no `items` at all.
//!
//! # Example
//!
//! ```rust
//! use schemagen_core::{infer_document, SchemaType};
//!
//! let values: serde_yaml::Value = serde_yaml::from_str("replicas: 3\nname: web\n").unwrap();
//! let doc = infer_document(&values).unwrap();
//!
//! assert_eq!(doc.root.walk("replicas").unwrap().kind(), SchemaType::Integer);
//! assert_eq!(doc.root.walk("name").unwrap().kind(), SchemaType::String);
//! ```

use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

use crate::error::{Result, SchemaGenError};
use crate::schema::{SchemaDocument, SchemaNode, SchemaType};
use crate::values::root_mapping;

/// Infer a full schema document; the root must be a mapping
pub fn infer_document(values: &Value) -> Result<SchemaDocument> {
    let root = infer_mapping(root_mapping(values)?, "")?;
    Ok(SchemaDocument::new(root))
}

/// Infer the schema of any YAML value
pub fn infer_node(value: &Value) -> Result<SchemaNode> {
    infer_at(value, "")
}

fn infer_at(value: &Value, path: &str) -> Result<SchemaNode> {
    let node = match value {
        Value::Mapping(map) => infer_mapping(map, path)?,
        Value::Sequence(seq) => {
            let items = match seq.first() {
                Some(first) => Some(infer_at(first, path)?),
                None => None,
            };
            SchemaNode::array(items)
        }
        Value::Tagged(tagged) => return infer_at(&tagged.value, path),
        scalar => SchemaNode::new(scalar_type(scalar)),
    };

    tracing::trace!(path, kind = %node.kind(), "inferred schema node");
    Ok(node)
}

fn infer_mapping(map: &Mapping, path: &str) -> Result<SchemaNode> {
    let mut properties = BTreeMap::new();
    let parent = || {
        if path.is_empty() {
            "(root)".to_string()
        } else {
            path.to_string()
        }
    };

    for (key, child) in map {
        let key =
            key_string(key).ok_or_else(|| SchemaGenError::UnsupportedKey { parent: parent() })?;
        // `1` and `"1"` are distinct YAML keys but the same property name
        if properties.contains_key(&key) {
            return Err(SchemaGenError::DuplicateKey {
                parent: parent(),
                key,
            });
        }
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", path, key)
        };
        let node = infer_at(child, &child_path)?;
        properties.insert(key, node);
    }

    Ok(SchemaNode::object(properties))
}

/// JSON Schema type of a scalar YAML value
///
/// Numbers that fit a 64-bit integer are `integer`; everything else numeric
/// (fractions, `.inf`, `.nan`) is `number`.
pub fn scalar_type(value: &Value) -> SchemaType {
    match value {
        Value::Null => SchemaType::Null,
        Value::Bool(_) => SchemaType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => SchemaType::Integer,
        Value::Number(_) => SchemaType::Number,
        Value::String(_) => SchemaType::String,
        Value::Sequence(_) => SchemaType::Array,
        Value::Mapping(_) => SchemaType::Object,
        Value::Tagged(tagged) => scalar_type(&tagged.value),
    }
}

/// Property name for a mapping key; `None` for sequence or mapping keys
fn key_string(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => key_string(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
