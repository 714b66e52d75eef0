//! Values file loading
//!
//! Keeps both the decoded YAML and the raw text: the schema is inferred from
//! the former, while directives are read from the comments in the latter.

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::error::{Result, SchemaGenError};

/// A decoded values.yaml together with its source text
#[derive(Debug, Clone)]
pub struct Values {
    path: Option<PathBuf>,
    source: String,
    root: Value,
}

impl Values {
    /// Load values from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| SchemaGenError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|source| SchemaGenError::Utf8 {
            path: path.to_path_buf(),
            source,
        })?;
        let mut values = Self::from_yaml(content)?;
        values.path = Some(path.to_path_buf());
        Ok(values)
    }

    /// Parse values from a YAML string
    pub fn from_yaml(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let root: Value = serde_yaml::from_str(&source)?;
        Ok(Self {
            path: None,
            source,
            root,
        })
    }

    /// File the values were read from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Raw YAML text, comments included
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The top-level mapping
    ///
    /// An empty or comments-only document reads as an empty mapping. Fails
    /// with [`SchemaGenError::Shape`] when the document is a sequence or a
    /// scalar.
    pub fn mapping(&self) -> Result<&Mapping> {
        root_mapping(&self.root)
    }
}

static EMPTY_MAPPING: LazyLock<Mapping> = LazyLock::new(Mapping::new);

pub(crate) fn root_mapping(root: &Value) -> Result<&Mapping> {
    match root {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(&EMPTY_MAPPING),
        Value::Tagged(tagged) => root_mapping(&tagged.value),
        other => Err(SchemaGenError::Shape {
            found: value_kind(other),
        }),
    }
}

/// Human-readable name of a YAML value's kind
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(tagged) => value_kind(&tagged.value),
    }
}
