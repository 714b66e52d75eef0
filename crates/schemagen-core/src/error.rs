//! Core error types

use std::fmt;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaGenError {
    #[error("error when reading file '{}': {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode '{}' as UTF-8: {source}", .path.display())]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to parse values YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to encode schema as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Values root must be a mapping, found {found}")]
    Shape { found: &'static str },

    #[error("Unsupported mapping key under '{parent}': keys must be scalars")]
    UnsupportedKey { parent: String },

    #[error("Duplicate key '{key}' under '{parent}' after converting keys to strings")]
    DuplicateKey { parent: String, key: String },

    #[error("{}", AnnotationList(.0))]
    Annotations(Vec<AnnotationFailure>),
}

impl SchemaGenError {
    /// Annotation failures carried by this error, if any
    pub fn annotation_failures(&self) -> &[AnnotationFailure] {
        match self {
            SchemaGenError::Annotations(failures) => failures.as_slice(),
            _ => &[],
        }
    }
}

/// Failure to resolve a dotted key path against the schema tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("'{path}' does not match any key in values: '{segment}' not found")]
    NotFound { path: String, segment: String },

    #[error("'{path}' cannot descend into '{segment}': it is not an object")]
    NotAnObject { path: String, segment: String },
}

impl PathError {
    /// The full dotted path that failed to resolve
    pub fn path(&self) -> &str {
        match self {
            PathError::NotFound { path, .. } | PathError::NotAnObject { path, .. } => path,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("'{key}' must return an integer : {source}")]
    InvalidInteger {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// A directive that failed, with the 1-based source line it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFailure {
    pub line: usize,
    pub error: DirectiveError,
}

impl fmt::Display for AnnotationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

struct AnnotationList<'a>(&'a [AnnotationFailure]);

impl fmt::Display for AnnotationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        write!(
            f,
            "{} invalid schema annotation{}",
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for failure in self.0 {
            write!(f, "\n  {}", failure)?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, SchemaGenError>;
