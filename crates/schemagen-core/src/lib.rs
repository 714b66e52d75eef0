//! Schemagen Core - JSON Schema generation for Helm values files
//!
//! This crate turns a chart's `values.yaml` into a JSON Schema:
//! - `infer`: builds the schema shape from the decoded values
//! - `directive`: applies `## @schemaEnum|Regex|Minimum|Maximum` comments
//! - `schema`: the typed schema tree and dotted-path resolver
//! - `values`: loads the YAML while keeping its source text
//!
//! # Example
//!
//! ```rust
//! let yaml = "port: 8080\n## @schemaMinimum port 1\n";
//! let schema = schemagen_core::generate(yaml).unwrap();
//!
//! assert_eq!(schema.root.walk("port").unwrap().minimum(), Some(1));
//! ```

pub mod directive;
pub mod error;
pub mod generator;
pub mod infer;
pub mod schema;
pub mod values;

pub use directive::{Directive, DirectiveKind, apply_directives};
pub use error::{AnnotationFailure, DirectiveError, PathError, Result, SchemaGenError};
pub use generator::{generate, generate_file, generate_values};
pub use infer::{infer_document, infer_node};
pub use schema::{SCHEMA_DIALECT, SchemaDocument, SchemaNode, SchemaType};
pub use values::Values;
