//! values.yaml → JSON Schema, end to end

use std::path::Path;

use crate::directive::apply_directives;
use crate::error::Result;
use crate::infer::infer_document;
use crate::schema::SchemaDocument;
use crate::values::Values;

/// Generate a schema from YAML text
pub fn generate(source: &str) -> Result<SchemaDocument> {
    generate_values(&Values::from_yaml(source)?)
}

/// Generate a schema from a values file on disk
pub fn generate_file<P: AsRef<Path>>(path: P) -> Result<SchemaDocument> {
    generate_values(&Values::from_file(path)?)
}

/// Infer the schema for already-loaded values, then apply their directives
pub fn generate_values(values: &Values) -> Result<SchemaDocument> {
    let mut document = infer_document(values.root())?;
    let applied = apply_directives(values.source(), &mut document.root)?;

    tracing::debug!(
        file = ?values.path(),
        keys = values.mapping()?.len(),
        directives = applied,
        "generated schema"
    );
    Ok(document)
}
