//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use schemagen_core::SchemaGenError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Wrong number of positional arguments
    #[error("{message}")]
    #[diagnostic(
        code(schemagen::cli::usage),
        help("usage: schemagen <values-yaml-file>")
    )]
    Usage { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("{message}")]
    #[diagnostic(code(schemagen::cli::io))]
    Io { message: String },

    /// values.yaml could not be decoded or has the wrong shape
    #[error("Values error: {message}")]
    #[diagnostic(code(schemagen::cli::values))]
    Values {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// One or more directives failed
    #[error("{message}")]
    #[diagnostic(
        code(schemagen::cli::annotation),
        help("directives look like '## @schemaMinimum <dotted.key.path> <value>'")
    )]
    Annotation { message: String },

    /// Internal error (runtime, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(schemagen::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage { .. } => exit_codes::USAGE_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Values { .. } => exit_codes::VALUES_ERROR,
            CliError::Annotation { .. } => exit_codes::ANNOTATION_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
        }
    }
}

impl From<SchemaGenError> for CliError {
    fn from(err: SchemaGenError) -> Self {
        let message = err.to_string();
        match err {
            SchemaGenError::FileRead { .. } => CliError::Io { message },
            SchemaGenError::Utf8 { .. } => CliError::Values {
                message,
                help: Some("save values.yaml with UTF-8 encoding".to_string()),
            },
            SchemaGenError::Yaml(_) => CliError::Values {
                message,
                help: None,
            },
            SchemaGenError::Shape { .. } => CliError::Values {
                message,
                help: Some("the top level of values.yaml must be a mapping of keys".to_string()),
            },
            SchemaGenError::UnsupportedKey { .. } => CliError::Values {
                message,
                help: Some("use plain string keys in values.yaml".to_string()),
            },
            SchemaGenError::DuplicateKey { .. } => CliError::Values {
                message,
                help: Some("keys like `1` and \"1\" name the same property".to_string()),
            },
            SchemaGenError::Annotations(_) => CliError::Annotation { message },
            SchemaGenError::Json(_) => CliError::Internal { message },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
