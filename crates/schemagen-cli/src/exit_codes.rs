//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Annotation error - a `## @schema...` directive could not be applied
pub const ANNOTATION_ERROR: i32 = 2;

/// Values error - values.yaml is not valid YAML or not a mapping
pub const VALUES_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
