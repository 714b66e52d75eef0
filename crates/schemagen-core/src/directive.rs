//! Schema directives embedded in values.yaml comments
//!
//! A directive is a line that starts with `##` and carries at least four
//! space-separated fields:
//!
//! ```yaml
//! service:
//!   port: 8080
//! ## @schemaMinimum service.port 1
//! ## @schemaMaximum service.port 65535
//! ## @schemaEnum service.type ClusterIP,NodePort,LoadBalancer
//! ## @schemaRegex image.tag ^v[0-9]+
//! ```
//!
//! Only the fourth field is the value; anything after it is ignored. Lines
//! that do not have this shape (single `#` comments, indented comments, short
//! lines, unknown tokens) are plain comments and never fail.

use phf::phf_map;

use crate::error::{AnnotationFailure, DirectiveError, Result, SchemaGenError};
use crate::schema::SchemaNode;

/// Prefix that marks a comment line as a candidate directive
pub const DIRECTIVE_PREFIX: &str = "##";

static DIRECTIVES: phf::Map<&'static str, DirectiveKind> = phf_map! {
    "@schemaEnum" => DirectiveKind::Enum,
    "@schemaRegex" => DirectiveKind::Regex,
    "@schemaMinimum" => DirectiveKind::Minimum,
    "@schemaMaximum" => DirectiveKind::Maximum,
};

/// The constraint a directive adds to its target node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `enum`: comma-separated list, fragments kept verbatim
    Enum,
    /// `pattern`: the value as-is
    Regex,
    /// `minimum`: base-10 32-bit integer
    Minimum,
    /// `maximum`: base-10 32-bit integer
    Maximum,
}

impl DirectiveKind {
    /// Look up a directive token such as `@schemaEnum`
    pub fn from_token(token: &str) -> Option<Self> {
        DIRECTIVES.get(token).copied()
    }

    pub fn token(&self) -> &'static str {
        match self {
            DirectiveKind::Enum => "@schemaEnum",
            DirectiveKind::Regex => "@schemaRegex",
            DirectiveKind::Minimum => "@schemaMinimum",
            DirectiveKind::Maximum => "@schemaMaximum",
        }
    }

    fn apply(
        self,
        node: &mut SchemaNode,
        key: &str,
        value: &str,
    ) -> std::result::Result<(), DirectiveError> {
        match self {
            DirectiveKind::Enum => {
                node.set_enum_values(value.split(',').map(str::to_string).collect());
            }
            DirectiveKind::Regex => node.set_pattern(value),
            DirectiveKind::Minimum => node.set_minimum(parse_integer(key, value)?),
            DirectiveKind::Maximum => node.set_maximum(parse_integer(key, value)?),
        }
        Ok(())
    }
}

impl std::fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

fn parse_integer(key: &str, value: &str) -> std::result::Result<i64, DirectiveError> {
    value
        .parse::<i32>()
        .map(i64::from)
        .map_err(|source| DirectiveError::InvalidInteger {
            key: key.to_string(),
            value: value.to_string(),
            source,
        })
}

/// One parsed directive line, borrowing from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    /// Dotted key path of the target node
    pub key: &'a str,
    /// Raw payload, parsed according to `kind`
    pub value: &'a str,
}

impl<'a> Directive<'a> {
    /// Parse a single source line; `None` for anything that is not a directive
    pub fn parse(line: &'a str) -> Option<Self> {
        if !line.starts_with(DIRECTIVE_PREFIX) {
            return None;
        }

        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() < 4 {
            return None;
        }

        match DirectiveKind::from_token(fields[1]) {
            Some(kind) => Some(Self {
                kind,
                key: fields[2],
                value: fields[3],
            }),
            None => {
                tracing::trace!(token = fields[1], "ignoring comment without a known directive");
                None
            }
        }
    }

    /// Resolve the target node and apply the constraint in place
    pub fn apply(&self, schema: &mut SchemaNode) -> std::result::Result<(), DirectiveError> {
        let node = schema.walk_mut(self.key)?;
        self.kind.apply(node, self.key, self.value)?;
        tracing::debug!(directive = %self.kind, key = self.key, value = self.value, "applied directive");
        Ok(())
    }
}

/// Every directive in `source`, paired with its 1-based line number
pub fn directives(source: &str) -> impl Iterator<Item = (usize, Directive<'_>)> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, line)| Directive::parse(line).map(|d| (index + 1, d)))
}

/// Apply every directive in `source` to `schema`
///
/// All lines are processed before returning; if any directive fails, the
/// error lists each failure with its line number.
pub fn apply_directives(source: &str, schema: &mut SchemaNode) -> Result<usize> {
    let mut applied = 0;
    let mut failures = Vec::new();

    for (line, directive) in directives(source) {
        match directive.apply(schema) {
            Ok(()) => applied += 1,
            Err(error) => failures.push(AnnotationFailure { line, error }),
        }
    }

    if failures.is_empty() {
        Ok(applied)
    } else {
        Err(SchemaGenError::Annotations(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::infer::infer_document;
    use crate::schema::SchemaDocument;

    fn patched(yaml: &str) -> Result<SchemaDocument> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let mut doc = infer_document(&value).unwrap();
        apply_directives(yaml, &mut doc.root)?;
        Ok(doc)
    }

    #[test]
    fn test_parse_directive() {
        let d = Directive::parse("## @schemaEnum service.type ClusterIP,NodePort").unwrap();
        assert_eq!(d.kind, DirectiveKind::Enum);
        assert_eq!(d.key, "service.type");
        assert_eq!(d.value, "ClusterIP,NodePort");
    }

    #[test]
    fn test_parse_ignores_plain_comments() {
        assert!(Directive::parse("# @schemaEnum a x,y").is_none());
        assert!(Directive::parse("## not.enough").is_none());
        assert!(Directive::parse("## @schemaEnum a").is_none());
        assert!(Directive::parse("  ## @schemaEnum a x,y").is_none());
        assert!(Directive::parse("## This is the port number").is_none());
        assert!(Directive::parse("key: value").is_none());
        assert!(Directive::parse("").is_none());
    }

    #[test]
    fn test_parse_only_fourth_field_is_value() {
        let d = Directive::parse("## @schemaRegex name ^a b$").unwrap();
        assert_eq!(d.value, "^a");
    }

    #[test]
    fn test_parse_double_space_shifts_fields() {
        // Splitting is on single spaces, so the token lands in an empty field
        assert!(Directive::parse("##  @schemaEnum a x,y").is_none());
    }

    #[test]
    fn test_token_round_trip() {
        for kind in [
            DirectiveKind::Enum,
            DirectiveKind::Regex,
            DirectiveKind::Minimum,
            DirectiveKind::Maximum,
        ] {
            assert_eq!(DirectiveKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(DirectiveKind::from_token("@schemaenum"), None);
    }

    #[test]
    fn test_enum_directive() {
        let doc = patched("mode: a\n## @schemaEnum mode a,b,c\n").unwrap();
        let mode = doc.root.walk("mode").unwrap();
        assert_eq!(
            mode.enum_values().unwrap(),
            &["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn test_enum_keeps_fragments_verbatim() {
        let doc = patched("mode: a\n## @schemaEnum mode a,,a,b\n").unwrap();
        let mode = doc.root.walk("mode").unwrap();
        assert_eq!(mode.enum_values().unwrap(), &["a", "", "a", "b"]);
    }

    #[test]
    fn test_regex_directive() {
        let doc = patched("image:\n  tag: v1\n## @schemaRegex image.tag ^v[0-9]+$\n").unwrap();
        assert_eq!(doc.root.walk("image.tag").unwrap().pattern(), Some("^v[0-9]+$"));
    }

    #[test]
    fn test_minimum_and_maximum() {
        let doc = patched("port: 8080\n## @schemaMinimum port 1\n## @schemaMaximum port 65535\n")
            .unwrap();
        let port = doc.root.walk("port").unwrap();
        assert_eq!(port.minimum(), Some(1));
        assert_eq!(port.maximum(), Some(65535));
    }

    #[test]
    fn test_signed_bounds() {
        let doc = patched("offset: 0\n## @schemaMinimum offset -10\n## @schemaMaximum offset +10\n")
            .unwrap();
        let offset = doc.root.walk("offset").unwrap();
        assert_eq!(offset.minimum(), Some(-10));
        assert_eq!(offset.maximum(), Some(10));
    }

    #[test]
    fn test_later_directive_overrides() {
        let doc = patched("n: 1\n## @schemaMinimum n 1\n## @schemaMinimum n 2\n").unwrap();
        assert_eq!(doc.root.walk("n").unwrap().minimum(), Some(2));
    }

    #[test]
    fn test_invalid_integer_mentions_key() {
        let err = patched("replicas: 1\n## @schemaMinimum replicas abc\n").unwrap_err();
        let failures = err.annotation_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].line, 2);
        assert!(matches!(
            &failures[0].error,
            DirectiveError::InvalidInteger { key, value, .. } if key == "replicas" && value == "abc"
        ));
        assert!(err.to_string().contains("'replicas' must return an integer"));
    }

    #[test]
    fn test_integer_out_of_32_bit_range() {
        let err = patched("size: 1\n## @schemaMaximum size 4294967296\n").unwrap_err();
        assert!(matches!(
            err.annotation_failures()[0].error,
            DirectiveError::InvalidInteger { .. }
        ));
    }

    #[test]
    fn test_missing_path_fails() {
        let err = patched("a: 1\n## @schemaRegex missing.key ^x$\n").unwrap_err();
        assert_eq!(
            err.annotation_failures()[0].error,
            DirectiveError::Path(PathError::NotFound {
                path: "missing.key".to_string(),
                segment: "missing".to_string(),
            })
        );
    }

    #[test]
    fn test_failures_are_collected() {
        let yaml = "a: 1\n## @schemaMinimum a x\n## @schemaEnum b 1,2\n## @schemaMaximum a 5\n";
        let err = patched(yaml).unwrap_err();
        let lines: Vec<usize> = err.annotation_failures().iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn test_plain_comments_leave_schema_untouched() {
        let yaml = "# just a comment\n## not.enough\nport: 80\n## @schemaUnknown port x\n";
        let value: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        let original = infer_document(&value).unwrap();

        let mut doc = original.clone();
        assert_eq!(apply_directives(yaml, &mut doc.root).unwrap(), 0);
        assert_eq!(doc, original);
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = patched("mode: a\r\n## @schemaEnum mode a,b\r\n").unwrap();
        assert_eq!(doc.root.walk("mode").unwrap().enum_values().unwrap(), &["a", "b"]);
    }

    #[test]
    fn test_directives_iterator_line_numbers() {
        let yaml = "a: 1\n\n## @schemaMinimum a 0\n";
        let found: Vec<(usize, DirectiveKind)> =
            directives(yaml).map(|(line, d)| (line, d.kind)).collect();
        assert_eq!(found, vec![(3, DirectiveKind::Minimum)]);
    }
}
