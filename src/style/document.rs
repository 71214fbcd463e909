use std::collections::BTreeMap;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde_json::{Map, Value};
use tracing::debug;

use super::Section;
use crate::error::{ModGraphError, StyleParseError};

/// The recognized sections of a parsed style document.
///
/// Attributes keep the order in which they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDocument {
    sections: BTreeMap<Section, Map<String, Value>>,
}

impl StyleDocument {
    pub fn parse(text: &str, name: &str) -> Result<Self, ModGraphError> {
        let root: Value = serde_json::from_str(text).map_err(|e| {
            ModGraphError::StyleParseError(Box::new(StyleParseError {
                name: name.to_string(),
                source_code: NamedSource::new(name, text.to_string()),
                span: error_span(text, e.line(), e.column()),
                source: e,
            }))
        })?;

        let Value::Object(root) = root else {
            return Err(ModGraphError::InvalidStyle {
                message: format!("'{name}' must contain a JSON object"),
            });
        };

        let mut sections = BTreeMap::new();
        for (key, value) in root {
            let Some(section) = Section::from_key(&key) else {
                debug!(section = %key, "Ignoring unrecognized style section");
                continue;
            };

            match value {
                Value::Object(attributes) => {
                    sections.insert(section, attributes);
                }
                other => {
                    return Err(ModGraphError::InvalidStyle {
                        message: format!(
                            "section '{section}' must be an object, found {}",
                            json_kind(&other)
                        ),
                    });
                }
            }
        }

        Ok(Self { sections })
    }

    pub fn from_file(path: &Path) -> Result<Self, ModGraphError> {
        let text = std::fs::read_to_string(path).map_err(|e| ModGraphError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&text, &path.display().to_string())
    }

    /// Attributes of `section`, if the document has it
    pub fn section(&self, section: Section) -> Option<&Map<String, Value>> {
        self.sections.get(&section)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Byte offset of a 1-based line and column reported by serde_json
fn error_span(text: &str, line: usize, column: usize) -> Option<SourceSpan> {
    if line == 0 {
        return None;
    }

    let line_start: usize = text.split_inclusive('\n').take(line - 1).map(str::len).sum();
    let offset = (line_start + column.saturating_sub(1)).min(text.len());
    Some((offset, 0).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_recognized_sections_only() {
        let document = StyleDocument::parse(
            r#"{"module": {"color": "red"}, "legend": {"show": true}}"#,
            "style.json",
        )
        .unwrap();

        assert!(document.section(Section::Module).is_some());
        assert!(document.section(Section::Container).is_none());
        assert!(!document.is_empty());
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let document = StyleDocument::parse(
            r#"{"container": {"zeta": 1, "alpha": 2, "mid": 3}}"#,
            "style.json",
        )
        .unwrap();

        let keys: Vec<_> = document
            .section(Section::Container)
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_malformed_json() {
        let result = StyleDocument::parse("{\n  \"module\": {\n    \"color\": \n}", "style.json");

        match result {
            Err(ModGraphError::StyleParseError(error)) => {
                assert_eq!(error.name, "style.json");
                assert!(error.span.is_some());
            }
            other => panic!("Expected StyleParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_document() {
        let result = StyleDocument::parse("[1, 2]", "style.json");
        assert!(matches!(result, Err(ModGraphError::InvalidStyle { .. })));
    }

    #[test]
    fn test_non_object_section() {
        let result = StyleDocument::parse(r#"{"link": "red"}"#, "style.json");

        match result {
            Err(ModGraphError::InvalidStyle { message }) => {
                assert_eq!(message, "section 'link' must be an object, found a string");
            }
            other => panic!("Expected InvalidStyle, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_unknown_section_is_ignored() {
        let document = StyleDocument::parse(r#"{"version": 2}"#, "style.json").unwrap();
        assert!(document.is_empty());
    }

    #[test]
    fn test_error_span_offsets() {
        let text = "ab\ncd\nef";
        assert_eq!(error_span(text, 2, 2), Some((4, 0).into()));
        assert_eq!(error_span(text, 0, 0), None);
        assert_eq!(error_span(text, 9, 9), Some((8, 0).into()));
    }
}
