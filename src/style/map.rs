use std::collections::HashMap;

use serde_json::{Map, Value};

use super::{Section, StyleDocument};

/// Pre-formatted attribute strings for one render call.
///
/// Entries are keyed by section name (`module`, `directLink`, ...) or, for
/// attributes pulled out of a section, by `section_subkey`
/// (`module_shape`, `link_arrow`). Every lookup is optional.
///
/// A section present in the document keeps its entry even when no attribute
/// is left for it, so renderers still emit its (empty) declaration. Mermaid
/// skips sections that are empty objects altogether.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: HashMap<String, String>,
}

/// A section's attributes with its special sub-key taken out
struct SplitSection<'a> {
    special: Option<&'a Value>,
    attributes: Vec<(&'a str, &'a Value)>,
}

fn split_special(section: Section, attributes: &Map<String, Value>) -> SplitSection<'_> {
    let special_key = section.special_key();
    let mut split = SplitSection {
        special: None,
        attributes: Vec::with_capacity(attributes.len()),
    };

    for (key, value) in attributes {
        if Some(key.as_str()) == special_key {
            split.special = Some(value);
        } else {
            split.attributes.push((key.as_str(), value));
        }
    }

    split
}

impl StyleMap {
    /// Graphviz attribute lists: `key=value` pairs joined by `, `, with
    /// numbers and booleans bare and everything else double-quoted
    pub fn for_dot(document: Option<&StyleDocument>) -> Self {
        let mut map = Self::default();
        let Some(document) = document else {
            return map;
        };

        for section in Section::ALL {
            let Some(attributes) = document.section(section) else {
                continue;
            };

            let formatted = attributes
                .iter()
                .map(|(key, value)| format!("{key}={}", dot_value(value)))
                .collect::<Vec<_>>()
                .join(", ");
            map.insert(section.as_str(), formatted);
        }

        map
    }

    /// Mermaid style lists: raw `key:value` pairs joined by `,`, with the
    /// `shape` and `arrow` sub-keys stored on their own
    pub fn for_mermaid(document: Option<&StyleDocument>) -> Self {
        let mut map = Self::default();
        let Some(document) = document else {
            return map;
        };

        for section in Section::ALL {
            let Some(attributes) = document.section(section) else {
                continue;
            };

            if attributes.is_empty() {
                continue;
            }

            let split = split_special(section, attributes);
            if let (Some(key), Some(value)) = (section.special_key(), split.special) {
                map.insert(&format!("{section}_{key}"), raw_value(value));
            }

            let formatted = split
                .attributes
                .iter()
                .map(|(key, value)| format!("{key}:{}", raw_value(value)))
                .collect::<Vec<_>>()
                .join(",");
            map.insert(section.as_str(), formatted);
        }

        map
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn section(&self, section: Section) -> Option<&str> {
        self.get(section.as_str())
    }

    /// The extracted special sub-key of `section`, if any
    pub fn special(&self, section: Section) -> Option<&str> {
        let key = section.special_key()?;
        self.get(&format!("{section}_{key}"))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }
}

fn dot_value(value: &Value) -> String {
    match value {
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::String(text) => format!("\"{}\"", text.replace('"', "\\\"")),
        other => format!("\"{}\"", other.to_string().replace('"', "\\\"")),
    }
}

fn raw_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn document(text: &str) -> StyleDocument {
        StyleDocument::parse(text, "style.json").unwrap()
    }

    #[test]
    fn test_no_document_gives_empty_map() {
        assert!(StyleMap::for_dot(None).is_empty());
        assert!(StyleMap::for_mermaid(None).is_empty());
    }

    #[test]
    fn test_dot_quoting() {
        let style = document(
            r#"{
                "module": {"style": "filled", "penwidth": 2, "fixedsize": false},
                "directLink": {"label": "say \"hi\""}
            }"#,
        );

        let map = StyleMap::for_dot(Some(&style));

        assert_eq!(
            map.section(Section::Module),
            Some(r#"style="filled", penwidth=2, fixedsize=false"#)
        );
        assert_eq!(
            map.section(Section::DirectLink),
            Some(r#"label="say \"hi\"""#)
        );
        assert_eq!(map.section(Section::Container), None);
    }

    #[test]
    fn test_dot_keeps_special_keys_inline() {
        let style = document(r#"{"module": {"shape": "box"}}"#);

        let map = StyleMap::for_dot(Some(&style));

        assert_eq!(map.section(Section::Module), Some(r#"shape="box""#));
        assert_eq!(map.special(Section::Module), None);
    }

    #[test]
    fn test_mermaid_extracts_special_keys() {
        let style = document(
            r##"{
                "module": {"fill": "#E3F2FD", "shape": "rounded", "stroke-width": 2},
                "targetModule": {"shape": "stadium"},
                "link": {"stroke": "#64B5F6", "arrow": "-.->"},
                "container": {"shape": "ignored", "fill": "none"}
            }"##,
        );

        let map = StyleMap::for_mermaid(Some(&style));

        assert_eq!(map.section(Section::Module), Some("fill:#E3F2FD,stroke-width:2"));
        assert_eq!(map.get("module_shape"), Some("rounded"));
        assert_eq!(map.special(Section::TargetModule), Some("stadium"));
        assert_eq!(map.section(Section::TargetModule), Some(""));
        assert_eq!(map.section(Section::Link), Some("stroke:#64B5F6"));
        assert_eq!(map.get("link_arrow"), Some("-.->"));
        assert_eq!(
            map.section(Section::Container),
            Some("shape:ignored,fill:none")
        );
    }

    #[test]
    fn test_empty_sections() {
        let style = document(r#"{"link": {}, "module": {}, "directLink": {"arrow": "==>"}}"#);

        let dot = StyleMap::for_dot(Some(&style));
        assert_eq!(dot.section(Section::Link), Some(""));
        assert_eq!(dot.section(Section::Module), Some(""));
        assert_eq!(dot.section(Section::DirectLink), Some(r#"arrow="==>""#));

        let mermaid = StyleMap::for_mermaid(Some(&style));
        assert_eq!(mermaid.section(Section::Link), None);
        assert_eq!(mermaid.section(Section::Module), None);
        assert_eq!(mermaid.section(Section::DirectLink), Some(""));
        assert_eq!(mermaid.special(Section::DirectLink), Some("==>"));

        let only_empty = document(r#"{"link": {}}"#);
        assert!(StyleMap::for_mermaid(Some(&only_empty)).is_empty());
        assert!(!StyleMap::for_dot(Some(&only_empty)).is_empty());
    }
}
