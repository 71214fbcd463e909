//! # Diagram Styling
//!
//! A style document is a JSON object with up to five recognized sections,
//! each an object of attributes:
//!
//! ```json
//! {
//!     "container": { "color": "lightgrey", "style": "dashed" },
//!     "module": { "shape": "rect", "fillcolor": "lightblue" },
//!     "targetModule": { "color": "red" },
//!     "link": { "arrowhead": "vee" },
//!     "directLink": { "color": "red" }
//! }
//! ```
//!
//! Any other top-level key is ignored. A parsed [`StyleDocument`] is turned
//! into a renderer-specific [`StyleMap`] of pre-formatted attribute strings
//! right before rendering.

mod document;
mod map;

pub use document::StyleDocument;
pub use map::StyleMap;

/// A recognized section of a style document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Container,
    Module,
    TargetModule,
    Link,
    DirectLink,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Container,
        Section::Module,
        Section::TargetModule,
        Section::Link,
        Section::DirectLink,
    ];

    /// Key of the section in a style document
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Container => "container",
            Section::Module => "module",
            Section::TargetModule => "targetModule",
            Section::Link => "link",
            Section::DirectLink => "directLink",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == key)
    }

    /// Attribute that Mermaid consumes on its own instead of as part of the
    /// section's attribute list
    pub fn special_key(self) -> Option<&'static str> {
        match self {
            Section::Container => None,
            Section::Module | Section::TargetModule => Some("shape"),
            Section::Link | Section::DirectLink => Some("arrow"),
        }
    }

    /// Graphviz statement receiving this section as default attributes
    pub fn dot_keyword(self) -> Option<&'static str> {
        match self {
            Section::Container => Some("graph"),
            Section::Module => Some("node"),
            Section::Link => Some("edge"),
            Section::TargetModule | Section::DirectLink => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
