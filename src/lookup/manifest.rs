//! TOML manifest of module declarations
//!
//! ```toml
//! [modules]
//! ":app" = [":core:data", ":core:model"]
//! ":core:data" = [":core:model"]
//! ":core:model" = []
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde::Deserialize;

use super::ModuleLookup;
use crate::core::validate_module_path;
use crate::error::{ManifestParseError, ModGraphError};

#[derive(Debug, Clone, Deserialize)]
struct ManifestFile {
    #[serde(default)]
    modules: BTreeMap<String, Vec<String>>,
}

/// Module declarations read from a TOML manifest
#[derive(Debug, Clone)]
pub struct ManifestLookup {
    modules: BTreeMap<String, Vec<String>>,
}

impl ManifestLookup {
    pub fn parse_file(path: &Path) -> Result<Self, ModGraphError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ModGraphError::FileReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

        Self::parse_str(&content, &path.display().to_string())
    }

    /// Parse manifest `content`; `name` identifies it in diagnostics
    pub fn parse_str(content: &str, name: &str) -> Result<Self, ModGraphError> {
        let manifest: ManifestFile = toml::from_str(content).map_err(|e| {
            let span = e
                .span()
                .map(|span| SourceSpan::new(span.start.into(), span.end - span.start));

            ModGraphError::ManifestParseError(Box::new(ManifestParseError {
                file: name.to_string(),
                source_code: NamedSource::new(name, content.to_string()),
                span,
                source: e,
            }))
        })?;

        for (path, dependencies) in &manifest.modules {
            validate_module_path(path)?;
            for dependency in dependencies {
                validate_module_path(dependency)?;
            }
        }

        Ok(Self {
            modules: manifest.modules,
        })
    }
}

impl ModuleLookup for ManifestLookup {
    fn module_paths(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    fn direct_dependencies(&self, path: &str) -> Option<Vec<String>> {
        self.modules.get(path).cloned()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const MANIFEST: &str = r#"
[modules]
":app" = [":core:data", ":core:model"]
":core:data" = [":core:model"]
":core:model" = []
"#;

    #[test]
    fn test_parse_manifest() {
        let lookup = ManifestLookup::parse_str(MANIFEST, "modules.toml").unwrap();

        assert_eq!(
            lookup.module_paths(),
            vec![":app", ":core:data", ":core:model"]
        );
        assert_eq!(
            lookup.direct_dependencies(":app"),
            Some(vec![":core:data".to_string(), ":core:model".to_string()])
        );
        assert_eq!(lookup.direct_dependencies(":core:model"), Some(vec![]));
        assert_eq!(lookup.direct_dependencies(":missing"), None);
    }

    #[test]
    fn test_parse_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MANIFEST.as_bytes()).unwrap();

        let lookup = ManifestLookup::parse_file(file.path()).unwrap();
        assert_eq!(lookup.module_paths().len(), 3);
    }

    #[test]
    fn test_missing_file() {
        let result = ManifestLookup::parse_file(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(ModGraphError::FileReadError { .. })));
    }

    #[test]
    fn test_syntax_error_carries_span() {
        let result = ManifestLookup::parse_str("[modules\n\":app\" = []", "broken.toml");

        match result {
            Err(ModGraphError::ManifestParseError(error)) => {
                assert_eq!(error.file, "broken.toml");
                assert!(error.span.is_some());
            }
            other => panic!("Expected ManifestParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_paths_without_separator() {
        let result = ManifestLookup::parse_str("[modules]\napp = []", "modules.toml");
        assert!(matches!(
            result,
            Err(ModGraphError::InvalidModulePath { path }) if path == "app"
        ));
    }
}
