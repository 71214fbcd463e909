//! Hierarchical module path helpers

use crate::constants::path::{HYPHEN_ID, SEPARATOR, SEPARATOR_ID};
use crate::error::ModGraphError;

/// Check that `path` starts with the separator and names at least one segment
pub fn validate_module_path(path: &str) -> Result<(), ModGraphError> {
    let valid = path.starts_with(SEPARATOR) && segments(path).next().is_some();
    if valid {
        Ok(())
    } else {
        Err(ModGraphError::InvalidModulePath {
            path: path.to_string(),
        })
    }
}

/// Turn a module path into an identifier that is safe in both DOT and
/// Mermaid: `:core:data-api` becomes `core__data___api`.
pub fn normalize_id(path: &str) -> String {
    path.strip_prefix(SEPARATOR)
        .unwrap_or(path)
        .replace(SEPARATOR, SEPARATOR_ID)
        .replace('-', HYPHEN_ID)
}

/// Non-empty segments of a module path, in order
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATOR).filter(|segment| !segment.is_empty())
}

/// Last segment of a module path
pub fn short_name(path: &str) -> &str {
    segments(path).last().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id(":app"), "app");
        assert_eq!(normalize_id(":core:data"), "core__data");
        assert_eq!(normalize_id(":core:data-api"), "core__data___api");
        assert_eq!(normalize_id(":lib-core"), "lib___core");
    }

    #[test]
    fn test_normalize_id_strips_only_one_leading_separator() {
        assert_eq!(normalize_id("core:data"), "core__data");
        assert_eq!(normalize_id("::core"), "__core");
    }

    #[test]
    fn test_segments_skip_leading_separator() {
        let parts: Vec<&str> = segments(":core:data").collect();
        assert_eq!(parts, vec!["core", "data"]);
    }

    #[test]
    fn test_short_name() {
        assert_eq!(short_name(":core:data"), "data");
        assert_eq!(short_name(":app"), "app");
    }

    #[test]
    fn test_validate_module_path() {
        assert!(validate_module_path(":app").is_ok());
        assert!(validate_module_path(":core:data").is_ok());

        for invalid in ["app", "", ":", "core:data"] {
            match validate_module_path(invalid) {
                Err(ModGraphError::InvalidModulePath { path }) => assert_eq!(path, invalid),
                other => panic!("Expected InvalidModulePath for '{invalid}', got {other:?}"),
            }
        }
    }
}
