use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid TOML syntax in module manifest '{file}'")]
#[diagnostic(
    code(modgraph::manifest_parse_error),
    help("Check the TOML syntax near the highlighted position")
)]
pub struct ManifestParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: toml::de::Error,
}

#[derive(Error, Debug, Diagnostic)]
#[error("Malformed style document '{name}'")]
#[diagnostic(
    code(modgraph::style_parse_error),
    help("The style document must be a JSON object whose sections are JSON objects")
)]
pub struct StyleParseError {
    pub name: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("invalid JSON here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum ModGraphError {
    #[error("Could not find module '{path}'. Available modules:\n{}", .available.join("\n"))]
    #[diagnostic(
        code(modgraph::module_not_found),
        help("Pick one of the listed module paths")
    )]
    ModuleNotFound {
        path: String,
        available: Vec<String>,
    },

    #[error("Invalid module path '{path}'. It must start with ':' (e.g. :app, :lib-core)")]
    #[diagnostic(
        code(modgraph::invalid_module_path),
        help("Module paths are ':'-separated and always start with ':'")
    )]
    InvalidModulePath { path: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    StyleParseError(Box<StyleParseError>),

    #[error("Invalid style document: {message}")]
    #[diagnostic(
        code(modgraph::invalid_style),
        help(
            "Use sections 'container', 'module', 'targetModule', 'link' and 'directLink', each \
             holding an object of attributes"
        )
    )]
    InvalidStyle { message: String },

    #[error("Unsupported output format '{format}'")]
    #[diagnostic(
        code(modgraph::unsupported_format),
        help("Supported formats are 'dot' (alias 'graphviz') and 'mermaid'")
    )]
    UnsupportedFormat { format: String },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(modgraph::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    ManifestParseError(Box<ManifestParseError>),

    #[error("String formatting error")]
    #[diagnostic(
        code(modgraph::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(modgraph::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(modgraph::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}
