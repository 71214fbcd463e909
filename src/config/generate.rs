//! Generate command configuration

use std::path::PathBuf;

use crate::common::ModuleSource;
use crate::error::ModGraphError;
use crate::render::OutputFormat;

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub source: ModuleSource,
    /// Explicit targets; empty means every known module
    pub modules: Vec<String>,
    pub filter: Option<String>,
    pub format: OutputFormat,
    pub style: Option<PathBuf>,
    pub output: PathBuf,
    pub prefix: String,
    pub stdout: bool,
    pub error_on_failure: bool,
}

impl GenerateConfig {
    pub fn builder() -> GenerateConfigBuilder {
        GenerateConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct GenerateConfigBuilder {
    source: Option<ModuleSource>,
    modules: Vec<String>,
    filter: Option<String>,
    format: Option<OutputFormat>,
    style: Option<PathBuf>,
    output: Option<PathBuf>,
    prefix: String,
    stdout: bool,
    error_on_failure: bool,
}

impl GenerateConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: ModuleSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_modules(mut self, modules: Vec<String>) -> Self {
        self.modules = modules;
        self
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_style(mut self, style: Option<PathBuf>) -> Self {
        self.style = style;
        self
    }

    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_stdout(mut self, stdout: bool) -> Self {
        self.stdout = stdout;
        self
    }

    pub fn with_error_on_failure(mut self, error_on_failure: bool) -> Self {
        self.error_on_failure = error_on_failure;
        self
    }
}

impl crate::common::ConfigBuilder for GenerateConfigBuilder {
    type Config = GenerateConfig;

    fn build(self) -> Result<Self::Config, ModGraphError> {
        Ok(GenerateConfig {
            source: self
                .source
                .ok_or_else(|| ModGraphError::ConfigurationError {
                    message: "Missing required field: source".to_string(),
                })?,
            modules: self.modules,
            filter: self.filter,
            format: self
                .format
                .ok_or_else(|| ModGraphError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                })?,
            style: self.style,
            output: self
                .output
                .ok_or_else(|| ModGraphError::ConfigurationError {
                    message: "Missing required field: output".to_string(),
                })?,
            prefix: self.prefix,
            stdout: self.stdout,
            error_on_failure: self.error_on_failure,
        })
    }
}
