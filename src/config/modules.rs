//! Modules command configuration

use crate::common::ModuleSource;
use crate::error::ModGraphError;

#[derive(Debug, Clone)]
pub struct ModulesConfig {
    pub source: ModuleSource,
    pub filter: Option<String>,
}

impl ModulesConfig {
    pub fn builder() -> ModulesConfigBuilder {
        ModulesConfigBuilder::default()
    }
}

#[derive(Default)]
pub struct ModulesConfigBuilder {
    source: Option<ModuleSource>,
    filter: Option<String>,
}

impl ModulesConfigBuilder {
    pub fn with_source(mut self, source: ModuleSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }
}

impl crate::common::ConfigBuilder for ModulesConfigBuilder {
    type Config = ModulesConfig;

    fn build(self) -> Result<Self::Config, ModGraphError> {
        Ok(ModulesConfig {
            source: self
                .source
                .ok_or_else(|| ModGraphError::ConfigurationError {
                    message: "Missing required field: source".to_string(),
                })?,
            filter: self.filter,
        })
    }
}
