//! Modules command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::ModulesConfig;
use crate::error::ModGraphError;

impl FromCommand for ModulesConfig {
    fn from_command(command: Commands) -> Result<Self, ModGraphError> {
        match command {
            Commands::Modules { source, filter } => ModulesConfig::builder()
                .with_source(source.module_source())
                .with_filter(filter)
                .build(),
            _ => Err(ModGraphError::ConfigurationError {
                message: "Invalid command type for ModulesConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(ModulesConfig);

/// Execute the modules command
pub fn execute_modules_command(command: Commands) -> Result<()> {
    let config = ModulesConfig::from_command(command)
        .wrap_err("Failed to parse modules command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::modules::ModulesExecutor;
    ModulesExecutor::execute(config)
}
