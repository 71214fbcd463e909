//! Generate command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GenerateConfig;
use crate::error::ModGraphError;

impl FromCommand for GenerateConfig {
    fn from_command(command: Commands) -> Result<Self, ModGraphError> {
        match command {
            Commands::Generate {
                source,
                modules,
                filter,
                format,
                style,
                output,
                prefix,
                stdout,
                error_on_failure,
            } => GenerateConfig::builder()
                .with_source(source.module_source())
                .with_modules(modules)
                .with_filter(filter)
                .with_format(format)
                .with_style(style)
                .with_output(output)
                .with_prefix(prefix)
                .with_stdout(stdout)
                .with_error_on_failure(error_on_failure)
                .build(),
            _ => Err(ModGraphError::ConfigurationError {
                message: "Invalid command type for GenerateConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GenerateConfig);

/// Execute the generate command
pub fn execute_generate_command(command: Commands) -> Result<()> {
    let config = GenerateConfig::from_command(command)
        .wrap_err("Failed to parse generate command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::generate::GenerateExecutor;
    GenerateExecutor::execute(config)
}
