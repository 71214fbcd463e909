//! Command implementations for the modgraph CLI
//!
//! This module contains the implementations for each CLI command:
//! - generate: Render one diagram per module
//! - modules: List the known modules and their direct dependencies

pub mod generate;
pub mod modules;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Generate { .. } => generate::execute_generate_command(command),
        Commands::Modules { .. } => modules::execute_modules_command(command),
    }
}
