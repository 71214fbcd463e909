//! Modules command executor

use std::io::{self, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::common::{compile_filter, select_modules};
use crate::config::ModulesConfig;
use crate::executors::CommandExecutor;
use crate::lookup::ModuleLookup;

pub struct ModulesExecutor;

impl CommandExecutor for ModulesExecutor {
    type Config = ModulesConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let filter = compile_filter(config.filter.as_deref())?;
        let lookup = config
            .source
            .open()
            .wrap_err("Failed to read module declarations")?;

        let modules = select_modules(lookup.module_paths(), filter.as_ref());
        if modules.is_empty() {
            eprintln!("{} No modules found", style("ℹ").blue());
            return Ok(());
        }

        let mut stdout = io::stdout().lock();
        for module in &modules {
            writeln!(stdout, "{module}").into_diagnostic()?;
            for dependency in lookup.direct_dependencies(module).unwrap_or_default() {
                writeln!(stdout, "  └── {dependency}").into_diagnostic()?;
            }
        }

        eprintln!(
            "{} Listed {} module{}",
            style("✓").green(),
            style(modules.len()).yellow().bold(),
            if modules.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }
}
