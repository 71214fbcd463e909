//! Generate command executor

use std::fs;
use std::io::{self, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};
use tracing::debug;

use crate::common::{compile_filter, select_modules};
use crate::config::GenerateConfig;
use crate::executors::CommandExecutor;
use crate::generator::{Diagram, GraphGenerator};
use crate::lookup::ModuleLookup;
use crate::progress::ProgressReporter;
use crate::style::StyleDocument;

pub struct GenerateExecutor;

impl CommandExecutor for GenerateExecutor {
    type Config = GenerateConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let filter = compile_filter(config.filter.as_deref())?;
        let style_document = config
            .style
            .as_deref()
            .map(StyleDocument::from_file)
            .transpose()
            .wrap_err("Failed to load style document")?;

        let mut progress = ProgressReporter::new();
        progress.start_discovery(&config.source.describe());
        let lookup = config
            .source
            .open()
            .wrap_err("Failed to read module declarations")?;
        progress.finish_discovery(lookup.module_paths().len());

        let requested = if config.modules.is_empty() {
            lookup.module_paths()
        } else {
            config.modules.clone()
        };
        let targets = select_modules(requested, filter.as_ref());

        if targets.is_empty() {
            eprintln!("{} No modules to render", style("ℹ").blue());
            return Ok(());
        }

        if !config.stdout {
            fs::create_dir_all(&config.output)
                .into_diagnostic()
                .wrap_err_with(|| {
                    format!(
                        "Failed to create output directory '{}'",
                        config.output.display()
                    )
                })?;
        }

        let mut generator = GraphGenerator::new(lookup);
        let mut written = 0;
        let mut failures = Vec::new();

        progress.start_generation(targets.len(), config.format.as_str());
        for target in &targets {
            progress.update_generation(target);

            let diagram = match generator.generate(target, config.format, style_document.as_ref()) {
                Ok(diagram) => diagram,
                Err(e) => {
                    progress.println(format!(
                        "{} Failed to generate {}: {}",
                        style("✗").red(),
                        style(target).bold(),
                        e
                    ));
                    failures.push(target.clone());
                    continue;
                }
            };

            for cycle_break in &diagram.cycle_breaks {
                progress.println(format!(
                    "{} Dependency cycle in {}: edge {} left out",
                    style("⚠").yellow(),
                    style(target).bold(),
                    cycle_break
                ));
            }

            if let Err(e) = emit(&config, &diagram) {
                progress.println(format!(
                    "{} {}: {}",
                    style("✗").red(),
                    style(target).bold(),
                    e
                ));
                failures.push(target.clone());
                continue;
            }
            written += 1;
        }

        let output = (!config.stdout).then_some(config.output.as_path());
        progress.finish_generation(written, failures.len(), output);

        if config.error_on_failure && !failures.is_empty() {
            return Err(miette::miette!(
                code = "modgraph::generation_failed",
                help = "Run with MODGRAPH_LOG=debug for details on each module",
                "Failed to generate {} diagram{}: {}",
                failures.len(),
                if failures.len() == 1 { "" } else { "s" },
                failures.join(", ")
            ));
        }

        Ok(())
    }
}

fn emit(config: &GenerateConfig, diagram: &Diagram) -> Result<()> {
    if config.stdout {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", diagram.content).into_diagnostic()?;
        return Ok(());
    }

    let path = config.output.join(diagram.file_name(&config.prefix));
    fs::write(&path, diagram.file_contents())
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to write diagram '{}'", path.display()))?;
    debug!(module = %diagram.module_path, path = %path.display(), "Wrote diagram");
    Ok(())
}
