//! End-to-end diagram generation for one or many target modules

use std::rc::Rc;

use tracing::{info, warn};

use crate::core::{CycleBreak, Module, normalize_id, validate_module_path};
use crate::error::ModGraphError;
use crate::graph::{ModuleResolver, PathTreeBuilder, dependency_paths};
use crate::lookup::ModuleLookup;
use crate::render::OutputFormat;
use crate::style::StyleDocument;

/// A rendered diagram for one target module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub module_path: String,
    pub format: OutputFormat,
    pub content: String,
    /// Edges left out of the diagram because they closed a cycle
    pub cycle_breaks: Vec<CycleBreak>,
}

impl Diagram {
    /// `<prefix><normalized module path>.<extension>`
    pub fn file_name(&self, prefix: &str) -> String {
        format!(
            "{prefix}{}.{}",
            normalize_id(&self.module_path),
            self.format.extension()
        )
    }

    /// What goes into the diagram's file. Mermaid is wrapped in a fenced
    /// block so Markdown viewers render it.
    pub fn file_contents(&self) -> String {
        match self.format {
            OutputFormat::Dot => self.content.clone(),
            OutputFormat::Mermaid => format!("```mermaid\n{}\n```\n", self.content),
        }
    }
}

/// Renders diagrams through a single [`ModuleResolver`], so every module is
/// resolved at most once per generator no matter how many targets share it.
pub struct GraphGenerator<L> {
    resolver: ModuleResolver<L>,
}

impl<L: ModuleLookup> GraphGenerator<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            resolver: ModuleResolver::new(lookup),
        }
    }

    pub fn lookup(&self) -> &L {
        self.resolver.lookup()
    }

    pub fn resolve(&mut self, target: &str) -> Result<Rc<Module>, ModGraphError> {
        validate_module_path(target)?;
        self.resolver.resolve(target)
    }

    pub fn generate(
        &mut self,
        target: &str,
        format: OutputFormat,
        style: Option<&StyleDocument>,
    ) -> Result<Diagram, ModGraphError> {
        let module = self.resolve(target)?;
        let cycle_breaks = self.resolver.cycle_breaks().to_vec();

        let tree = PathTreeBuilder::build(target, dependency_paths(&module));
        let content = format.render(&module, &tree, style)?;
        info!(module = target, %format, bytes = content.len(), "Rendered diagram");

        Ok(Diagram {
            module_path: target.to_string(),
            format,
            content,
            cycle_breaks,
        })
    }

    /// Render every target, one result per target in input order. A target
    /// that fails leaves the others untouched.
    pub fn generate_all<I, S>(
        &mut self,
        targets: I,
        format: OutputFormat,
        style: Option<&StyleDocument>,
    ) -> Vec<(String, Result<Diagram, ModGraphError>)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        targets
            .into_iter()
            .map(|target| {
                let target = target.as_ref();
                let result = self.generate(target, format, style);
                if let Err(e) = &result {
                    warn!(module = target, error = %e, "Failed to generate diagram");
                }
                (target.to_string(), result)
            })
            .collect()
    }
}
