use std::path::Path;

use console::{Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use crate::constants::progress::TICK_INTERVAL;

// Progress bar style templates as constants
const PROGRESS_BAR_TEMPLATE: &str = "{msg} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len}";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Terminal feedback for a generation run, written to stderr
pub struct ProgressReporter {
    term: Term,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            current_bar: None,
        }
    }

    fn create_progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(Some(len), self.draw_target());
        pb.set_style(
            ProgressStyle::default_bar()
                .template(PROGRESS_BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏ "),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::with_draw_target(None, self.draw_target());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    // Nothing is drawn when stderr is not a terminal
    fn draw_target(&self) -> ProgressDrawTarget {
        if self.term.is_term() {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        }
    }

    pub fn start_discovery(&mut self, source: &str) {
        eprintln!("{} Reading modules from {}...", style("🔍").cyan(), source);
        self.current_bar = Some(self.create_spinner("Collecting module declarations..."));
    }

    pub fn finish_discovery(&mut self, count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        if count == 0 {
            eprintln!("{} No modules found", style("✗").red());
        } else {
            eprintln!(
                "{} Found {} module{}",
                style("✓").green(),
                style(count).yellow().bold(),
                if count == 1 { "" } else { "s" }
            );
        }
    }

    pub fn start_generation(&mut self, total: usize, format: &str) {
        eprintln!(
            "{} Generating {} {} diagram{}...",
            style("📊").cyan(),
            total,
            format,
            if total == 1 { "" } else { "s" }
        );
        self.current_bar = Some(self.create_progress_bar(total as u64, "Rendering"));
    }

    pub fn update_generation(&self, module_path: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Rendering {module_path}"));
            pb.inc(1);
        }
    }

    /// Print a line without tearing the progress bar
    pub fn println(&self, line: String) {
        match &self.current_bar {
            Some(pb) if !pb.is_hidden() => pb.println(line),
            _ => eprintln!("{line}"),
        }
    }

    pub fn finish_generation(&mut self, written: usize, failed: usize, output: Option<&Path>) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }

        let destination = output
            .map(|dir| format!(" to {}", style(dir.display()).bold()))
            .unwrap_or_default();
        if failed == 0 {
            eprintln!(
                "{} Generated {} diagram{}{}",
                style("✓").green().bold(),
                style(written).yellow().bold(),
                if written == 1 { "" } else { "s" },
                destination
            );
        } else {
            eprintln!(
                "{} Generated {} diagram{}{}, {} failed",
                style("⚠").yellow().bold(),
                style(written).yellow().bold(),
                if written == 1 { "" } else { "s" },
                destination,
                style(failed).red().bold()
            );
        }
    }
}
