//! Console output for scaffold runs

use crate::collaborators::Outcome;
use crate::naming::EntityNames;
use crate::pipeline::{PipelineObserver, ScaffoldReport, Step};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Admin URL of a CRUD
///
/// The base URL always ends in exactly one slash before the route prefix.
///
/// ```
/// # use acton_admin_cli_lib::report::admin_url;
/// assert_eq!(admin_url("http://localhost", "admin", "blog-post"), "http://localhost/admin/blog-post");
/// assert_eq!(admin_url("http://localhost/", "admin", "blog-post"), "http://localhost/admin/blog-post");
/// ```
#[must_use]
pub fn admin_url(base_url: &str, route_prefix: &str, kebab: &str) -> String {
    let mut url = format!("{}/", base_url.trim_end_matches('/'));
    let prefix = route_prefix.trim_matches('/');
    if !prefix.is_empty() {
        url.push_str(prefix);
        url.push('/');
    }
    url.push_str(kebab);
    url
}

/// Completion line shown after a successful run
#[must_use]
pub fn completion_message(url: &str) -> String {
    format!("Done! Go to {url} to see the CRUD in action.")
}

/// Prints progress while the pipeline runs
pub struct ConsoleReporter {
    spinner: ProgressBar,
}

impl ConsoleReporter {
    /// Create a reporter with a steady spinner
    #[must_use]
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(spinner_style);
        }
        Self { spinner }
    }

    /// Reporter that prints lines without a spinner
    #[must_use]
    pub fn plain() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
        }
    }

    fn line(&self, message: &str) {
        if self.spinner.is_hidden() {
            println!("{message}");
        } else {
            self.spinner.println(message);
        }
    }

    /// Print the completion summary
    pub fn finish(&self, report: &ScaffoldReport) {
        self.spinner.finish_and_clear();
        println!();
        println!(
            "  {}",
            completion_message(&style(&report.url).blue().to_string())
        );
        println!();
    }

    /// Print an error block
    pub fn fail(&self, message: &str) {
        self.spinner.finish_and_clear();
        eprintln!();
        eprintln!("  {} {}", style("ERROR").white().on_red().bold(), style(message).red());
        eprintln!();
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for ConsoleReporter {
    fn entity_resolved(&mut self, names: &EntityNames) {
        self.line(&format!(
            "\n{} {} {}",
            style("Creating CRUD for the").cyan().bold(),
            style(names.title()).blue().bold(),
            style("model:").cyan().bold()
        ));
    }

    fn step_started(&mut self, step: Step) {
        if !self.spinner.is_hidden() {
            self.spinner.enable_steady_tick(Duration::from_millis(100));
        }
        self.spinner.set_message(format!("{step}..."));
    }

    fn step_finished(&mut self, step: Step, outcome: &Outcome) {
        let line = match outcome {
            Outcome::Created(path) => format!(
                "  {} {} ({})",
                style("✓").green(),
                style(path.display()).dim(),
                style(step).dim()
            ),
            Outcome::Updated(path) => format!(
                "  {} {} ({})",
                style("Updated").yellow().bold(),
                style(path.display()).dim(),
                style(step).dim()
            ),
            Outcome::Skipped { path, reason } => format!(
                "  {} {} ({reason})",
                style("Skipped").yellow().bold(),
                style(path.display()).dim()
            ),
            Outcome::Ran(command) => format!(
                "  {} {}",
                style("✓").green(),
                style(command).dim()
            ),
        };
        self.line(&line);
    }
}
