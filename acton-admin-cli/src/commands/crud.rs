//! CRUD scaffold command
//!
//! Creates everything an admin CRUD needs for one entity:
//! - Model class
//! - CRUD controller
//! - Form request (when validation uses a request class)
//! - Admin route and sidebar entry
//! - Route cache rebuild, when the application caches its routes
//!
//! # Example
//!
//! ```bash
//! acton-admin crud "blog post" --validation=array
//! ```

use crate::collaborators::{ProjectBackend, ScaffoldBackend};
use crate::config::AdminConfig;
use crate::error::ScaffoldError;
use crate::pipeline::{ScaffoldPipeline, ScaffoldReport};
use crate::report::ConsoleReporter;
use crate::validation::{Prompt, TerminalPrompt};
use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// The prompt needs a terminal on stdin and no `--no-interaction`
const fn prompt_enabled(no_interaction: bool, stdin_is_terminal: bool) -> bool {
    !no_interaction && stdin_is_terminal
}

/// CRUD scaffold command
pub struct CrudCommand {
    /// Entity name as typed (e.g. `BlogPost`, `"blog post"`)
    name: String,
    /// Validation strategy from `--validation`
    validation: Option<String>,
    /// Never prompt
    no_interaction: bool,
    /// Project root
    path: PathBuf,
    /// Explicit config file
    config: Option<PathBuf>,
}

impl CrudCommand {
    /// Create a new `CrudCommand`
    #[must_use]
    pub const fn new(
        name: String,
        validation: Option<String>,
        no_interaction: bool,
        path: PathBuf,
        config: Option<PathBuf>,
    ) -> Self {
        Self {
            name,
            validation,
            no_interaction,
            path,
            config,
        }
    }

    /// Whether the validation question may be asked
    fn interactive(&self) -> bool {
        prompt_enabled(self.no_interaction, io::stdin().is_terminal())
    }

    /// Execute the scaffold command against the project on disk
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration cannot be loaded
    /// - The name is empty or reserved
    /// - The validation strategy is invalid
    /// - Any generator or registrar fails
    pub fn execute(&self) -> Result<()> {
        let project_root = self
            .path
            .canonicalize()
            .with_context(|| format!("Project directory not found: {}", self.path.display()))?;

        let config = AdminConfig::load(&project_root, self.config.as_deref())
            .context("Failed to load configuration")?;
        tracing::debug!(root = %project_root.display(), ?config, "configuration loaded");

        let backend = ProjectBackend::new(&project_root, &config)
            .context("Failed to prepare project backend")?;

        let interactive = self.interactive();
        tracing::debug!(interactive, "prompt availability decided");

        let terminal = TerminalPrompt;
        let prompt: Option<&dyn Prompt> = if interactive {
            Some(&terminal)
        } else {
            None
        };

        let mut reporter = if interactive && console::user_attended() {
            ConsoleReporter::new()
        } else {
            ConsoleReporter::plain()
        };

        self.run(&backend, prompt, &config, &mut reporter)?;
        Ok(())
    }

    /// Run the pipeline with explicit collaborators and print the result
    ///
    /// # Errors
    ///
    /// Returns the pipeline error after printing it.
    pub fn run(
        &self,
        backend: &dyn ScaffoldBackend,
        prompt: Option<&dyn Prompt>,
        config: &AdminConfig,
        reporter: &mut ConsoleReporter,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let pipeline = ScaffoldPipeline::new(backend, prompt, config.scaffold_options());

        match pipeline.run(&self.name, self.validation.as_deref(), reporter) {
            Ok(report) => {
                reporter.finish(&report);
                Ok(report)
            }
            Err(err) => {
                reporter.fail(&err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn command(name: &str, validation: Option<&str>, path: PathBuf) -> CrudCommand {
        CrudCommand::new(
            name.to_string(),
            validation.map(str::to_string),
            true,
            path,
            None,
        )
    }

    #[test]
    fn test_prompt_requires_terminal_stdin() {
        assert!(prompt_enabled(false, true));
        assert!(!prompt_enabled(false, false));
        assert!(!prompt_enabled(true, true));
        assert!(!prompt_enabled(true, false));
    }

    #[test]
    fn test_no_interaction_disables_prompt() {
        let cmd = command("tag", None, PathBuf::from("."));
        assert!(!cmd.interactive());
    }

    #[test]
    fn test_execute_scaffolds_project() {
        let temp_dir = TempDir::new().unwrap();
        let routes = temp_dir.path().join("routes/backpack/custom.php");
        fs::create_dir_all(routes.parent().unwrap()).unwrap();
        fs::write(&routes, "<?php\n\nRoute::group([], function () {\n});\n").unwrap();

        command("blog post", Some("array"), temp_dir.path().to_path_buf())
            .execute()
            .unwrap();

        assert!(temp_dir.path().join("app/Models/BlogPost.php").exists());
        assert!(temp_dir
            .path()
            .join("app/Http/Controllers/Admin/BlogPostCrudController.php")
            .exists());
        assert!(!temp_dir.path().join("app/Http/Requests/BlogPostRequest.php").exists());
        assert!(fs::read_to_string(&routes)
            .unwrap()
            .contains("Route::crud('blog-post', 'BlogPostCrudController');"));
    }

    #[test]
    fn test_execute_without_flag_in_no_interaction_mode_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = command("blog post", None, temp_dir.path().to_path_buf()).execute();

        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::InvalidValidationStrategy { .. })
        ));
        assert!(!temp_dir.path().join("app").exists());
    }

    #[test]
    fn test_execute_rejects_reserved_name() {
        let temp_dir = TempDir::new().unwrap();
        let err = command("list", Some("array"), temp_dir.path().to_path_buf())
            .execute()
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ScaffoldError>(),
            Some(ScaffoldError::NameReserved { .. })
        ));
    }

    #[test]
    fn test_execute_with_missing_project_dir() {
        let temp_dir = TempDir::new().unwrap();
        let result = command("tag", Some("array"), temp_dir.path().join("missing")).execute();
        assert!(result.is_err());
    }
}
