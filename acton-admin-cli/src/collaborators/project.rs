//! Collaborators backed by the target project on disk
//!
//! Generators render new class files and never overwrite existing ones.
//! Registrars edit the route file and the sidebar partial in place and skip
//! code that is already present, so re-running a scaffold is harmless.

use super::{
    ControllerGenerator, ModelGenerator, Outcome, RequestGenerator, RouteCache, RouteRegistrar,
    SidebarRegistrar,
};
use crate::config::{AdminConfig, PathSettings, RouteCacheSettings};
use crate::naming::EntityNames;
use crate::templates::{CONTROLLER_TEMPLATE, MODEL_TEMPLATE, REQUEST_TEMPLATE};
use crate::validation::ValidationStrategy;
use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// File-system implementation of every collaborator
pub struct ProjectBackend {
    root: PathBuf,
    paths: PathSettings,
    route_cache: RouteCacheSettings,
    handlebars: Handlebars<'static>,
}

impl ProjectBackend {
    /// Create a backend for the project at `root`
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new(root: impl Into<PathBuf>, config: &AdminConfig) -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Disable HTML escaping since we're generating code
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.set_strict_mode(true);

        handlebars
            .register_template_string("model", MODEL_TEMPLATE)
            .context("Failed to parse model template")?;
        handlebars
            .register_template_string("controller", CONTROLLER_TEMPLATE)
            .context("Failed to parse controller template")?;
        handlebars
            .register_template_string("request", REQUEST_TEMPLATE)
            .context("Failed to parse request template")?;

        Ok(Self {
            root: root.into(),
            paths: config.paths.clone(),
            route_cache: config.route_cache.clone(),
            handlebars,
        })
    }

    /// Project root every path is resolved against
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Render `template` into `relative` unless the file already exists
    fn render_new_file(
        &self,
        template: &str,
        relative: PathBuf,
        context: &serde_json::Value,
    ) -> Result<Outcome> {
        let full_path = self.root.join(&relative);
        if full_path.exists() {
            tracing::info!(path = %full_path.display(), "file exists, not overwriting");
            return Ok(Outcome::Skipped {
                path: relative,
                reason: "already exists".to_string(),
            });
        }

        let content = self
            .handlebars
            .render(template, context)
            .with_context(|| format!("Failed to render {template} template"))?;

        // Create parent directories if they don't exist
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&full_path, content)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        Ok(Outcome::Created(relative))
    }
}

impl ModelGenerator for ProjectBackend {
    fn generate_model(&self, name: &str) -> Result<Outcome> {
        let names = EntityNames::from_title(name);
        let context = json!({
            "name": name,
            "table": names.table(),
        });
        let path = self.paths.models.join(format!("{name}.php"));
        self.render_new_file("model", path, &context)
    }
}

impl ControllerGenerator for ProjectBackend {
    fn generate_controller(&self, name: &str, validation: ValidationStrategy) -> Result<Outcome> {
        let names = EntityNames::from_title(name);

        let (request_import, validation_rules, field_rules) = match validation {
            ValidationStrategy::Request => (
                format!("use App\\Http\\Requests\\{};\n", names.request_class()),
                format!("        CRUD::setValidation({}::class);\n", names.request_class()),
                String::new(),
            ),
            ValidationStrategy::Array => (
                String::new(),
                "        CRUD::setValidation([\n            // 'name' => 'required|min:2',\n        ]);\n"
                    .to_string(),
                String::new(),
            ),
            ValidationStrategy::Field => (
                String::new(),
                String::new(),
                "        // CRUD::field('name')->validationRules('required|min:2');\n".to_string(),
            ),
        };

        let context = json!({
            "name": name,
            "model_class": format!("\\App\\Models\\{name}"),
            "kebab": names.kebab(),
            "singular_label": names.singular_label(),
            "plural_label": names.plural_label(),
            "request_import": request_import,
            "validation_rules": validation_rules,
            "field_rules": field_rules,
        });
        let path = self.paths.controllers.join(format!("{}.php", names.controller_class()));
        self.render_new_file("controller", path, &context)
    }
}

impl RequestGenerator for ProjectBackend {
    fn generate_request(&self, name: &str) -> Result<Outcome> {
        let context = json!({ "name": name });
        let path = self.paths.requests.join(format!("{name}Request.php"));
        self.render_new_file("request", path, &context)
    }
}

impl RouteRegistrar for ProjectBackend {
    fn register_route(&self, code: &str) -> Result<Outcome> {
        let relative = self.paths.routes.clone();
        let full_path = self.root.join(&relative);

        let existing = fs::read_to_string(&full_path)
            .with_context(|| format!("Failed to read route file: {}", full_path.display()))?;

        if existing.contains(code) {
            return Ok(Outcome::Skipped {
                path: relative,
                reason: "route already registered".to_string(),
            });
        }

        fs::write(&full_path, insert_route(&existing, code))
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        Ok(Outcome::Updated(relative))
    }
}

impl SidebarRegistrar for ProjectBackend {
    fn register_sidebar(&self, code: &str) -> Result<Outcome> {
        let relative = self.paths.sidebar.clone();
        let full_path = self.root.join(&relative);

        let existed = full_path.exists();
        let mut contents = if existed {
            fs::read_to_string(&full_path)
                .with_context(|| format!("Failed to read sidebar: {}", full_path.display()))?
        } else {
            String::new()
        };

        let eol = line_ending(&contents);
        if contents.contains(&code.replace('\n', eol)) {
            return Ok(Outcome::Skipped {
                path: relative,
                reason: "sidebar item already present".to_string(),
            });
        }

        append_lines(&mut contents, code, eol);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&full_path, contents)
            .with_context(|| format!("Failed to write file: {}", full_path.display()))?;

        Ok(if existed {
            Outcome::Updated(relative)
        } else {
            Outcome::Created(relative)
        })
    }
}

impl RouteCache for ProjectBackend {
    fn is_cached(&self) -> Result<bool> {
        Ok(self.root.join(&self.route_cache.manifest).exists())
    }

    fn rebuild(&self) -> Result<Outcome> {
        let (program, args) = self
            .route_cache
            .rebuild_command
            .split_first()
            .context("Route cache rebuild command is empty")?;
        let command_line = self.route_cache.rebuild_command.join(" ");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.root)
            .output()
            .with_context(|| format!("Failed to run `{command_line}`"))?;

        if !output.status.success() {
            anyhow::bail!(
                "`{command_line}` exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        Ok(Outcome::Ran(command_line))
    }
}

/// Line terminator used by `contents`, `\n` for new or single-line files
fn line_ending(contents: &str) -> &'static str {
    if contents.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Append `code` as its own line(s), keeping the file's line terminator
fn append_lines(contents: &mut String, code: &str, eol: &str) {
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push_str(eol);
    }
    contents.push_str(&code.replace('\n', eol));
    contents.push_str(eol);
}

/// Insert `code` before the last route group close (`});`), or append it
fn insert_route(contents: &str, code: &str) -> String {
    let eol = line_ending(contents);
    let lines: Vec<&str> = contents.split_inclusive('\n').collect();
    let mut updated = String::with_capacity(contents.len() + code.len() + 8);

    let Some(close) = lines
        .iter()
        .rposition(|line| line.trim_start().starts_with("});"))
    else {
        updated.push_str(contents);
        append_lines(&mut updated, code, eol);
        return updated;
    };

    for (index, line) in lines.iter().enumerate() {
        if index == close {
            updated.push_str("    ");
            updated.push_str(code);
            updated.push_str(eol);
        }
        updated.push_str(line);
    }

    updated
}
