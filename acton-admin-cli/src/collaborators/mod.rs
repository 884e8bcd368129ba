//! Collaborators invoked by the scaffold pipeline
//!
//! Each generator or registrar the pipeline drives is a trait, so the
//! pipeline can run against the real project on disk or against a fake in
//! tests. [`ScaffoldBackend`] bundles them for callers that provide all of
//! them from one type.

pub mod project;

use crate::validation::ValidationStrategy;
use anyhow::Result;
use std::fmt;
use std::path::PathBuf;

pub use project::ProjectBackend;

/// What a collaborator did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new file was written
    Created(PathBuf),
    /// An existing file was changed
    Updated(PathBuf),
    /// Nothing to do, the artifact already exists
    Skipped {
        /// File that was left untouched
        path: PathBuf,
        /// Why it was left untouched
        reason: String,
    },
    /// An external command ran successfully
    Ran(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(path) => write!(f, "created {}", path.display()),
            Self::Updated(path) => write!(f, "updated {}", path.display()),
            Self::Skipped { path, reason } => write!(f, "skipped {} ({reason})", path.display()),
            Self::Ran(command) => write!(f, "ran {command}"),
        }
    }
}

/// Generates the model class
pub trait ModelGenerator {
    /// Generate the model named `name`
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be generated.
    fn generate_model(&self, name: &str) -> Result<Outcome>;
}

/// Generates the CRUD controller class
pub trait ControllerGenerator {
    /// Generate `<name>CrudController` using `validation`
    ///
    /// # Errors
    ///
    /// Returns an error if the controller cannot be generated.
    fn generate_controller(&self, name: &str, validation: ValidationStrategy) -> Result<Outcome>;
}

/// Generates the form request class
pub trait RequestGenerator {
    /// Generate `<name>Request`
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be generated.
    fn generate_request(&self, name: &str) -> Result<Outcome>;
}

/// Registers a statement in the admin route file
pub trait RouteRegistrar {
    /// Register the route statement `code`
    ///
    /// # Errors
    ///
    /// Returns an error if the route file cannot be updated.
    fn register_route(&self, code: &str) -> Result<Outcome>;
}

/// Registers markup in the admin sidebar
pub trait SidebarRegistrar {
    /// Add the sidebar fragment `code`
    ///
    /// # Errors
    ///
    /// Returns an error if the sidebar cannot be updated.
    fn register_sidebar(&self, code: &str) -> Result<Outcome>;
}

/// Compiled route cache of the target application
pub trait RouteCache {
    /// Whether routes are served from a compiled cache
    ///
    /// # Errors
    ///
    /// Returns an error if the cache state cannot be determined.
    fn is_cached(&self) -> Result<bool>;

    /// Rebuild the route cache
    ///
    /// # Errors
    ///
    /// Returns an error if the rebuild fails.
    fn rebuild(&self) -> Result<Outcome>;
}

/// Every collaborator the pipeline needs
pub trait ScaffoldBackend:
    ModelGenerator + ControllerGenerator + RequestGenerator + RouteRegistrar + SidebarRegistrar + RouteCache
{
}

impl<T> ScaffoldBackend for T where
    T: ModelGenerator
        + ControllerGenerator
        + RequestGenerator
        + RouteRegistrar
        + SidebarRegistrar
        + RouteCache
{
}
