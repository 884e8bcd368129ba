//! acton-admin CLI library
//!
//! Scaffolds CRUD admin panels: derives the names for an entity, resolves how
//! validation rules are declared, and drives the generators and registrars
//! that create the model, controller, request, route and sidebar entry.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod collaborators;
pub mod commands;
pub mod config;
pub mod error;
pub mod naming;
pub mod observability;
pub mod pipeline;
pub mod report;
pub mod reserved;
pub mod templates;
pub mod validation;

pub use collaborators::{Outcome, ProjectBackend, ScaffoldBackend};
pub use config::AdminConfig;
pub use error::ScaffoldError;
pub use naming::EntityNames;
pub use pipeline::{DispatchPlan, Invocation, ScaffoldOptions, ScaffoldPipeline, ScaffoldReport, Step};
pub use validation::ValidationStrategy;
