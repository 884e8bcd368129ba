//! CRUD scaffold orchestrator
//!
//! Coordinates one scaffold run from a raw entity name to a finished admin
//! CRUD:
//! 1. Derive the naming variants and reject reserved names
//! 2. Resolve the validation strategy (flag or prompt)
//! 3. Build the dispatch plan
//! 4. Invoke the collaborators in order, stopping at the first failure
//! 5. Compose the admin URL for the completion message
//!
//! Nothing is rolled back when a step fails; earlier steps stay applied.

use crate::collaborators::{Outcome, ScaffoldBackend};
use crate::error::ScaffoldError;
use crate::naming::EntityNames;
use crate::report;
use crate::reserved::is_reserved;
use crate::validation::{self, Prompt, ValidationStrategy};
use std::fmt;

/// One collaborator in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Model generator
    Model,
    /// CRUD controller generator
    Controller,
    /// Form request generator
    Request,
    /// Admin route registrar
    Route,
    /// Sidebar registrar
    Sidebar,
    /// Route cache status query and rebuild
    RouteCache,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Model => "Model generation",
            Self::Controller => "Controller generation",
            Self::Request => "Request generation",
            Self::Route => "Route registration",
            Self::Sidebar => "Sidebar registration",
            Self::RouteCache => "Route cache rebuild",
        })
    }
}

/// A collaborator call with its parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Generate the model class
    Model {
        /// Class name
        name: String,
    },
    /// Generate the CRUD controller
    Controller {
        /// Class name (without the `CrudController` suffix)
        name: String,
        /// How the controller declares validation rules
        validation: ValidationStrategy,
    },
    /// Generate the form request
    Request {
        /// Class name (without the `Request` suffix)
        name: String,
    },
    /// Register the admin route
    Route {
        /// Route statement
        code: String,
    },
    /// Register the sidebar entry
    Sidebar {
        /// Sidebar markup
        code: String,
    },
    /// Rebuild the compiled route cache
    RebuildRouteCache,
}

impl Invocation {
    /// Collaborator this invocation targets
    #[must_use]
    pub const fn step(&self) -> Step {
        match self {
            Self::Model { .. } => Step::Model,
            Self::Controller { .. } => Step::Controller,
            Self::Request { .. } => Step::Request,
            Self::Route { .. } => Step::Route,
            Self::Sidebar { .. } => Step::Sidebar,
            Self::RebuildRouteCache => Step::RouteCache,
        }
    }

    fn dispatch(&self, backend: &dyn ScaffoldBackend) -> anyhow::Result<Outcome> {
        match self {
            Self::Model { name } => backend.generate_model(name),
            Self::Controller { name, validation } => backend.generate_controller(name, *validation),
            Self::Request { name } => backend.generate_request(name),
            Self::Route { code } => backend.register_route(code),
            Self::Sidebar { code } => backend.register_sidebar(code),
            Self::RebuildRouteCache => backend.rebuild(),
        }
    }
}

/// Ordered collaborator calls for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPlan {
    invocations: Vec<Invocation>,
}

impl DispatchPlan {
    /// Build the plan for final names and strategy
    #[must_use]
    pub fn new(names: &EntityNames, validation: ValidationStrategy, route_cache_active: bool) -> Self {
        let name = names.title().to_string();

        let mut invocations = vec![
            Invocation::Model { name: name.clone() },
            Invocation::Controller {
                name: name.clone(),
                validation,
            },
        ];

        if validation == ValidationStrategy::Request {
            invocations.push(Invocation::Request { name });
        }

        invocations.push(Invocation::Route {
            code: route_statement(names),
        });
        invocations.push(Invocation::Sidebar {
            code: sidebar_item(names),
        });

        if route_cache_active {
            invocations.push(Invocation::RebuildRouteCache);
        }

        Self { invocations }
    }

    /// Calls in execution order
    #[must_use]
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Steps in execution order
    #[must_use]
    pub fn steps(&self) -> Vec<Step> {
        self.invocations.iter().map(Invocation::step).collect()
    }
}

/// Route statement registering the CRUD
///
/// ```
/// # use acton_admin_cli_lib::naming::EntityNames;
/// # use acton_admin_cli_lib::pipeline::route_statement;
/// let names = EntityNames::derive("blog post").unwrap();
/// assert_eq!(route_statement(&names), "Route::crud('blog-post', 'BlogPostCrudController');");
/// ```
#[must_use]
pub fn route_statement(names: &EntityNames) -> String {
    format!(
        "Route::crud('{}', '{}');",
        names.kebab(),
        names.controller_class()
    )
}

/// Sidebar list item linking to the CRUD
#[must_use]
pub fn sidebar_item(names: &EntityNames) -> String {
    format!(
        "<li class=\"nav-item\"><a class=\"nav-link\" href=\"{{{{ backpack_url('{}') }}}}\"><i class=\"nav-icon la la-question\"></i> {}</a></li>",
        names.kebab(),
        names.plural_display()
    )
}

/// Progress notifications from a running pipeline
pub trait PipelineObserver {
    /// Names were derived and passed the reserved-word check
    fn entity_resolved(&mut self, _names: &EntityNames) {}

    /// A collaborator is about to be invoked
    fn step_started(&mut self, _step: Step) {}

    /// A collaborator finished successfully
    fn step_finished(&mut self, _step: Step, _outcome: &Outcome) {}
}

impl PipelineObserver for () {}

/// Settings that shape a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldOptions {
    /// Application base URL
    pub base_url: String,
    /// Admin panel route prefix
    pub route_prefix: String,
    /// Answer offered by the validation prompt
    pub default_validation: ValidationStrategy,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost".to_string(),
            route_prefix: "admin".to_string(),
            default_validation: ValidationStrategy::Request,
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    /// Derived names
    pub names: EntityNames,
    /// Strategy the controller was generated with
    pub validation: ValidationStrategy,
    /// Collaborator outcomes in execution order
    pub outcomes: Vec<(Step, Outcome)>,
    /// Admin URL of the new CRUD
    pub url: String,
}

/// Scaffold orchestrator
pub struct ScaffoldPipeline<'a> {
    backend: &'a dyn ScaffoldBackend,
    prompt: Option<&'a dyn Prompt>,
    options: ScaffoldOptions,
}

impl<'a> ScaffoldPipeline<'a> {
    /// Create a pipeline over `backend`
    ///
    /// Pass `None` as `prompt` for non-interactive runs.
    #[must_use]
    pub fn new(
        backend: &'a dyn ScaffoldBackend,
        prompt: Option<&'a dyn Prompt>,
        options: ScaffoldOptions,
    ) -> Self {
        Self {
            backend,
            prompt,
            options,
        }
    }

    /// Run the pipeline for `raw_name`
    ///
    /// # Errors
    ///
    /// - [`ScaffoldError::InvalidName`] / [`ScaffoldError::NameReserved`] before anything runs
    /// - [`ScaffoldError::InvalidValidationStrategy`] / [`ScaffoldError::Prompt`] before any
    ///   collaborator runs
    /// - [`ScaffoldError::Collaborator`] when a step fails; later steps are not run
    pub fn run(
        &self,
        raw_name: &str,
        validation: Option<&str>,
        observer: &mut dyn PipelineObserver,
    ) -> Result<ScaffoldReport, ScaffoldError> {
        let names = EntityNames::derive(raw_name)?;
        if is_reserved(names.title()) {
            tracing::warn!(name = names.title(), "refusing reserved name");
            return Err(ScaffoldError::NameReserved {
                name: names.title().to_string(),
            });
        }
        observer.entity_resolved(&names);

        let validation =
            validation::resolve(validation, self.prompt, self.options.default_validation)?;

        let route_cache_active = self
            .backend
            .is_cached()
            .map_err(|err| ScaffoldError::collaborator(Step::RouteCache, err))?;

        let plan = DispatchPlan::new(&names, validation, route_cache_active);
        tracing::info!(
            name = names.title(),
            %validation,
            route_cache_active,
            steps = plan.invocations().len(),
            "dispatching scaffold plan"
        );

        let outcomes = self.execute(&plan, observer)?;
        let url = report::admin_url(
            &self.options.base_url,
            &self.options.route_prefix,
            names.kebab(),
        );

        Ok(ScaffoldReport {
            names,
            validation,
            outcomes,
            url,
        })
    }

    /// Invoke every planned collaborator in order
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Collaborator`] for the first failing step.
    pub fn execute(
        &self,
        plan: &DispatchPlan,
        observer: &mut dyn PipelineObserver,
    ) -> Result<Vec<(Step, Outcome)>, ScaffoldError> {
        let mut outcomes = Vec::with_capacity(plan.invocations().len());

        for invocation in plan.invocations() {
            let step = invocation.step();
            observer.step_started(step);
            tracing::debug!(%step, "invoking collaborator");

            let outcome = invocation.dispatch(self.backend).map_err(|err| {
                tracing::warn!(%step, error = %err, "collaborator failed");
                ScaffoldError::collaborator(step, err)
            })?;

            observer.step_finished(step, &outcome);
            outcomes.push((step, outcome));
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        ControllerGenerator, ModelGenerator, RequestGenerator, RouteCache, RouteRegistrar,
        SidebarRegistrar,
    };
    use mockall::{mock, Sequence};
    use std::path::PathBuf;

    mock! {
        Backend {}

        impl ModelGenerator for Backend {
            fn generate_model(&self, name: &str) -> anyhow::Result<Outcome>;
        }

        impl ControllerGenerator for Backend {
            fn generate_controller(
                &self,
                name: &str,
                validation: ValidationStrategy,
            ) -> anyhow::Result<Outcome>;
        }

        impl RequestGenerator for Backend {
            fn generate_request(&self, name: &str) -> anyhow::Result<Outcome>;
        }

        impl RouteRegistrar for Backend {
            fn register_route(&self, code: &str) -> anyhow::Result<Outcome>;
        }

        impl SidebarRegistrar for Backend {
            fn register_sidebar(&self, code: &str) -> anyhow::Result<Outcome>;
        }

        impl RouteCache for Backend {
            fn is_cached(&self) -> anyhow::Result<bool>;
            fn rebuild(&self) -> anyhow::Result<Outcome>;
        }
    }

    fn created(path: &str) -> Outcome {
        Outcome::Created(PathBuf::from(path))
    }

    fn pipeline(backend: &MockBackend) -> ScaffoldPipeline<'_> {
        ScaffoldPipeline::new(backend, None, ScaffoldOptions::default())
    }

    #[derive(Default)]
    struct StepLog {
        started: Vec<Step>,
        finished: Vec<Step>,
        resolved: Option<String>,
    }

    impl PipelineObserver for StepLog {
        fn entity_resolved(&mut self, names: &EntityNames) {
            self.resolved = Some(names.title().to_string());
        }

        fn step_started(&mut self, step: Step) {
            self.started.push(step);
        }

        fn step_finished(&mut self, step: Step, _outcome: &Outcome) {
            self.finished.push(step);
        }
    }

    #[test]
    fn test_plan_for_array_strategy() {
        let names = EntityNames::derive("blog post").unwrap();
        let plan = DispatchPlan::new(&names, ValidationStrategy::Array, false);

        assert_eq!(
            plan.steps(),
            vec![Step::Model, Step::Controller, Step::Route, Step::Sidebar]
        );
        assert_eq!(
            plan.invocations()[2],
            Invocation::Route {
                code: "Route::crud('blog-post', 'BlogPostCrudController');".to_string()
            }
        );
    }

    #[test]
    fn test_plan_for_request_strategy_with_cache() {
        let names = EntityNames::derive("blog post").unwrap();
        let plan = DispatchPlan::new(&names, ValidationStrategy::Request, true);

        assert_eq!(
            plan.steps(),
            vec![
                Step::Model,
                Step::Controller,
                Step::Request,
                Step::Route,
                Step::Sidebar,
                Step::RouteCache,
            ]
        );
        assert_eq!(
            plan.invocations()[2],
            Invocation::Request {
                name: "BlogPost".to_string()
            }
        );
    }

    #[test]
    fn test_sidebar_item_markup() {
        let names = EntityNames::derive("blog post").unwrap();
        assert_eq!(
            sidebar_item(&names),
            "<li class=\"nav-item\"><a class=\"nav-link\" href=\"{{ backpack_url('blog-post') }}\"><i class=\"nav-icon la la-question\"></i> Blog posts</a></li>"
        );
    }

    #[test]
    fn test_run_array_strategy_in_order() {
        let mut backend = MockBackend::new();
        let mut seq = Sequence::new();

        backend.expect_is_cached().times(1).in_sequence(&mut seq).returning(|| Ok(false));
        backend
            .expect_generate_model()
            .withf(|name| name == "BlogPost")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(created("app/Models/BlogPost.php")));
        backend
            .expect_generate_controller()
            .withf(|name, validation| name == "BlogPost" && *validation == ValidationStrategy::Array)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(created("app/Http/Controllers/Admin/BlogPostCrudController.php")));
        backend
            .expect_register_route()
            .withf(|code| code == "Route::crud('blog-post', 'BlogPostCrudController');")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Outcome::Updated(PathBuf::from("routes/backpack/custom.php"))));
        backend
            .expect_register_sidebar()
            .withf(|code| code.contains("backpack_url('blog-post')") && code.contains("Blog posts"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Outcome::Updated(PathBuf::from("sidebar_content.blade.php"))));
        backend.expect_generate_request().never();
        backend.expect_rebuild().never();

        let mut log = StepLog::default();
        let report = pipeline(&backend)
            .run("blog post", Some("array"), &mut log)
            .unwrap();

        assert_eq!(report.validation, ValidationStrategy::Array);
        assert_eq!(report.url, "http://localhost/admin/blog-post");
        assert_eq!(report.outcomes.len(), 4);
        assert_eq!(log.resolved.as_deref(), Some("BlogPost"));
        assert_eq!(log.started, log.finished);
    }

    #[test]
    fn test_request_strategy_generates_request_once() {
        let mut backend = MockBackend::new();
        backend.expect_is_cached().returning(|| Ok(false));
        backend.expect_generate_model().returning(|_| Ok(created("m")));
        backend.expect_generate_controller().returning(|_, _| Ok(created("c")));
        backend
            .expect_generate_request()
            .withf(|name| name == "BlogPost")
            .times(1)
            .returning(|_| Ok(created("r")));
        backend.expect_register_route().returning(|_| Ok(created("routes")));
        backend.expect_register_sidebar().returning(|_| Ok(created("sidebar")));
        backend.expect_rebuild().never();

        let report = pipeline(&backend)
            .run("BlogPost", Some("request"), &mut ())
            .unwrap();
        assert_eq!(report.outcomes[2].0, Step::Request);
    }

    #[test]
    fn test_field_strategy_skips_request() {
        let mut backend = MockBackend::new();
        backend.expect_is_cached().returning(|| Ok(false));
        backend.expect_generate_model().returning(|_| Ok(created("m")));
        backend.expect_generate_controller().returning(|_, _| Ok(created("c")));
        backend.expect_generate_request().never();
        backend.expect_register_route().returning(|_| Ok(created("routes")));
        backend.expect_register_sidebar().returning(|_| Ok(created("sidebar")));

        let report = pipeline(&backend).run("tag", Some("field"), &mut ()).unwrap();
        assert!(report.outcomes.iter().all(|(step, _)| *step != Step::Request));
    }

    #[test]
    fn test_cached_routes_rebuilt_after_sidebar() {
        let mut backend = MockBackend::new();
        let mut seq = Sequence::new();

        backend.expect_is_cached().times(1).in_sequence(&mut seq).returning(|| Ok(true));
        backend.expect_generate_model().times(1).in_sequence(&mut seq).returning(|_| Ok(created("m")));
        backend
            .expect_generate_controller()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(created("c")));
        backend.expect_register_route().times(1).in_sequence(&mut seq).returning(|_| Ok(created("routes")));
        backend
            .expect_register_sidebar()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(created("sidebar")));
        backend
            .expect_rebuild()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(Outcome::Ran("php artisan route:cache".to_string())));

        let report = pipeline(&backend).run("tag", Some("array"), &mut ()).unwrap();
        assert_eq!(report.outcomes.last().map(|(step, _)| *step), Some(Step::RouteCache));
    }

    #[test]
    fn test_reserved_name_invokes_nothing() {
        // No expectations: any collaborator call panics.
        let backend = MockBackend::new();
        let err = pipeline(&backend).run("class", Some("array"), &mut ()).unwrap_err();
        assert!(matches!(err, ScaffoldError::NameReserved { name } if name == "Class"));
    }

    #[test]
    fn test_invalid_strategy_invokes_nothing() {
        let backend = MockBackend::new();
        let err = pipeline(&backend).run("blog post", Some("json"), &mut ()).unwrap_err();
        assert!(matches!(
            err,
            ScaffoldError::InvalidValidationStrategy { value } if value == "json"
        ));
    }

    #[test]
    fn test_missing_strategy_without_prompt_invokes_nothing() {
        let backend = MockBackend::new();
        let err = pipeline(&backend).run("blog post", None, &mut ()).unwrap_err();
        assert!(matches!(err, ScaffoldError::InvalidValidationStrategy { .. }));
    }

    #[test]
    fn test_collaborator_failure_stops_pipeline() {
        let mut backend = MockBackend::new();
        backend.expect_is_cached().returning(|| Ok(true));
        backend.expect_generate_model().times(1).returning(|_| Ok(created("m")));
        backend
            .expect_generate_controller()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("disk full")));
        backend.expect_generate_request().never();
        backend.expect_register_route().never();
        backend.expect_register_sidebar().never();
        backend.expect_rebuild().never();

        let mut log = StepLog::default();
        let err = pipeline(&backend)
            .run("blog post", Some("request"), &mut log)
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::Collaborator { step: Step::Controller, .. }));
        assert_eq!(log.started, vec![Step::Model, Step::Controller]);
        assert_eq!(log.finished, vec![Step::Model]);
    }

    #[test]
    fn test_custom_prefix_and_base_url() {
        let mut backend = MockBackend::new();
        backend.expect_is_cached().returning(|| Ok(false));
        backend.expect_generate_model().returning(|_| Ok(created("m")));
        backend.expect_generate_controller().returning(|_, _| Ok(created("c")));
        backend.expect_register_route().returning(|_| Ok(created("routes")));
        backend.expect_register_sidebar().returning(|_| Ok(created("sidebar")));

        let options = ScaffoldOptions {
            base_url: "https://example.test///".to_string(),
            route_prefix: "backoffice".to_string(),
            default_validation: ValidationStrategy::Request,
        };
        let report = ScaffoldPipeline::new(&backend, None, options)
            .run("UserProfile", Some("field"), &mut ())
            .unwrap();
        assert_eq!(report.url, "https://example.test/backoffice/user-profile");
    }
}
