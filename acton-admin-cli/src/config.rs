//! Configuration for acton-admin
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `ACTON_ADMIN_` prefix, `__` for nesting)
//! 2. `APP_URL` (maps to `app.url`, shared with the target application's `.env`)
//! 3. `<project>/acton-admin.toml`, or the file passed with `--config`
//! 4. `~/.config/acton-admin/config.toml` (user config, XDG)
//! 5. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # acton-admin.toml
//! [app]
//! url = "https://shop.test"
//!
//! [crud]
//! route_prefix = "admin"
//! default_validation = "request"
//!
//! [paths]
//! models = "app/Models"
//! routes = "routes/backpack/custom.php"
//!
//! [route_cache]
//! manifest = "bootstrap/cache/routes-v7.php"
//! rebuild_command = ["php", "artisan", "route:cache"]
//! ```

use crate::pipeline::ScaffoldOptions;
use crate::validation::ValidationStrategy;
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the project-level config file
pub const PROJECT_CONFIG_FILE: &str = "acton-admin.toml";

/// Target application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL the application is served from
    pub url: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost".to_string(),
        }
    }
}

/// CRUD generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudSettings {
    /// Route prefix of the admin panel
    pub route_prefix: String,

    /// Answer preselected by the validation prompt
    pub default_validation: ValidationStrategy,
}

impl Default for CrudSettings {
    fn default() -> Self {
        Self {
            route_prefix: "admin".to_string(),
            default_validation: ValidationStrategy::Request,
        }
    }
}

/// Locations of generated and updated files, relative to the project root
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory for model classes
    pub models: PathBuf,

    /// Directory for CRUD controllers
    pub controllers: PathBuf,

    /// Directory for form requests
    pub requests: PathBuf,

    /// Admin route file
    pub routes: PathBuf,

    /// Sidebar partial
    pub sidebar: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            models: PathBuf::from("app/Models"),
            controllers: PathBuf::from("app/Http/Controllers/Admin"),
            requests: PathBuf::from("app/Http/Requests"),
            routes: PathBuf::from("routes/backpack/custom.php"),
            sidebar: PathBuf::from("resources/views/vendor/backpack/base/inc/sidebar_content.blade.php"),
        }
    }
}

/// Route cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteCacheSettings {
    /// File whose presence means routes are served from the cache
    pub manifest: PathBuf,

    /// Command that rebuilds the cache, run from the project root
    pub rebuild_command: Vec<String>,
}

impl Default for RouteCacheSettings {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("bootstrap/cache/routes-v7.php"),
            rebuild_command: vec![
                "php".to_string(),
                "artisan".to_string(),
                "route:cache".to_string(),
            ],
        }
    }
}

/// Complete acton-admin configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// Target application settings
    #[serde(default)]
    pub app: AppSettings,

    /// CRUD generation settings
    #[serde(default)]
    pub crud: CrudSettings,

    /// File locations
    #[serde(default)]
    pub paths: PathSettings,

    /// Route cache settings
    #[serde(default)]
    pub route_cache: RouteCacheSettings,
}

impl AdminConfig {
    /// Load configuration for the project at `project_root`
    ///
    /// `explicit` replaces the project config file when given and must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Default configuration cannot be serialized to TOML
    /// - The explicit config file does not exist
    /// - A configuration file contains invalid TOML or invalid values
    pub fn load(project_root: &Path, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new()
            // 5. Start with defaults (lowest priority)
            .merge(Toml::string(&toml::to_string(&Self::default())?));

        // 4. User config: ~/.config/acton-admin/config.toml
        let user_config = Self::recommended_path();
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }

        // 3. Project config or explicit file
        match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let project_config = project_root.join(PROJECT_CONFIG_FILE);
                if project_config.exists() {
                    figment = figment.merge(Toml::file(&project_config));
                }
            }
        }

        // 2. APP_URL, as used by the target application
        figment = figment.merge(Env::raw().only(&["APP_URL"]).map(|_| "app.url".into()));

        // 1. Environment variables (highest priority, double underscore for nesting)
        figment = figment.merge(Env::prefixed("ACTON_ADMIN_").split("__").lowercase(true));

        let config = figment.extract()?;
        Ok(config)
    }

    /// Load configuration from a specific file, without user config or environment
    ///
    /// # Errors
    ///
    /// Returns an error if the file contains invalid TOML or invalid values.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config = Figment::new()
            .merge(Toml::string(&toml::to_string(&Self::default())?))
            .merge(Toml::file(path))
            .extract()?;

        Ok(config)
    }

    /// Get the recommended XDG config path
    #[must_use]
    pub fn recommended_path() -> PathBuf {
        dirs::config_dir().map_or_else(
            || PathBuf::from(PROJECT_CONFIG_FILE),
            |config_dir| config_dir.join("acton-admin").join("config.toml"),
        )
    }

    /// Pipeline options derived from this configuration
    #[must_use]
    pub fn scaffold_options(&self) -> ScaffoldOptions {
        ScaffoldOptions {
            base_url: self.app.url.clone(),
            route_prefix: self.crud.route_prefix.clone(),
            default_validation: self.crud.default_validation,
        }
    }
}
