//! Logging setup for the CLI
//!
//! Diagnostics go to stderr through `tracing`; user-facing output stays on
//! stdout. The filter comes from `ACTON_ADMIN_LOG` when set, otherwise from
//! the number of `-v` flags.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an explicit filter directive
pub const LOG_ENV: &str = "ACTON_ADMIN_LOG";

/// Default filter directive for a verbosity level
#[must_use]
pub const fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,acton_admin_cli_lib=info",
        2 => "info,acton_admin_cli_lib=debug",
        _ => "debug,acton_admin_cli_lib=trace",
    }
}

/// Initialize logging
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
