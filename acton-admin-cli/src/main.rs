//! acton-admin CLI tool

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use acton_admin_cli_lib::commands::CrudCommand;
use acton_admin_cli_lib::{observability, ScaffoldError};
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "acton-admin")]
#[command(version)]
#[command(about = "Scaffold CRUD admin panels", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a CRUD interface: model, controller, request, route and sidebar entry
    Crud {
        /// Entity name (e.g. `BlogPost`, `"blog post"`)
        name: String,

        /// Validation type, must be request, array or field
        #[arg(long, value_name = "TYPE")]
        validation: Option<String>,

        /// Never ask questions; --validation must then be given
        #[arg(short = 'n', long)]
        no_interaction: bool,

        /// Project root
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Config file (defaults to <path>/acton-admin.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Crud {
            name,
            validation,
            no_interaction,
            path,
            config,
        } => {
            let cmd = CrudCommand::new(name, validation, no_interaction, path, config);
            cmd.execute()?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = observability::init(cli.verbose) {
        eprintln!("{} {err:#}", style("Warning:").yellow().bold());
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Pipeline errors are already shown by the reporter
            if err.downcast_ref::<ScaffoldError>().is_none() {
                eprintln!("{} {err:#}", style("Error:").red().bold());
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_crud_flags() {
        let cli = Cli::parse_from([
            "acton-admin",
            "-vv",
            "crud",
            "blog post",
            "--validation",
            "array",
            "-n",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Crud {
            name,
            validation,
            no_interaction,
            path,
            config,
        } = cli.command;
        assert_eq!(name, "blog post");
        assert_eq!(validation.as_deref(), Some("array"));
        assert!(no_interaction);
        assert_eq!(path, PathBuf::from("."));
        assert!(config.is_none());
    }

    #[test]
    fn test_invalid_validation_value_reaches_resolver() {
        let cli = Cli::parse_from(["acton-admin", "crud", "tag", "--validation=json"]);
        let Commands::Crud { validation, .. } = cli.command;
        assert_eq!(validation.as_deref(), Some("json"));
    }
}
