//! Command line interface for the portable bundler.
//!
//! Parses arguments, merges them over the optional config file and
//! dispatches to one of the subcommands.

mod args;
pub mod commands;
mod config;
mod output;

pub use args::{Args, BuildArgs, Command, RuntimeConfig};
pub use config::{BundleConfig, default_output_dir};
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    let runtime = RuntimeConfig::from(&args);

    match execute(&args, &runtime).await {
        Ok(code) => Ok(code),
        Err(e) => {
            runtime.output().error(&e.to_string())?;
            for suggestion in e.recovery_suggestions() {
                runtime.indent(&suggestion)?;
            }
            Ok(1)
        }
    }
}

/// Runs the parsed command.
pub async fn execute(args: &Args, runtime: &RuntimeConfig) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let mut config = BundleConfig::from_args(args)?;
    config.apply_args(args);

    match &args.command {
        Command::Build(build) => {
            config.apply_build_args(build);
            let settings = config.into_settings()?;
            commands::build_bundle(settings, build.json, runtime).await
        }
        Command::RefreshSource => {
            let settings = config.into_settings()?;
            commands::refresh_source(settings, runtime).await
        }
        Command::Assets { json } => commands::list_assets(&config.assets, *json, runtime).await,
        Command::FetchAssets { assets } => {
            let project_root = config.require_project_root()?;
            commands::fetch_assets(&config.assets, project_root, assets, runtime).await
        }
    }
}
