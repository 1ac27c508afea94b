//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, plus the
//! [`RuntimeConfig`] that carries output settings into the commands.

use crate::bundler::{LauncherFlavor, assets::is_valid_asset_name};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Portable application bundle builder
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_portable",
    version,
    about = "Builds a self-contained, relocatable application bundle",
    long_about = "Builds a self-contained, relocatable application bundle from a project checkout.

The bundle holds a copy of the project's interpreter, its pinned dependencies,
the project source, optional cached assets and launcher scripts that locate
everything relative to themselves.

Usage:
  kodegen_bundler_portable build --project-root ~/src/serena
  kodegen_bundler_portable build -p ~/src/serena --assets java,typescript --json
  kodegen_bundler_portable refresh-source -p ~/src/serena
  kodegen_bundler_portable assets
  kodegen_bundler_portable fetch-assets -p ~/src/serena --assets java,kotlin

Exit code 0 = bundle complete at the output path."
)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file; command line flags override its values
    #[arg(short = 'c', long, global = true, value_name = "FILE", env = "PORTABLE_BUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Project checkout root (required, no default)
    #[arg(short = 'p', long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Bundle output directory; destroyed and recreated by `build`
    ///
    /// Defaults to ./dist/<app-name>-standalone
    #[arg(short = 'o', long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Optional-asset cache root
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_root: Option<PathBuf>,

    /// Application name; read from pyproject.toml when omitted
    #[arg(long, global = true, value_name = "NAME")]
    pub name: Option<String>,

    /// Show detailed output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only show errors and results
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the full bundle
    Build(BuildArgs),

    /// Re-copy project source into an existing bundle without reinstalling
    RefreshSource,

    /// List known and cached optional assets
    Assets {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Populate the asset cache with the external download tool
    FetchAssets {
        /// Comma-separated asset names
        #[arg(long, value_delimiter = ',', required = true, value_name = "NAMES")]
        assets: Vec<String>,
    },
}

/// Options of the `build` subcommand
#[derive(ClapArgs, Debug, Default)]
pub struct BuildArgs {
    /// Comma-separated assets to include (default: every cached asset)
    #[arg(long, value_delimiter = ',', value_name = "NAMES")]
    pub assets: Option<Vec<String>>,

    /// Do not download the auxiliary runtime when it is not installed locally
    #[arg(long)]
    pub no_download: bool,

    /// Do not bundle the auxiliary runtime at all
    #[arg(long, conflicts_with = "no_download")]
    pub no_auxiliary: bool,

    /// Launcher script dialect (default: host)
    #[arg(long, value_enum, value_name = "FLAVOR")]
    pub launcher_flavor: Option<LauncherFlavor>,

    /// Print the build summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err("Application name cannot be empty".to_string());
        }

        let names: &[String] = match &self.command {
            Command::Build(build) => build.assets.as_deref().unwrap_or_default(),
            Command::FetchAssets { assets } => assets,
            _ => &[],
        };
        if let Some(bad) = names.iter().find(|n| !is_valid_asset_name(n.trim())) {
            return Err(format!(
                "Invalid asset name {bad:?}: expected a plain name such as `java`"
            ));
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for styled terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        Self {
            output: super::OutputManager::new(args.verbose, args.quiet),
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.output.progress(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }

    /// Print verbose-only text
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }
}
