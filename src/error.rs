//! Top-level error types for the command line tool.
//!
//! Pipeline failures are [`crate::bundler::Error`]; this module wraps them
//! together with argument, config and output errors.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Pipeline errors
    #[error("Bundler error: {0}")]
    Bundler(#[from] crate::bundler::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Actionable hints for this error, most specific first.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        use crate::bundler::Error as E;
        match self {
            BundlerError::Bundler(E::PrimaryRuntime { .. }) => vec![
                "Create the project environment first (e.g. `uv sync`)".to_string(),
                "Or point runtime.venv_dir at an existing environment".to_string(),
            ],
            BundlerError::Bundler(E::CommandFailed { .. }) => {
                vec!["Check that the dependency tool is installed and on PATH".to_string()]
            }
            BundlerError::Bundler(E::MissingAppPackage { .. }) => {
                vec!["Set app.package to the importable package name".to_string()]
            }
            BundlerError::Cli(CliError::MissingArgument { argument }) => {
                vec![format!("Pass {argument} or set it in the config file")]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
