//! Error types for bundle assembly.
//!
//! Every variant returned from the pipeline is fatal for the run that produced it.
//! Degraded outcomes (missing auxiliary runtime, uncached assets, missing GUI
//! resource) are reported through [`BundleSummary`](crate::bundler::BundleSummary)
//! warnings instead.

use std::{fmt::Display, io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Result type alias for bundle assembly operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while assembling a bundle.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with an added description of what was being attempted.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// Filesystem operation failed on a specific path.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being attempted
        context: &'static str,
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        error: io::Error,
    },

    /// External tool could not be started.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Spawn error
        error: io::Error,
    },

    /// External tool ran and exited unsuccessfully.
    #[error(
        "command `{command}` exited with {}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}",
        .code.map_or_else(|| "a signal".to_string(), |c| format!("code {c}"))
    )]
    CommandExit {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Captured standard output
        stdout: String,
        /// Captured standard error
        stderr: String,
    },

    /// The primary language runtime could not be resolved.
    #[error("primary runtime unavailable ({}): {reason}", .path.display())]
    PrimaryRuntime {
        /// Config artifact or runtime path involved
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The application package was not part of the copied source.
    #[error("application package `{package}` not found in {}", .lib_dir.display())]
    MissingAppPackage {
        /// Package name that was expected
        package: String,
        /// Library directory that was searched
        lib_dir: PathBuf,
    },

    /// HTTP download failed.
    #[error("download of {url} failed: {reason}")]
    Download {
        /// URL requested
        url: String,
        /// Failure description
        reason: String,
    },

    /// Zip archive could not be read.
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Launcher or README template failed to render.
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),

    /// Template failed to register.
    #[error("template error: {0}")]
    TemplateParse(Box<handlebars::TemplateError>),

    /// Download URL could not be built.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Directory walk failed.
    #[error("directory walk failed: {0}")]
    Walkdir(#[from] walkdir::Error),

    /// Path was not under the expected root.
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// IO error without path information.
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

/// Attach filesystem context to IO results.
pub trait ErrorExt<T> {
    /// Converts an IO error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Attach a description to failures, `anyhow`-style.
pub trait Context<T> {
    /// Wraps the error (or `None`) with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Lazily built variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(error: handlebars::TemplateError) -> Self {
        Self::TemplateParse(Box::new(error))
    }
}

/// Return early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}
