//! Portable application bundle builder.
//!
//! Assembles a self-contained, relocatable distribution of a project:
//! - the project's interpreter, copied from its isolated environment
//! - pinned third-party dependencies installed into a flat library directory
//! - first-party source and a generated entry point
//! - optional cached assets and an auxiliary runtime for them
//! - launcher scripts that resolve every path from their own location
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
