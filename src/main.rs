//! Kodegen Bundler Portable - relocatable application bundles from a project checkout.
//!
//! Builds a folder holding an interpreter, dependencies, source, optional
//! assets and launchers; the folder runs wherever it is copied.

use env_logger::Env;
use kodegen_bundler_portable::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
