//! Styled terminal output.
//!
//! Human-oriented messages go to stderr so that machine-readable output on
//! stdout (`--json`) stays clean.

use console::{Style, Term};

/// Prints progress, warnings and results, honouring `--verbose` / `--quiet`.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    err: Term,
    out: Term,
}

impl OutputManager {
    /// Creates an output manager. `quiet` wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
            err: Term::stderr(),
            out: Term::stdout(),
        }
    }

    /// Whether verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Bold section header.
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err.write_line("")?;
        self.err
            .write_line(&Style::new().bold().cyan().apply_to(title).to_string())
    }

    /// Progress line.
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err.write_line(&format!(
            "{} {}",
            Style::new().blue().bold().apply_to("=>"),
            message
        ))
    }

    /// Success line.
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err.write_line(&format!(
            "{} {}",
            Style::new().green().bold().apply_to("✓"),
            message
        ))
    }

    /// Warning line. Shown unless quiet.
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err.write_line(&format!(
            "{} {}",
            Style::new().yellow().bold().apply_to("warning:"),
            message
        ))
    }

    /// Error line. Always shown.
    pub fn error(&self, message: &str) -> std::io::Result<()> {
        self.err.write_line(&format!(
            "{} {}",
            Style::new().red().bold().apply_to("error:"),
            message
        ))
    }

    /// Indented detail line.
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.err.write_line(&format!("    {message}"))
    }

    /// Detail line shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.err
            .write_line(&Style::new().dim().apply_to(message).to_string())
    }

    /// Result data on stdout. Always shown.
    pub fn data(&self, message: &str) -> std::io::Result<()> {
        self.out.write_line(message)
    }
}
