//! External tool execution.
//!
//! Every invocation is logged before it starts. [`ToolCommand::run`] captures
//! both streams and turns a nonzero exit into [`Error::CommandExit`] carrying
//! them; [`ToolCommand::stream`] forwards output lines as they arrive.

use crate::bundler::error::{Error, Result};
use std::{
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Captured output of a successful invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

/// An external tool invocation.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
}

impl ToolCommand {
    /// Starts a command for `program`.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Sets the working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Command line as shown in logs and errors.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|a| a.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::null());
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command
    }

    /// Runs to completion, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// - [`Error::CommandFailed`] if the program cannot be started
    /// - [`Error::CommandExit`] on a nonzero exit, with both streams attached
    pub async fn run(&self) -> Result<CommandOutput> {
        let rendered = self.display();
        log::info!("Running: {}", rendered);

        let output = self
            .command()
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: rendered.clone(),
                error,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            if !stdout.trim().is_empty() {
                log::error!("Command stdout:\n{}", stdout.trim_end());
            }
            if !stderr.trim().is_empty() {
                log::error!("Command stderr:\n{}", stderr.trim_end());
            }
            return Err(Error::CommandExit {
                command: rendered,
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        if !stdout.trim().is_empty() {
            log::debug!("{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            log::warn!("{}", stderr.trim_end());
        }

        Ok(CommandOutput { stdout, stderr })
    }

    /// Runs to completion, handing every output line to `on_line` as it arrives.
    ///
    /// Stdout and stderr are drained concurrently and interleaved in arrival
    /// order. Both are kept so a failure can report them.
    pub async fn stream<F>(&self, mut on_line: F) -> Result<()>
    where
        F: FnMut(&str),
    {
        let rendered = self.display();
        log::info!("Running: {}", rendered);

        let mut child = self
            .command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: rendered.clone(),
                error,
            })?;

        let (tx, mut rx) = mpsc::unbounded_channel::<(Stream, String)>();
        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, Stream::Stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, Stream::Stderr, tx.clone()));
        }
        drop(tx);

        let mut stdout_lines = Vec::new();
        let mut stderr_lines = Vec::new();
        while let Some((stream, line)) = rx.recv().await {
            on_line(&line);
            match stream {
                Stream::Stdout => stdout_lines.push(line),
                Stream::Stderr => stderr_lines.push(line),
            }
        }

        let status = child.wait().await.map_err(|error| Error::CommandFailed {
            command: rendered.clone(),
            error,
        })?;

        if !status.success() {
            return Err(Error::CommandExit {
                command: rendered,
                code: status.code(),
                stdout: stdout_lines.join("\n"),
                stderr: stderr_lines.join("\n"),
            });
        }

        Ok(())
    }
}

#[derive(Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

async fn forward_lines<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<(Stream, String)>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']).to_string();
                if tx.send((stream, line)).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::warn!("Stopped reading tool output: {}", e);
                break;
            }
        }
    }
}
