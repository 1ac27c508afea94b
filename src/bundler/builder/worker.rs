//! Background assembly with a progress event stream.
//!
//! Assembly runs on its own tokio task and owns the output tree until it
//! finishes. The caller drains events while it runs, then collects the result.
//! There is no cancellation.

use super::{BundleSummary, Bundler};
use crate::bundler::{Error, Result, Settings};
use serde::Serialize;
use std::fmt;
use tokio::{sync::mpsc, task::JoinHandle};

/// Pipeline steps in execution order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// Reading the runtime config artifact
    ResolveRuntime,
    /// Destroying and recreating the output tree
    PrepareLayout,
    /// Copying the primary runtime
    CopyRuntime,
    /// Searching for or downloading the auxiliary runtime
    AuxiliaryRuntime,
    /// Exporting and installing pinned dependencies
    Dependencies,
    /// Copying first-party source
    Source,
    /// Copying optional assets
    Assets,
    /// Writing launchers and README
    Launchers,
    /// Hashing the finished tree
    Checksum,
}

impl Step {
    /// Every step, in order.
    pub const ALL: [Step; 9] = [
        Step::ResolveRuntime,
        Step::PrepareLayout,
        Step::CopyRuntime,
        Step::AuxiliaryRuntime,
        Step::Dependencies,
        Step::Source,
        Step::Assets,
        Step::Launchers,
        Step::Checksum,
    ];

    /// One-based position in [`Step::ALL`].
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).map_or(0, |i| i + 1)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::ResolveRuntime => "Resolving primary runtime",
            Step::PrepareLayout => "Preparing output directory",
            Step::CopyRuntime => "Copying primary runtime",
            Step::AuxiliaryRuntime => "Setting up auxiliary runtime",
            Step::Dependencies => "Installing dependencies",
            Step::Source => "Copying source code",
            Step::Assets => "Copying optional assets",
            Step::Launchers => "Creating launcher scripts",
            Step::Checksum => "Computing bundle checksum",
        };
        f.write_str(label)
    }
}

/// Progress reported by a running assembly.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", content = "detail", rename_all = "kebab-case")]
pub enum AssemblyEvent {
    /// A step started
    Step(Step),
    /// A recoverable problem; the bundle is still produced
    Warning(String),
}

/// Handle to an assembly running in the background.
#[derive(Debug)]
pub struct AssemblyHandle {
    events: mpsc::UnboundedReceiver<AssemblyEvent>,
    task: JoinHandle<Result<BundleSummary>>,
}

impl AssemblyHandle {
    /// Next event, or `None` once the assembly has finished and all events
    /// were delivered.
    pub async fn next_event(&mut self) -> Option<AssemblyEvent> {
        self.events.recv().await
    }

    /// Waits for the assembly to finish. Undelivered events are dropped.
    pub async fn wait(self) -> Result<BundleSummary> {
        self.task
            .await
            .map_err(|e| Error::GenericError(format!("assembly task failed: {e}")))?
    }
}

/// Starts assembling `settings` on a background task.
pub fn spawn_assembly(settings: Settings) -> AssemblyHandle {
    let (tx, events) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move { Bundler::new(settings).with_events(tx).assemble().await });
    AssemblyHandle { events, task }
}
