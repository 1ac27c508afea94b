//! Bundle orchestration and coordination.
//!
//! This module provides the [`Bundler`] that turns validated [`Settings`]
//! into a bundle, and [`spawn_assembly`] for running it in the background.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 of the finished bundle tree
//! - [`orchestrator`] - [`Bundler`] and the step sequence
//! - [`summary`] - [`BundleSummary`] returned by a successful run
//! - [`worker`] - background task with an event stream
//!
//! [`Settings`]: crate::bundler::Settings

pub mod checksum;
mod orchestrator;
mod summary;
mod worker;

pub use checksum::calculate_tree_sha256;
pub use orchestrator::Bundler;
pub use summary::BundleSummary;
pub use worker::{AssemblyEvent, AssemblyHandle, Step, spawn_assembly};
