//! Configuration structures for bundle assembly.
//!
//! [`Settings`] is the validated, immutable configuration of one assembly run.
//! Each section type doubles as a table of the optional TOML config file.

mod arch;
mod assets;
mod auxiliary;
mod builder;
mod core;
mod launcher;
mod package;
mod runtime;

// Re-export all public types
pub use arch::{Arch, ArchiveKind, Os, Platform};
pub use assets::AssetSettings;
pub use auxiliary::{AuxiliarySettings, DEFAULT_AUXILIARY_BASE_URL};
pub use builder::SettingsBuilder;
pub use core::Settings;
pub use launcher::{LauncherFlavor, LauncherSettings};
pub use package::AppSettings;
pub use runtime::{DependencySettings, RuntimeSettings};
