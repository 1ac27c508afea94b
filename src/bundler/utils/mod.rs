//! Filesystem, network, archive and process helpers shared by the pipeline steps.

pub mod archive;
pub mod command;
pub mod fs;
pub mod http;
