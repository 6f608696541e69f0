//! I/O helpers for the installer.

pub mod archive;
pub mod config;
pub mod download;
pub mod inputs;
pub mod tool_cache;
pub mod workflow;
pub mod workspace;
