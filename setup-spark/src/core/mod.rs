//! Deterministic, pure logic for the Spark installer.
//!
//! Core modules must be free of I/O side effects. They turn inputs into
//! names, URLs and environment values so the orchestration in
//! [`crate::install`] only has to apply them.

pub mod environment;
pub mod release;
