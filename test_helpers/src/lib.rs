//! Test helpers shared across crates in the workspace.
//!
//! Provides RAII guards for the two pieces of process-global state the
//! resolver consults: environment variables and the current working
//! directory.

pub mod cwd;
pub mod env;
