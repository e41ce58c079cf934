//! Layered configuration resolution for command-line applications.
//!
//! This crate locates, reads, and merges configuration data from three
//! standard tiers — system-wide, per-user, and local/working-directory —
//! into one unified mapping, following a deterministic precedence policy:
//! defaults are the lowest priority, then system, then user, then local.
//! An optional override mode re-applies the system tier last so system
//! values win conflicts without removing user- or local-only keys.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tiered_config::Configurator;
//!
//! # fn run() -> tiered_config::ConfigResult<()> {
//! let cfg = Configurator::builder("moapp")
//!     .default("server", "test.example.com")
//!     .build()?;
//! let server = cfg.obj().get("server");
//! # let _ = server;
//! # Ok(())
//! # }
//! ```

mod configurator;
mod error;
pub mod merge;
mod paths;
mod settings;
mod source;
mod tier;

pub use configurator::{Configurator, ConfiguratorBuilder};
pub use error::{AggregatedErrors, ConfigError, ConfigResult};
pub use paths::PathResolver;
pub use settings::Settings;
pub use source::{ConfigSource, FileSource, Format, HttpSource};
pub use tier::Tier;

/// Mapping of string keys to arbitrary scalar or nested configuration values.
pub type Mapping = serde_json::Map<String, serde_json::Value>;
