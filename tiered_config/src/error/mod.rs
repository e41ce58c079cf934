//! Error taxonomy for configuration resolution flows.

mod aggregate;
mod helpers;
mod types;

pub use aggregate::AggregatedErrors;
pub(crate) use aggregate::fold_errors;
pub(crate) use helpers::{access_error, decode_error, invalid_config, unavailable_error};
pub use types::ConfigError;

use std::sync::Arc;

/// Result alias carrying shared configuration errors.
///
/// Errors are wrapped in [`Arc`] so one failure can be reported against a
/// tier and also collected into an [`AggregatedErrors`] without cloning the
/// underlying error.
pub type ConfigResult<T> = Result<T, Arc<ConfigError>>;

#[cfg(test)]
mod tests;
