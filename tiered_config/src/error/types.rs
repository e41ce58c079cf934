//! Primary error enum for configuration resolution flows.

use thiserror::Error;

use crate::tier::Tier;

use super::aggregate::AggregatedErrors;

/// Errors that can occur while resolving, reading, or writing configuration.
///
/// Absence of an optional tier's file is not an error; sources handle that
/// case locally by producing an empty mapping.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Caller supplied an invalid name or extension.
    #[error("invalid configurator setup: {message}")]
    InvalidConfig {
        /// Human-readable explanation of the invalid argument.
        message: String,
    },

    /// The backing store exists but could not be accessed.
    #[error("{tier} source '{location}': {source}")]
    SourceAccess {
        /// Tier whose source failed.
        tier: Tier,
        /// Resolved path or URI of the source.
        location: String,
        /// Underlying accessibility failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The source contents could not be decoded, or a mapping could not be
    /// encoded for writing.
    #[error("{tier} source '{location}' holds malformed content: {source}")]
    SourceDecode {
        /// Tier whose source failed.
        tier: Tier,
        /// Resolved path or URI of the source.
        location: String,
        /// Underlying codec failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A remote source was unreachable or timed out.
    #[error("{tier} source '{location}' is unavailable: {source}")]
    SourceUnavailable {
        /// Tier whose source failed.
        tier: Tier,
        /// URI of the remote source.
        location: String,
        /// Underlying transport failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Multiple errors occurred while reading or writing sources.
    #[error("multiple configuration errors:\n{0}")]
    Aggregate(AggregatedErrors),
}
