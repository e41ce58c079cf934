//! Error constructors shared by source implementations.

use std::error::Error;
use std::sync::Arc;

use crate::tier::Tier;

use super::ConfigError;

pub(crate) fn access_error(
    tier: Tier,
    location: &str,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ConfigError> {
    Arc::new(ConfigError::SourceAccess {
        tier,
        location: location.to_owned(),
        source: err.into(),
    })
}

pub(crate) fn decode_error(
    tier: Tier,
    location: &str,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ConfigError> {
    Arc::new(ConfigError::SourceDecode {
        tier,
        location: location.to_owned(),
        source: err.into(),
    })
}

pub(crate) fn unavailable_error(
    tier: Tier,
    location: &str,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<ConfigError> {
    Arc::new(ConfigError::SourceUnavailable {
        tier,
        location: location.to_owned(),
        source: err.into(),
    })
}

pub(crate) fn invalid_config(message: impl Into<String>) -> Arc<ConfigError> {
    Arc::new(ConfigError::InvalidConfig {
        message: message.into(),
    })
}
