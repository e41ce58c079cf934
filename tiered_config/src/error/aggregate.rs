//! Aggregation of per-tier failures from a read or write pass.

use std::{error::Error, fmt, sync::Arc};

use super::{ConfigError, ConfigResult};

/// Per-tier failures collected during a single read or write pass.
///
/// One tier's failure never prevents the remaining tiers from being
/// attempted; each error stays attributed to its tier and location, in
/// tier order.
#[derive(Debug)]
pub struct AggregatedErrors {
    errors: Vec<Arc<ConfigError>>,
}

impl AggregatedErrors {
    pub(crate) fn new(errors: Vec<Arc<ConfigError>>) -> Self {
        Self { errors }
    }

    /// The collected errors, in tier order.
    #[must_use]
    pub fn errors(&self) -> &[Arc<ConfigError>] {
        &self.errors
    }

    /// Number of errors collected.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// True when no errors were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for AggregatedErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut separator = "";
        for (index, error) in self.errors.iter().enumerate() {
            write!(f, "{separator}{}. {error}", index + 1)?;
            separator = "\n";
        }
        Ok(())
    }
}

impl Error for AggregatedErrors {}

/// Finishes an error-collecting pass over the tiers.
///
/// No errors is success. A single error is returned as-is, so callers see
/// the tier-attributed variant directly; two or more are wrapped in
/// [`ConfigError::Aggregate`] preserving tier order.
pub(crate) fn fold_errors(mut errors: Vec<Arc<ConfigError>>) -> ConfigResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(Arc::new(ConfigError::Aggregate(AggregatedErrors::new(
            errors,
        )))),
    }
}
