//! The merge engine owning the three tier sources.
//!
//! A [`Configurator`] drives the read pipeline and folds each tier's mapping
//! into one unified configuration object. The precedence contract: default
//! values are the lowest priority, then system, then user, then local (local
//! wins by default); enabling `system_override` re-applies the system tier
//! after local, so system values win conflicts while user- and local-only
//! keys remain present.

use std::sync::Arc;

use crate::error::{ConfigError, fold_errors};
use crate::settings::Settings;
use crate::source::ConfigSource;
use crate::{ConfigResult, Mapping, Tier, merge};

mod builder;

pub use builder::ConfiguratorBuilder;

/// Layered configuration resolver for one application.
///
/// Constructed once per process via [`Configurator::builder`]; sources are
/// bound during construction and never swapped afterwards. Not safe for
/// concurrent use from multiple threads without external locking.
#[derive(Debug, Clone)]
pub struct Configurator {
    name: String,
    environment: Option<String>,
    version: Option<String>,
    settings: Settings,
    defaults: Mapping,
    system: ConfigSource,
    user: ConfigSource,
    local: ConfigSource,
    obj: Mapping,
}

impl Configurator {
    /// Creates a builder initialised for the application `name`.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> ConfiguratorBuilder {
        ConfiguratorBuilder::new(name)
    }

    /// Application name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional environment qualifier appended to tier directories.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Optional version qualifier appended to the user tier directory.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Resolved behaviour flags, immutable for this configurator's lifetime.
    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Caller-supplied defaults, applied once at construction.
    #[must_use]
    pub const fn defaults(&self) -> &Mapping {
        &self.defaults
    }

    /// Configuration filename for the system and user tiers.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}.{}", self.name, self.settings.extension)
    }

    /// The unified configuration mapping.
    #[must_use]
    pub const fn obj(&self) -> &Mapping {
        &self.obj
    }

    /// System tier source.
    #[must_use]
    pub const fn system(&self) -> &ConfigSource {
        &self.system
    }

    /// User tier source.
    #[must_use]
    pub const fn user(&self) -> &ConfigSource {
        &self.user
    }

    /// Local tier source.
    #[must_use]
    pub const fn local(&self) -> &ConfigSource {
        &self.local
    }

    /// Source backing `tier`.
    #[must_use]
    pub const fn source(&self, tier: Tier) -> &ConfigSource {
        match tier {
            Tier::System => &self.system,
            Tier::User => &self.user,
            Tier::Local => &self.local,
        }
    }

    const fn source_mut(&mut self, tier: Tier) -> &mut ConfigSource {
        match tier {
            Tier::System => &mut self.system,
            Tier::User => &mut self.user,
            Tier::Local => &mut self.local,
        }
    }

    /// Reads every tier's source in fixed order: system, user, local.
    ///
    /// Unreadable sources are skipped (their mapping stays at its prior
    /// value, an empty mapping when never read), and the local tier is also
    /// skipped when `load_local` is disabled. One tier's failure never
    /// prevents the remaining tiers from being attempted.
    ///
    /// # Errors
    ///
    /// Returns the single tier's error, or an aggregate attributing each
    /// failed tier, after all tiers have been attempted.
    pub fn read(&mut self) -> ConfigResult<()> {
        let load_local = self.settings.load_local;
        let mut errors: Vec<Arc<ConfigError>> = Vec::new();
        for tier in Tier::ALL {
            if tier == Tier::Local && !load_local {
                tracing::debug!("local tier disabled, skipping read");
                continue;
            }
            let source = self.source_mut(tier);
            if !source.is_readable() {
                tracing::debug!(%tier, location = source.location(), "source not readable, skipped");
                continue;
            }
            if let Err(err) = source.read() {
                tracing::warn!(%tier, error = %err, "source read failed");
                errors.push(err);
            }
        }
        tracing::info!("configuration sources read");
        fold_errors(errors)
    }

    /// Folds each tier's mapping into the unified mapping in fixed order:
    /// system, user, local, each overwriting colliding keys.
    ///
    /// With `system_override` enabled, the system tier is applied one more
    /// time after local, so system values win conflicts while keys unique to
    /// user or local stay present. Re-running without re-reading sources is
    /// idempotent.
    pub fn update(&mut self) {
        merge::merge_into(&mut self.obj, self.system.mapping());
        merge::merge_into(&mut self.obj, self.user.mapping());
        merge::merge_into(&mut self.obj, self.local.mapping());
        if self.settings.system_override {
            merge::merge_into(&mut self.obj, self.system.mapping());
        }
        tracing::info!(keys = self.obj.len(), "unified configuration updated");
    }

    /// Copies the unified mapping into `tier`'s source so a subsequent
    /// [`write`](Self::write) persists it.
    ///
    /// Without staging, `write` persists exactly what each source last read;
    /// in-memory changes to the unified mapping are never distributed
    /// automatically.
    pub fn stage(&mut self, tier: Tier) {
        let unified = self.obj.clone();
        self.source_mut(tier).set_mapping(unified);
    }

    /// Writes every writable tier's source in fixed order: system, user,
    /// local, mirroring the read gating (local requires `load_local`).
    ///
    /// Each source persists its own mapping; see [`stage`](Self::stage) for
    /// pushing unified state down to a tier first.
    ///
    /// # Errors
    ///
    /// Returns the single tier's error, or an aggregate attributing each
    /// failed tier, after all writable tiers have been attempted.
    pub fn write(&self) -> ConfigResult<()> {
        let mut errors: Vec<Arc<ConfigError>> = Vec::new();
        for tier in Tier::ALL {
            if tier == Tier::Local && !self.settings.load_local {
                tracing::debug!("local tier disabled, skipping write");
                continue;
            }
            let source = self.source(tier);
            if !source.is_writable() {
                tracing::debug!(%tier, location = source.location(), "source not writable, skipped");
                continue;
            }
            if let Err(err) = source.write() {
                tracing::warn!(%tier, error = %err, "source write failed");
                errors.push(err);
            }
        }
        tracing::info!("configuration sources written");
        fold_errors(errors)
    }
}
