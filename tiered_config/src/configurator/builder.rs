//! Builder for [`Configurator`].
//!
//! The builder collects the application identity, optional qualifiers,
//! behaviour-flag overrides, and per-tier source overrides, then resolves
//! settings and paths exactly once in [`ConfiguratorBuilder::build`].

use camino::Utf8PathBuf;
use serde_json::Value;

use crate::error::invalid_config;
use crate::paths::PathResolver;
use crate::settings::{Settings, SettingsOverrides};
use crate::source::{ConfigSource, FileSource, Format, HttpSource};
use crate::{ConfigResult, Mapping, Tier, merge};

use super::Configurator;

/// Replaces a tier's default file-at-resolved-path source.
#[derive(Debug, Clone)]
enum SourceSpec {
    /// File source at an explicit path.
    Path(Utf8PathBuf),
    /// Read-only HTTP source.
    Remote { url: String, format: Format },
}

/// Builder for [`Configurator`].
///
/// # Examples
///
/// ```rust,no_run
/// use tiered_config::Configurator;
///
/// # fn run() -> tiered_config::ConfigResult<()> {
/// let cfg = Configurator::builder("moapp")
///     .environment("prod")
///     .system_override(true)
///     .default("server", "test.example.com")
///     .build()?;
/// # let _ = cfg;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfiguratorBuilder {
    name: String,
    environment: Option<String>,
    version: Option<String>,
    env_prefix: Option<String>,
    defaults: Mapping,
    overrides: SettingsOverrides,
    sources: [Option<SourceSpec>; 3],
}

impl ConfiguratorBuilder {
    /// Creates a builder for the application `name`.
    ///
    /// The name determines filenames, tier subdirectories, and the default
    /// environment-variable prefix.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            environment: None,
            version: None,
            env_prefix: None,
            defaults: Mapping::new(),
            overrides: SettingsOverrides::default(),
            sources: [None, None, None],
        }
    }

    /// Appends an environment segment to the system and user tier paths.
    #[must_use]
    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Appends a version segment to the user tier path only.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Overrides the filename extension (default `yml`).
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.overrides.extension = Some(extension.into());
        self
    }

    /// Overrides the environment-variable prefix (default: the uppercased
    /// application name).
    #[must_use]
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Seeds one default key/value pair, set-if-absent at construction.
    #[must_use]
    pub fn default(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    /// Replaces the full defaults mapping.
    #[must_use]
    pub fn defaults(mut self, defaults: Mapping) -> Self {
        self.defaults = defaults;
        self
    }

    /// Read and merge sources during `build()` (default true).
    #[must_use]
    pub const fn update_at_init(mut self, enabled: bool) -> Self {
        self.overrides.update_at_init = Some(enabled);
        self
    }

    /// Re-apply the system tier after local so system wins conflicts
    /// (default false).
    #[must_use]
    pub const fn system_override(mut self, enabled: bool) -> Self {
        self.overrides.system_override = Some(enabled);
        self
    }

    /// Read and write the local tier at all (default true).
    #[must_use]
    pub const fn load_local(mut self, enabled: bool) -> Self {
        self.overrides.load_local = Some(enabled);
        self
    }

    /// Dot-prefix the local tier's filename (default true).
    #[must_use]
    pub const fn hidden_local(mut self, enabled: bool) -> Self {
        self.overrides.hidden_local = Some(enabled);
        self
    }

    /// Binds `tier` to a file at an explicit path instead of the resolved
    /// platform location.
    #[must_use]
    pub fn source_path(mut self, tier: Tier, path: impl Into<Utf8PathBuf>) -> Self {
        self.sources[tier.index()] = Some(SourceSpec::Path(path.into()));
        self
    }

    /// Binds `tier` to a read-only HTTP endpoint.
    #[must_use]
    pub fn remote_source(mut self, tier: Tier, url: impl Into<String>, format: Format) -> Self {
        self.sources[tier.index()] = Some(SourceSpec::Remote {
            url: url.into(),
            format,
        });
        self
    }

    /// Resolves settings and paths, binds the three sources, seeds defaults,
    /// and — unless `update_at_init` is disabled — reads and merges every
    /// tier.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an empty name or extension, and
    /// propagates read errors from the initial read pass.
    pub fn build(self) -> ConfigResult<Configurator> {
        let name = self.name.trim().to_owned();
        if name.is_empty() {
            return Err(invalid_config("application name must not be empty"));
        }
        let prefix = self.env_prefix.unwrap_or_else(|| default_prefix(&name));
        let settings = Settings::resolve(&prefix, self.overrides);
        if settings.extension.trim().is_empty() {
            return Err(invalid_config("file extension must not be empty"));
        }
        tracing::debug!(%name, %prefix, ?settings, "configurator settings resolved");

        let resolver = PathResolver::new(prefix);
        let environment = self.environment.as_deref();
        let version = self.version.as_deref();
        let default_format = Format::from_extension(&settings.extension);

        let [system_spec, user_spec, local_spec] = self.sources;
        let system = bind_source(Tier::System, system_spec, default_format, || {
            let dir = resolver.system_dir(&name, environment);
            PathResolver::file_path(&dir, &name, &settings.extension, false)
        })?;
        let user = bind_source(Tier::User, user_spec, default_format, || {
            let dir = resolver.user_dir(&name, environment, version);
            PathResolver::file_path(&dir, &name, &settings.extension, false)
        })?;
        let local = bind_source(Tier::Local, local_spec, default_format, || {
            let dir = resolver.local_dir();
            PathResolver::file_path(&dir, &name, &settings.extension, settings.hidden_local)
        })?;

        let mut obj = Mapping::new();
        for (key, value) in self.defaults.clone() {
            merge::set_if_absent(&mut obj, &key, value);
        }

        let mut configurator = Configurator {
            name,
            environment: self.environment,
            version: self.version,
            settings,
            defaults: self.defaults,
            system,
            user,
            local,
            obj,
        };
        if configurator.settings.update_at_init {
            configurator.read()?;
            configurator.update();
        }
        Ok(configurator)
    }
}

/// Environment prefix derived from the application name: uppercased, with
/// anything outside `[A-Za-z0-9]` mapped to an underscore.
fn default_prefix(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn bind_source(
    tier: Tier,
    spec: Option<SourceSpec>,
    default_format: Format,
    resolve: impl FnOnce() -> Utf8PathBuf,
) -> ConfigResult<ConfigSource> {
    match spec {
        Some(SourceSpec::Remote { url, format }) => {
            Ok(ConfigSource::Http(HttpSource::new(tier, url, format)?))
        }
        Some(SourceSpec::Path(path)) => {
            let format = path
                .extension()
                .map_or(default_format, Format::from_extension);
            Ok(ConfigSource::File(FileSource::new(tier, path, format)))
        }
        None => Ok(ConfigSource::File(FileSource::new(
            tier,
            resolve(),
            default_format,
        ))),
    }
}
