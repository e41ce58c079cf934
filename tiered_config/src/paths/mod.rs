//! Tier directory and file resolution.
//!
//! The resolver computes the platform-appropriate directory for each tier
//! from the application name, optional environment/version qualifiers, and
//! `{PREFIX}_*` environment overrides. It never checks that a path exists;
//! existence is a source concern.

use std::path::PathBuf;

use camino::{Utf8Path, Utf8PathBuf};

/// Computes per-tier configuration directories, honouring `{PREFIX}_*`
/// environment overrides.
///
/// All methods are pure functions of their inputs and the process
/// environment: the same inputs produce the same path for as long as the
/// environment is unchanged.
#[derive(Debug, Clone)]
pub struct PathResolver {
    prefix: String,
}

impl PathResolver {
    /// Creates a resolver scoped to `prefix` for environment overrides.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn env_dir(&self, key: &str) -> Option<Utf8PathBuf> {
        std::env::var_os(format!("{}_{key}", self.prefix))
            .filter(|value| !value.is_empty())
            .map(|value| utf8_path(PathBuf::from(value)))
    }

    /// System tier directory: `{PREFIX}_SYSTEM_CONFIG`, else the OS system
    /// configuration root, joined with `name` and `environment`.
    #[must_use]
    pub fn system_dir(&self, name: &str, environment: Option<&str>) -> Utf8PathBuf {
        let base = self
            .env_dir("SYSTEM_CONFIG")
            .unwrap_or_else(system_config_root);
        join_segments(base, [Some(name), environment])
    }

    /// User tier directory: `{PREFIX}_USER_CONFIG`, else the XDG-style user
    /// configuration root, joined with `name`, `environment`, and `version`.
    ///
    /// `version` qualifies only this tier.
    #[must_use]
    pub fn user_dir(
        &self,
        name: &str,
        environment: Option<&str>,
        version: Option<&str>,
    ) -> Utf8PathBuf {
        let base = self.env_dir("USER_CONFIG").unwrap_or_else(user_config_root);
        join_segments(base, [Some(name), environment, version])
    }

    /// Local tier directory: `{PREFIX}_LOCAL_CONFIG`, else the process
    /// working directory, unqualified.
    #[must_use]
    pub fn local_dir(&self) -> Utf8PathBuf {
        self.env_dir("LOCAL_CONFIG").unwrap_or_else(|| {
            std::env::current_dir()
                .map(utf8_path)
                .unwrap_or_else(|_| Utf8PathBuf::from("."))
        })
    }

    /// Joins `dir` and the configuration filename, dot-prefixed when
    /// `hidden` is true.
    #[must_use]
    pub fn file_path(dir: &Utf8Path, name: &str, extension: &str, hidden: bool) -> Utf8PathBuf {
        let filename = if hidden {
            format!(".{name}.{extension}")
        } else {
            format!("{name}.{extension}")
        };
        dir.join(filename)
    }
}

fn join_segments<'a>(
    mut dir: Utf8PathBuf,
    segments: impl IntoIterator<Item = Option<&'a str>>,
) -> Utf8PathBuf {
    for segment in segments.into_iter().flatten() {
        dir.push(segment);
    }
    dir
}

#[cfg(windows)]
fn system_config_root() -> Utf8PathBuf {
    std::env::var_os("PROGRAMDATA")
        .filter(|value| !value.is_empty())
        .map(|value| utf8_path(PathBuf::from(value)))
        .unwrap_or_else(|| Utf8PathBuf::from("C:\\ProgramData"))
}

#[cfg(not(windows))]
fn system_config_root() -> Utf8PathBuf {
    Utf8PathBuf::from("/etc")
}

fn user_config_root() -> Utf8PathBuf {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        return utf8_path(PathBuf::from(dir));
    }
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(utf8_path)
        .unwrap_or_else(|| Utf8PathBuf::from(".config"))
}

/// Convert an OS path to UTF-8, falling back to lossy conversion.
fn utf8_path(path: PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path)
        .unwrap_or_else(|p| Utf8PathBuf::from(p.to_string_lossy().into_owned()))
}
