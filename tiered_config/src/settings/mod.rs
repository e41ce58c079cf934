//! Immutable behaviour flags resolved once per configurator.
//!
//! Flags are resolved at construction with documented precedence: a builder
//! argument wins over a `{PREFIX}_*` environment variable, which wins over
//! the built-in default. The resolved value never changes afterwards.

/// Default filename suffix for configuration files.
pub(crate) const DEFAULT_EXTENSION: &str = "yml";

/// Resolved behaviour flags for a [`crate::Configurator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Filename suffix for configuration files (env: `{PREFIX}_EXTENSION`).
    pub extension: String,
    /// Read and merge sources during `build()` (env:
    /// `{PREFIX}_UPDATE_CFG_AT_INIT`, default true).
    pub update_at_init: bool,
    /// Re-apply the system tier after local so system values win conflicts
    /// (env: `{PREFIX}_SYSTEM_OVERRIDE`, default false).
    pub system_override: bool,
    /// Read and write the local tier at all (env: `{PREFIX}_LOCAL_FILE_READ`,
    /// default true).
    pub load_local: bool,
    /// Dot-prefix the local tier's filename (env:
    /// `{PREFIX}_LOCAL_FILE_HIDDEN`, default true).
    pub hidden_local: bool,
}

/// Caller-supplied overrides collected by the builder; `None` falls through
/// to the environment and then the default.
#[derive(Debug, Clone, Default)]
pub(crate) struct SettingsOverrides {
    pub extension: Option<String>,
    pub update_at_init: Option<bool>,
    pub system_override: Option<bool>,
    pub load_local: Option<bool>,
    pub hidden_local: Option<bool>,
}

impl Settings {
    pub(crate) fn resolve(prefix: &str, overrides: SettingsOverrides) -> Self {
        Self {
            extension: overrides
                .extension
                .or_else(|| env_string(prefix, "EXTENSION"))
                .unwrap_or_else(|| DEFAULT_EXTENSION.to_owned()),
            update_at_init: overrides
                .update_at_init
                .unwrap_or_else(|| env_flag(prefix, "UPDATE_CFG_AT_INIT", true)),
            system_override: overrides
                .system_override
                .unwrap_or_else(|| env_flag(prefix, "SYSTEM_OVERRIDE", false)),
            load_local: overrides
                .load_local
                .unwrap_or_else(|| env_flag(prefix, "LOCAL_FILE_READ", true)),
            hidden_local: overrides
                .hidden_local
                .unwrap_or_else(|| env_flag(prefix, "LOCAL_FILE_HIDDEN", true)),
        }
    }
}

fn env_string(prefix: &str, key: &str) -> Option<String> {
    std::env::var(format!("{prefix}_{key}"))
        .ok()
        .filter(|value| !value.is_empty())
}

fn env_flag(prefix: &str, key: &str, default: bool) -> bool {
    env_string(prefix, key)
        .and_then(|raw| parse_flag(&raw))
        .unwrap_or(default)
}

/// Recognises `1/0`, `true/false`, `yes/no`, and `on/off`,
/// case-insensitively; anything else falls back to the default.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
