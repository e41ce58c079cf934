//! Tier identifiers for the three configuration layers.

use std::fmt;

/// One of the three configuration layers, in ascending precedence order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// System-wide configuration, lowest source precedence.
    System,
    /// Per-user configuration.
    User,
    /// Working-directory configuration, highest precedence by default.
    Local,
}

impl Tier {
    /// All tiers in fixed read and merge order.
    pub const ALL: [Self; 3] = [Self::System, Self::User, Self::Local];

    /// Stable lowercase label used in logs and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Local => "local",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::System => 0,
            Self::User => 1,
            Self::Local => 2,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
