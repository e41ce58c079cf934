//! Polymorphic configuration sources.
//!
//! Sources form a closed set of tagged variants selected at construction
//! time: file-backed YAML or JSON sources and read-only HTTP sources. A
//! configurator binds exactly one source per tier for its lifetime.

use std::fmt;

use crate::{ConfigResult, Mapping, Tier};

mod file;
mod format;
mod http;

pub use file::FileSource;
pub use format::Format;
pub use http::HttpSource;

/// One tier's backing store.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// A file at a resolved path.
    File(FileSource),
    /// A remote endpoint, read-only.
    Http(HttpSource),
}

impl ConfigSource {
    /// Tier this source backs.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        match self {
            Self::File(source) => source.tier(),
            Self::Http(source) => source.tier(),
        }
    }

    /// Resolved path or URI of the source.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::File(source) => source.location().as_str(),
            Self::Http(source) => source.location(),
        }
    }

    /// Wire format used for decode and encode.
    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::File(source) => source.format(),
            Self::Http(source) => source.format(),
        }
    }

    /// Contents of the last successful [`read`](Self::read); empty until one
    /// succeeds.
    #[must_use]
    pub const fn mapping(&self) -> &Mapping {
        match self {
            Self::File(source) => source.mapping(),
            Self::Http(source) => source.mapping(),
        }
    }

    pub(crate) fn set_mapping(&mut self, mapping: Mapping) {
        match self {
            Self::File(source) => source.set_mapping(mapping),
            Self::Http(source) => source.set_mapping(mapping),
        }
    }

    /// Replaces the metadata merged over the mapping at write time.
    pub fn set_metadata(&mut self, metadata: Mapping) {
        match self {
            Self::File(source) => source.set_metadata(metadata),
            Self::Http(source) => source.set_metadata(metadata),
        }
    }

    /// True when the backing store can currently be read.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        match self {
            Self::File(source) => source.is_readable(),
            Self::Http(source) => source.is_readable(),
        }
    }

    /// True when the backing store can currently be written.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        match self {
            Self::File(source) => source.is_writable(),
            Self::Http(source) => source.is_writable(),
        }
    }

    /// Reads the backing store into the mapping.
    ///
    /// # Errors
    ///
    /// Propagates the variant's read failure; see [`FileSource::read`] and
    /// [`HttpSource::read`].
    pub fn read(&mut self) -> ConfigResult<()> {
        match self {
            Self::File(source) => source.read(),
            Self::Http(source) => source.read(),
        }
    }

    /// Persists the mapping merged with metadata to the backing store.
    ///
    /// # Errors
    ///
    /// Propagates the variant's write failure; remote sources always fail.
    pub fn write(&self) -> ConfigResult<()> {
        match self {
            Self::File(source) => source.write(),
            Self::Http(source) => source.write(),
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tier(), self.location())
    }
}
