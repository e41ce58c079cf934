//! File-backed configuration sources.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::NamedTempFile;

use crate::error::{access_error, decode_error};
use crate::merge::merge_into;
use crate::{ConfigResult, Mapping, Tier};

use super::Format;

/// A tier's backing store on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    tier: Tier,
    location: Utf8PathBuf,
    format: Format,
    mapping: Mapping,
    metadata: Mapping,
}

impl FileSource {
    /// Creates a source for `tier` at `location`.
    ///
    /// The mapping stays empty until [`read`](Self::read) succeeds.
    #[must_use]
    pub fn new(tier: Tier, location: impl Into<Utf8PathBuf>, format: Format) -> Self {
        Self {
            tier,
            location: location.into(),
            format,
            mapping: Mapping::new(),
            metadata: Mapping::new(),
        }
    }

    /// Tier this source backs.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Resolved file path.
    #[must_use]
    pub fn location(&self) -> &Utf8Path {
        &self.location
    }

    /// Wire format used for decode and encode.
    #[must_use]
    pub const fn format(&self) -> Format {
        self.format
    }

    /// Contents of the last successful [`read`](Self::read).
    #[must_use]
    pub const fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub(crate) fn set_mapping(&mut self, mapping: Mapping) {
        self.mapping = mapping;
    }

    /// Provenance fields merged over the mapping at write time.
    #[must_use]
    pub const fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Replaces the metadata merged in by [`write`](Self::write).
    pub fn set_metadata(&mut self, metadata: Mapping) {
        self.metadata = metadata;
    }

    /// True iff the path names a regular file the process can open for
    /// reading. A missing file is not an error, just not readable.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.location.is_file() && fs::File::open(&self.location).is_ok()
    }

    /// True iff the file exists and can be opened for writing, or does not
    /// exist but its parent directory does and accepts new entries.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        if self.location.is_file() {
            return fs::OpenOptions::new()
                .append(true)
                .open(&self.location)
                .is_ok();
        }
        if self.location.exists() {
            // Exists but is not a regular file.
            return false;
        }
        self.location.parent().is_some_and(|parent| {
            parent.is_dir()
                && fs::metadata(parent).is_ok_and(|meta| !meta.permissions().readonly())
        })
    }

    /// Replaces the mapping with the decoded contents of the file.
    ///
    /// A missing file yields an empty mapping. A failed read or decode
    /// leaves the prior mapping untouched.
    ///
    /// # Errors
    ///
    /// Returns `SourceAccess` when the file exists but cannot be read and
    /// `SourceDecode` when its contents are malformed.
    pub fn read(&mut self) -> ConfigResult<()> {
        if !self.location.is_file() {
            self.mapping = Mapping::new();
            tracing::debug!(tier = %self.tier, location = %self.location, "source file absent");
            return Ok(());
        }
        let text = fs::read_to_string(&self.location)
            .map_err(|err| access_error(self.tier, self.location.as_str(), err))?;
        let decoded = self
            .format
            .decode(&text)
            .map_err(|err| decode_error(self.tier, self.location.as_str(), err))?;
        self.mapping = decoded;
        tracing::debug!(tier = %self.tier, location = %self.location, "source file read");
        Ok(())
    }

    /// Persists the mapping merged with metadata, creating the parent
    /// directory if missing.
    ///
    /// The document is staged in a temporary file and renamed into place, so
    /// readers never observe a partial write. Should the rename itself fail,
    /// prior contents are not guaranteed to be preserved; persistence is
    /// best-effort, not transactional.
    ///
    /// # Errors
    ///
    /// Returns `SourceAccess` for filesystem failures and `SourceDecode`
    /// when the mapping cannot be encoded.
    pub fn write(&self) -> ConfigResult<()> {
        let parent = self.location.parent().unwrap_or(Utf8Path::new("."));
        fs::create_dir_all(parent)
            .map_err(|err| access_error(self.tier, self.location.as_str(), err))?;

        let mut document = self.mapping.clone();
        merge_into(&mut document, &self.metadata);
        let text = self
            .format
            .encode(&document)
            .map_err(|err| decode_error(self.tier, self.location.as_str(), err))?;

        let mut staged = NamedTempFile::new_in(parent.as_std_path())
            .map_err(|err| access_error(self.tier, self.location.as_str(), err))?;
        staged
            .write_all(text.as_bytes())
            .map_err(|err| access_error(self.tier, self.location.as_str(), err))?;
        staged
            .persist(self.location.as_std_path())
            .map_err(|err| access_error(self.tier, self.location.as_str(), err.error))?;
        tracing::debug!(tier = %self.tier, location = %self.location, "source file written");
        Ok(())
    }
}
