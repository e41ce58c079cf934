//! Read-only HTTP-backed configuration sources.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;

use crate::error::{access_error, decode_error, unavailable_error};
use crate::{ConfigResult, Mapping, Tier};

use super::Format;

/// Timeout applied to both the readability probe and the fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A tier's backing store behind an HTTP endpoint.
///
/// Remote sources are always read-only; [`write`](Self::write) fails
/// unconditionally.
#[derive(Debug, Clone)]
pub struct HttpSource {
    tier: Tier,
    location: String,
    format: Format,
    mapping: Mapping,
    metadata: Mapping,
    client: Client,
}

impl HttpSource {
    /// Creates a source for `tier` fetching from the URL `location`.
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` when the HTTP client cannot be built.
    pub fn new(tier: Tier, location: impl Into<String>, format: Format) -> ConfigResult<Self> {
        let location = location.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| unavailable_error(tier, &location, err))?;
        Ok(Self {
            tier,
            location,
            format,
            mapping: Mapping::new(),
            metadata: Mapping::new(),
            client,
        })
    }

    /// Tier this source backs.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// URL fetched by [`read`](Self::read).
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Wire format expected from the endpoint.
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

    /// Provenance fields; unused for remote sources but kept symmetric with
    /// file sources.
    #[must_use]
    pub const fn metadata(&self) -> &Mapping {
        &self.metadata
    }

    /// Replaces the metadata mapping.
    pub fn set_metadata(&mut self, metadata: Mapping) {
        self.metadata = metadata;
    }

    /// True iff a HEAD probe against the endpoint succeeds.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.client
            .head(&self.location)
            .send()
            .is_ok_and(|response| response.status().is_success())
    }

    /// Remote sources never accept writes.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        false
    }

    /// GET request for the endpoint. JSON requests advertise the expected
    /// content type via `Accept`; YAML requests are plain GETs.
    fn fetch_request(&self) -> RequestBuilder {
        let request = self.client.get(&self.location);
        match self.format {
            Format::Json => request.header(ACCEPT, self.format.content_type()),
            Format::Yaml => request,
        }
    }

    /// Replaces the mapping with the decoded response body.
    ///
    /// A failed fetch or decode leaves the prior mapping untouched.
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` when the endpoint is unreachable, times
    /// out, or answers with an error status, and `SourceDecode` when the
    /// body is malformed.
    pub fn read(&mut self) -> ConfigResult<()> {
        let response = self
            .fetch_request()
            .send()
            .and_then(Response::error_for_status)
            .map_err(|err| unavailable_error(self.tier, &self.location, err))?;
        let text = response
            .text()
            .map_err(|err| unavailable_error(self.tier, &self.location, err))?;
        let decoded = self
            .format
            .decode(&text)
            .map_err(|err| decode_error(self.tier, &self.location, err))?;
        self.mapping = decoded;
        tracing::debug!(tier = %self.tier, location = %self.location, "remote source read");
        Ok(())
    }

    /// Always fails: the read-only contract rejects writes.
    ///
    /// # Errors
    ///
    /// Returns `SourceAccess` unconditionally.
    pub fn write(&self) -> ConfigResult<()> {
        Err(access_error(
            self.tier,
            &self.location,
            std::io::Error::new(
                std::io::ErrorKind::Unsupported,
                "HTTP sources are read-only",
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_requests_advertise_the_expected_content_type() {
        let source = HttpSource::new(Tier::User, "http://127.0.0.1:9/config.json", Format::Json)
            .expect("client builds without network access");
        let request = source.fetch_request().build().expect("build request");
        assert_eq!(
            request.headers().get(ACCEPT).and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn yaml_requests_carry_no_accept_header() {
        let source = HttpSource::new(Tier::User, "http://127.0.0.1:9/config.yml", Format::Yaml)
            .expect("client builds without network access");
        let request = source.fetch_request().build().expect("build request");
        assert!(request.headers().get(ACCEPT).is_none());
    }
}
