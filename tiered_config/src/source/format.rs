//! Serialization codecs for source payloads.

use std::error::Error;

use crate::Mapping;

pub(crate) type CodecError = Box<dyn Error + Send + Sync>;

/// Wire format for a source's contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// YAML document (the default for configuration files).
    #[default]
    Yaml,
    /// JSON document.
    Json,
}

impl Format {
    /// Selects the format matching a filename extension.
    ///
    /// Anything that is not recognisably JSON decodes as YAML; YAML is a
    /// superset of JSON, so `.cfg` and friends still parse either way.
    #[must_use]
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Yaml
        }
    }

    /// MIME type for documents in this format.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Yaml => "application/yaml",
            Self::Json => "application/json",
        }
    }

    /// Decode a document into a mapping.
    ///
    /// Empty and null documents decode to an empty mapping in both formats;
    /// any other non-mapping top level is a decode failure.
    pub(crate) fn decode(self, text: &str) -> Result<Mapping, CodecError> {
        if text.trim().is_empty() {
            return Ok(Mapping::new());
        }
        let decoded: Option<Mapping> = match self {
            Self::Yaml => serde_yaml_ng::from_str(text)?,
            Self::Json => serde_json::from_str(text)?,
        };
        Ok(decoded.unwrap_or_default())
    }

    /// Encode a mapping for persistence.
    pub(crate) fn encode(self, mapping: &Mapping) -> Result<String, CodecError> {
        match self {
            Self::Yaml => Ok(serde_yaml_ng::to_string(mapping)?),
            Self::Json => {
                let mut text = serde_json::to_string_pretty(mapping)?;
                text.push('\n');
                Ok(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn yaml_decodes_nested_mapping() {
        let mapping = Format::Yaml
            .decode("server: test.example.com\nnested:\n  port: 8080\n")
            .expect("valid yaml");
        assert_eq!(mapping.get("server"), Some(&json!("test.example.com")));
        assert_eq!(mapping.get("nested"), Some(&json!({"port": 8080})));
    }

    #[test]
    fn empty_and_null_documents_decode_to_empty_mapping() {
        for text in ["", "   \n", "null", "~"] {
            let mapping = Format::Yaml.decode(text).expect("empty document");
            assert!(mapping.is_empty(), "expected empty mapping for {text:?}");
        }
        for text in ["  ", "null"] {
            let mapping = Format::Json.decode(text).expect("empty document");
            assert!(mapping.is_empty(), "expected empty mapping for {text:?}");
        }
    }

    #[test]
    fn scalar_top_level_is_a_decode_failure() {
        assert!(Format::Yaml.decode("just a string").is_err());
        assert!(Format::Json.decode("[1, 2, 3]").is_err());
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let mut mapping = crate::Mapping::new();
        mapping.insert("k".to_owned(), json!({"a": [1, 2], "b": true}));
        for format in [Format::Yaml, Format::Json] {
            let text = format.encode(&mapping).expect("encode");
            let decoded = format.decode(&text).expect("decode");
            assert_eq!(decoded, mapping, "round trip failed for {format:?}");
        }
    }

    #[test]
    fn extension_selects_json_case_insensitively() {
        assert_eq!(Format::from_extension("json"), Format::Json);
        assert_eq!(Format::from_extension("JSON"), Format::Json);
        assert_eq!(Format::from_extension("yml"), Format::Yaml);
        assert_eq!(Format::from_extension("cfg"), Format::Yaml);
    }
}
