//! Config document loading
//!
//! Project and package configs are YAML, but a team may keep any layer as
//! JSON or TOML. Every format is read into the same target type so the
//! layered view never has to care which one a layer came from.

use crate::{Error, NormalizedPath, Result, io};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Format::Yaml => "YAML",
            Format::Json => "JSON",
            Format::Toml => "TOML",
        }
    }

    fn parse<T: DeserializeOwned>(&self, content: &str) -> std::result::Result<T, String> {
        match self {
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Format::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Format::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// Reads config documents of any supported format.
///
/// Callers in this workspace deserialize into `serde_yaml::Value`, which
/// JSON and TOML documents map onto without loss for config purposes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Parse the document at `path`, choosing the format by extension
    /// (`yaml`/`yml`, `json`, `toml`).
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let extension = path.extension().unwrap_or_default();
        let format = Format::from_extension(extension).ok_or_else(|| Error::UnsupportedFormat {
            extension: extension.to_string(),
        })?;

        let content = io::read_text(path)?;
        tracing::trace!(%path, format = format.name(), "Parsing config document");

        format.parse(&content).map_err(|message| Error::ConfigParse {
            path: path.to_native(),
            format: format.name().to_string(),
            message,
        })
    }
}
