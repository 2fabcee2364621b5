use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use crate::error::CheckError;

pub const VERSION_KEY: &str = "CFBundleShortVersionString";
pub const IDENTIFIER_KEY: &str = "CFBundleIdentifier";
pub const DISPLAY_NAME_KEY: &str = "CFBundleName";

/// Key-value view of the local application metadata.
pub trait MetadataSource {
    fn get_value(&self, key: &str) -> Option<String>;
}

impl MetadataSource for HashMap<String, String> {
    fn get_value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Snapshot of the installed application, read at the start of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledVersionInfo {
    pub version: String,
    pub bundle_identifier: String,
    pub display_name: String,
}

impl InstalledVersionInfo {
    /// Read the installed version, identifier, and display name.
    ///
    /// The display name falls back to the identifier when absent.
    ///
    /// # Errors
    /// Returns [`CheckError::InvalidLocalMetadata`] when the version or the
    /// identifier is missing or empty.
    pub fn read(source: &impl MetadataSource) -> Result<Self, CheckError> {
        let version = required(source, VERSION_KEY)?;
        let bundle_identifier = required(source, IDENTIFIER_KEY)?;
        let display_name = source
            .get_value(DISPLAY_NAME_KEY)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| bundle_identifier.clone());

        Ok(Self {
            version,
            bundle_identifier,
            display_name,
        })
    }
}

fn required(source: &impl MetadataSource, key: &'static str) -> Result<String, CheckError> {
    source
        .get_value(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(CheckError::InvalidLocalMetadata { key })
}

#[derive(Debug, Error)]
pub enum MetadataFileError {
    #[error("failed to read metadata file: {0}")]
    Read(#[source] std::io::Error),
    #[error("failed to parse metadata file: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Metadata loaded from a flat JSON object. Non-string values are ignored.
#[derive(Debug, Clone, Default)]
pub struct JsonMetadataFile {
    values: HashMap<String, String>,
}

impl JsonMetadataFile {
    /// Load metadata from `path`.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read or is not a JSON object.
    pub fn load(path: &Path) -> Result<Self, MetadataFileError> {
        let content = std::fs::read_to_string(path).map_err(MetadataFileError::Read)?;
        Self::from_json(&content)
    }

    /// Parse metadata from a JSON document.
    ///
    /// # Errors
    /// Returns an error when `content` is not a JSON object.
    pub fn from_json(content: &str) -> Result<Self, MetadataFileError> {
        let raw: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(content).map_err(MetadataFileError::Parse)?;

        let values = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(value) => Some((key, value)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }
}

impl MetadataSource for JsonMetadataFile {
    fn get_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}
