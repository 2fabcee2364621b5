use serde::Deserialize;
use std::path::{Path, PathBuf};
use storecheck_core::{
    Channel, ChannelEndpoints, DEFAULT_PRE_RELEASE_BASE, DEFAULT_STORE_LOOKUP_BASE,
    DEFAULT_STORE_REGION, VersionOrdering,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub channel: Channel,

    #[serde(default = "default_store_region")]
    pub store_region: String,

    #[serde(default = "default_store_lookup_base")]
    pub store_lookup_base: String,

    #[serde(default = "default_pre_release_base")]
    pub pre_release_base: String,

    #[serde(default = "default_true")]
    pub reject_error_status: bool,

    #[serde(default)]
    pub credential: Option<String>,

    #[serde(default)]
    pub mandatory: bool,

    #[serde(default)]
    pub ordering: VersionOrdering,

    #[serde(default)]
    pub metadata_file: Option<PathBuf>,

    #[serde(default = "default_http_timeout")]
    pub http_timeout_secs: u64,

    #[serde(default)]
    pub open_download_url: bool,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,
}

fn default_true() -> bool {
    true
}

fn default_store_region() -> String {
    DEFAULT_STORE_REGION.to_string()
}

fn default_store_lookup_base() -> String {
    DEFAULT_STORE_LOOKUP_BASE.to_string()
}

fn default_pre_release_base() -> String {
    DEFAULT_PRE_RELEASE_BASE.to_string()
}

fn default_http_timeout() -> u64 {
    10
}

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            channel: Channel::default(),
            store_region: default_store_region(),
            store_lookup_base: default_store_lookup_base(),
            pre_release_base: default_pre_release_base(),
            reject_error_status: true,
            credential: None,
            mandatory: false,
            ordering: VersionOrdering::default(),
            metadata_file: None,
            http_timeout_secs: default_http_timeout(),
            open_download_url: false,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
        }
    }
}

impl AppSettings {
    /// Read settings from `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring invalid settings file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn endpoints(&self) -> ChannelEndpoints {
        ChannelEndpoints {
            store_lookup_base: self.store_lookup_base.clone(),
            store_region: self.store_region.clone(),
            pre_release_base: self.pre_release_base.clone(),
            reject_error_status: self.reject_error_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use storecheck_core::{Channel, VersionOrdering};

    use super::AppSettings;

    #[test]
    fn defaults_match_expected_values() {
        let settings = AppSettings::default();

        assert_eq!(settings.channel, Channel::PrimaryStore);
        assert_eq!(settings.store_region, "us");
        assert_eq!(settings.ordering, VersionOrdering::Lexicographic);
        assert!(settings.reject_error_status);
        assert_eq!(settings.http_timeout_secs, 10);
        assert_eq!(settings.max_log_size_bytes, 5 * 1024 * 1024);
        assert!(!settings.open_download_url);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let value = json!({
            "channel": "pre_release_track",
            "credential": "jwt-token",
            "mandatory": true,
            "ordering": "semantic"
        });

        let settings: AppSettings =
            serde_json::from_value(value).expect("settings JSON should deserialize");

        assert_eq!(settings.channel, Channel::PreReleaseTrack);
        assert_eq!(settings.credential.as_deref(), Some("jwt-token"));
        assert!(settings.mandatory);
        assert_eq!(settings.ordering, VersionOrdering::Semantic);
        assert_eq!(settings.store_region, "us");
        assert_eq!(settings.http_timeout_secs, 10);
    }

    #[test]
    fn endpoints_carry_configured_values() {
        let settings = AppSettings {
            store_region: "br".to_string(),
            reject_error_status: false,
            ..AppSettings::default()
        };

        let endpoints = settings.endpoints();

        assert_eq!(endpoints.store_region, "br");
        assert!(!endpoints.reject_error_status);
    }

    #[test]
    fn load_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let missing = AppSettings::load(&temp_dir.path().join("settings.json"));
        assert_eq!(missing.store_region, "us");

        let invalid_path = temp_dir.path().join("invalid.json");
        std::fs::write(&invalid_path, "{not json").expect("settings file should be written");
        let invalid = AppSettings::load(&invalid_path);
        assert_eq!(invalid.channel, Channel::PrimaryStore);
    }

    #[test]
    fn load_reads_existing_file() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{"store_region": "br", "metadata_file": "/tmp/Info.json"}"#)
            .expect("settings file should be written");

        let settings = AppSettings::load(&path);

        assert_eq!(settings.store_region, "br");
        assert_eq!(
            settings.metadata_file.as_deref(),
            Some(std::path::Path::new("/tmp/Info.json"))
        );
    }
}
