use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no metadata file configured; pass a path or set `metadata_file` in {settings}")]
    MetadataFileNotConfigured { settings: String },

    #[error("failed to load {path}: {source}")]
    MetadataFile {
        path: PathBuf,
        #[source]
        source: storecheck_core::MetadataFileError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn missing_metadata_file_message_names_settings_path() {
        let error = AppError::MetadataFileNotConfigured {
            settings: "/home/user/.config/storecheck/settings.json".to_string(),
        };

        assert!(
            error
                .to_string()
                .ends_with("in /home/user/.config/storecheck/settings.json")
        );
    }
}
