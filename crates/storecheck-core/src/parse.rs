use serde::Deserialize;

use crate::channel::Channel;
use crate::error::CheckError;

/// Normalized result of a single lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteVersionInfo {
    pub version: String,
    pub download_url: Option<String>,
    pub exists: bool,
}

impl RemoteVersionInfo {
    #[must_use]
    pub fn missing() -> Self {
        Self {
            version: String::new(),
            download_url: None,
            exists: false,
        }
    }
}

#[derive(Deserialize)]
struct StoreLookupResponse {
    results: Vec<StoreApp>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreApp {
    version: String,
    track_view_url: String,
}

#[derive(Deserialize)]
struct BuildsResponse {
    data: Vec<Build>,
}

#[derive(Deserialize)]
struct Build {
    attributes: BuildAttributes,
}

#[derive(Deserialize)]
struct BuildAttributes {
    version: String,
}

/// Decode a channel's raw lookup payload.
///
/// An empty `results`/`data` array is not an error: it yields a record with
/// `exists = false`.
///
/// # Errors
/// Returns [`CheckError::Decode`] when the body is not JSON or lacks the
/// structural keys expected for `channel`.
pub fn parse_response(channel: Channel, body: &[u8]) -> Result<RemoteVersionInfo, CheckError> {
    match channel {
        Channel::PrimaryStore => {
            let response: StoreLookupResponse =
                serde_json::from_slice(body).map_err(CheckError::decode_from)?;
            Ok(response
                .results
                .into_iter()
                .next()
                .map_or_else(RemoteVersionInfo::missing, |app| RemoteVersionInfo {
                    version: app.version,
                    download_url: Some(app.track_view_url),
                    exists: true,
                }))
        }
        Channel::PreReleaseTrack => {
            let response: BuildsResponse =
                serde_json::from_slice(body).map_err(CheckError::decode_from)?;
            Ok(response
                .data
                .into_iter()
                .next()
                .map_or_else(RemoteVersionInfo::missing, |build| RemoteVersionInfo {
                    version: build.attributes.version,
                    download_url: None,
                    exists: true,
                }))
        }
    }
}
