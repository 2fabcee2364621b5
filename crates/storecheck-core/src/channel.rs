use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::CheckError;

pub const DEFAULT_STORE_LOOKUP_BASE: &str = "https://itunes.apple.com";
pub const DEFAULT_STORE_REGION: &str = "us";
pub const DEFAULT_PRE_RELEASE_BASE: &str = "https://api.appstoreconnect.apple.com";

/// Distribution source queried for the published version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    #[default]
    PrimaryStore,
    PreReleaseTrack,
}

impl Channel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PrimaryStore => "AppStore",
            Self::PreReleaseTrack => "TestFlight",
        }
    }

    #[must_use]
    pub fn sends_authorization(self) -> bool {
        matches!(self, Self::PreReleaseTrack)
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Endpoint roots for each channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEndpoints {
    pub store_lookup_base: String,
    pub store_region: String,
    pub pre_release_base: String,
    /// Map non-2xx responses to a transport failure instead of handing the
    /// body to the parser.
    pub reject_error_status: bool,
}

impl Default for ChannelEndpoints {
    fn default() -> Self {
        Self {
            store_lookup_base: DEFAULT_STORE_LOOKUP_BASE.to_string(),
            store_region: DEFAULT_STORE_REGION.to_string(),
            pre_release_base: DEFAULT_PRE_RELEASE_BASE.to_string(),
            reject_error_status: true,
        }
    }
}

impl ChannelEndpoints {
    /// Build the lookup URL for `identifier` on `channel`.
    ///
    /// `PrimaryStore`: `<base>/<region>/lookup?bundleId=<identifier>`.
    /// `PreReleaseTrack`: `<base>/v1/apps/<identifier>/builds`.
    ///
    /// # Errors
    /// Returns [`CheckError::InvalidEndpoint`] when the configured base is not
    /// an absolute URL that can carry path segments.
    pub fn url_for(&self, channel: Channel, identifier: &str) -> Result<Url, CheckError> {
        match channel {
            Channel::PrimaryStore => {
                let mut url = parse_base(&self.store_lookup_base)?;
                extend_path(&mut url, &[self.store_region.as_str(), "lookup"])?;
                url.query_pairs_mut().append_pair("bundleId", identifier);
                Ok(url)
            }
            Channel::PreReleaseTrack => {
                let mut url = parse_base(&self.pre_release_base)?;
                extend_path(&mut url, &["v1", "apps", identifier, "builds"])?;
                Ok(url)
            }
        }
    }
}

fn parse_base(base: &str) -> Result<Url, CheckError> {
    Url::parse(base).map_err(|e| CheckError::InvalidEndpoint {
        details: format!("{base}: {e}"),
    })
}

fn extend_path(url: &mut Url, segments: &[&str]) -> Result<(), CheckError> {
    let display = url.to_string();
    url.path_segments_mut()
        .map_err(|()| CheckError::InvalidEndpoint {
            details: format!("{display} cannot be a base"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}
