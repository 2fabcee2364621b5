use async_trait::async_trait;
use log::debug;

use crate::channel::{Channel, ChannelEndpoints};
use crate::error::CheckError;

/// Performs a single lookup round trip against a channel.
#[async_trait]
pub trait ChannelClient: Send + Sync {
    /// Fetch the raw lookup body for `identifier` on `channel`.
    ///
    /// # Errors
    /// Returns a transport-kind [`CheckError`] when the request cannot be
    /// completed.
    async fn fetch(
        &self,
        channel: Channel,
        identifier: &str,
        credential: Option<&str>,
    ) -> Result<Vec<u8>, CheckError>;
}

/// [`ChannelClient`] backed by a shared `reqwest::Client`.
///
/// Timeouts and TLS come from how the `reqwest::Client` was built.
#[derive(Debug, Clone)]
pub struct HttpChannelClient {
    client: reqwest::Client,
    endpoints: ChannelEndpoints,
}

impl HttpChannelClient {
    #[must_use]
    pub fn new(client: reqwest::Client, endpoints: ChannelEndpoints) -> Self {
        Self { client, endpoints }
    }
}

#[async_trait]
impl ChannelClient for HttpChannelClient {
    async fn fetch(
        &self,
        channel: Channel,
        identifier: &str,
        credential: Option<&str>,
    ) -> Result<Vec<u8>, CheckError> {
        let url = self.endpoints.url_for(channel, identifier)?;
        debug!("Looking up {identifier} on {channel}: {url}");

        let mut request = self.client.get(url).header("User-Agent", "storecheck");
        if channel.sends_authorization()
            && let Some(token) = credential
        {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(CheckError::request_from)?;
        let status = response.status();

        if self.endpoints.reject_error_status && !status.is_success() {
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, 160))
                .unwrap_or_default();
            return Err(CheckError::HttpStatus {
                status: status.as_u16(),
                body_snippet,
            });
        }

        let body = response.bytes().await.map_err(CheckError::request_from)?;
        debug!(
            "{channel} lookup returned HTTP {} with {} bytes",
            status.as_u16(),
            body.len()
        );
        Ok(body.to_vec())
    }
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}
