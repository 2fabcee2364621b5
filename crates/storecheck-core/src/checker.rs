use std::cmp::Ordering;

use log::{debug, info, warn};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::channel::Channel;
use crate::client::ChannelClient;
use crate::decision::UpdateDecision;
use crate::error::CheckError;
use crate::metadata::{IDENTIFIER_KEY, InstalledVersionInfo, VERSION_KEY};
use crate::parse::{RemoteVersionInfo, parse_response};
use crate::version::VersionOrdering;

/// Per-call input of an update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    pub channel: Channel,
    pub installed_version: String,
    pub bundle_identifier: String,
    pub mandatory: bool,
    pub credential: Option<String>,
    pub ordering: VersionOrdering,
}

impl CheckConfig {
    #[must_use]
    pub fn new(
        channel: Channel,
        installed_version: impl Into<String>,
        bundle_identifier: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            installed_version: installed_version.into(),
            bundle_identifier: bundle_identifier.into(),
            mandatory: false,
            credential: None,
            ordering: VersionOrdering::default(),
        }
    }

    #[must_use]
    pub fn for_installed(channel: Channel, installed: &InstalledVersionInfo) -> Self {
        Self::new(
            channel,
            installed.version.clone(),
            installed.bundle_identifier.clone(),
        )
    }

    #[must_use]
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    #[must_use]
    pub fn with_credential(mut self, credential: Option<String>) -> Self {
        self.credential = credential;
        self
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: VersionOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    fn validate(&self) -> Result<(), CheckError> {
        if self.installed_version.trim().is_empty() {
            return Err(CheckError::InvalidLocalMetadata { key: VERSION_KEY });
        }
        if self.bundle_identifier.trim().is_empty() {
            return Err(CheckError::InvalidLocalMetadata {
                key: IDENTIFIER_KEY,
            });
        }
        Ok(())
    }
}

/// Drives one lookup per check: fetch, parse, compare, decide.
///
/// Holds no state between checks apart from the client.
#[derive(Debug, Clone)]
pub struct UpdateChecker<C> {
    client: C,
}

impl<C: ChannelClient> UpdateChecker<C> {
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub async fn check(&self, config: &CheckConfig) -> UpdateDecision {
        match self.run(config).await {
            Ok(decision) => decision,
            Err(error @ CheckError::NotFound { .. }) => {
                info!("{error}");
                error.into()
            }
            Err(error) => {
                warn!(
                    "Update check for {} on {} failed: {error}",
                    config.bundle_identifier, config.channel
                );
                error.into()
            }
        }
    }

    /// Run a check that stops once `cancel` fires.
    ///
    /// Returns `None` when cancelled; the in-flight request is dropped.
    pub async fn check_cancellable(
        &self,
        config: &CheckConfig,
        cancel: &CancellationToken,
    ) -> Option<UpdateDecision> {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Update check for {} cancelled", config.bundle_identifier);
                None
            }
            decision = self.check(config) => Some(decision),
        }
    }

    async fn run(&self, config: &CheckConfig) -> Result<UpdateDecision, CheckError> {
        config.validate()?;

        let body = self
            .client
            .fetch(
                config.channel,
                &config.bundle_identifier,
                config.credential.as_deref(),
            )
            .await?;

        let remote = parse_response(config.channel, &body)?;
        if !remote.exists {
            return Err(CheckError::NotFound {
                channel: config.channel,
            });
        }

        Ok(decide(config, remote))
    }
}

impl<C: ChannelClient + Clone + 'static> UpdateChecker<C> {
    /// Run the check on the tokio runtime and deliver the decision once.
    ///
    /// Dropping the receiver abandons the check and discards its result.
    #[must_use]
    pub fn spawn_check(&self, config: CheckConfig) -> oneshot::Receiver<UpdateDecision> {
        let (mut tx, rx) = oneshot::channel();
        let checker = self.clone();

        tokio::spawn(async move {
            let decision = tokio::select! {
                () = tx.closed() => None,
                decision = checker.check(&config) => Some(decision),
            };

            match decision {
                Some(decision) => {
                    if tx.send(decision).is_err() {
                        debug!("Update check receiver dropped before delivery");
                    }
                }
                None => debug!(
                    "Update check for {} abandoned by caller",
                    config.bundle_identifier
                ),
            }
        });

        rx
    }
}

fn decide(config: &CheckConfig, remote: RemoteVersionInfo) -> UpdateDecision {
    match config
        .ordering
        .compare(&config.installed_version, &remote.version)
    {
        Ordering::Less => {
            info!(
                "Needs update: {} version {} > current version {}",
                config.channel, remote.version, config.installed_version
            );
            UpdateDecision::UpdateAvailable {
                new_version: remote.version,
                download_url: remote.download_url,
                mandatory: config.mandatory,
            }
        }
        Ordering::Equal | Ordering::Greater => {
            debug!(
                "Already on the latest version: {} ({} has {})",
                config.installed_version, config.channel, remote.version
            );
            UpdateDecision::UpToDate
        }
    }
}
