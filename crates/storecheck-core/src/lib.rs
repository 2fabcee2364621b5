//! Update checks against app distribution channels.
//!
//! This crate holds everything between "which version is installed" and
//! "should the user be offered an update":
//! - Channel selection and lookup URL construction.
//! - One HTTP lookup per check through a [`ChannelClient`].
//! - Decoding of each channel's response shape.
//! - Version ordering strategies and the final [`UpdateDecision`].

mod channel;
mod checker;
mod client;
mod decision;
mod error;
mod metadata;
mod parse;
mod prompt;
mod version;


/// Channel identity and endpoint configuration.
pub use channel::{
    Channel, ChannelEndpoints, DEFAULT_PRE_RELEASE_BASE, DEFAULT_STORE_LOOKUP_BASE,
    DEFAULT_STORE_REGION,
};
/// Check orchestration and its per-call configuration.
pub use checker::{CheckConfig, UpdateChecker};
/// Network seam and its reqwest implementation.
pub use client::{ChannelClient, HttpChannelClient};
pub use decision::UpdateDecision;
pub use error::{CheckError, ErrorKind};
/// Local application metadata collaborator.
pub use metadata::{
    DISPLAY_NAME_KEY, IDENTIFIER_KEY, InstalledVersionInfo, JsonMetadataFile, MetadataFileError,
    MetadataSource, VERSION_KEY,
};
pub use parse::{RemoteVersionInfo, parse_response};
/// Presentation collaborator types.
pub use prompt::{PromptAction, UpdatePresenter, UpdatePrompt};
pub use version::{VersionOrdering, compare_versions};
