use thiserror::Error;

use crate::channel::Channel;

/// Coarse failure taxonomy reported in [`crate::UpdateDecision::LookupFailed`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("invalid local metadata")]
    InvalidLocalMetadata,
    #[error("transport error")]
    TransportError,
    #[error("decode error")]
    DecodeError,
    #[error("not found")]
    NotFound,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("local metadata is missing `{key}`")]
    InvalidLocalMetadata { key: &'static str },

    #[error("lookup request failed: {details}")]
    Request { details: String },

    #[error("lookup failed with HTTP {status}{body_snippet}")]
    HttpStatus { status: u16, body_snippet: String },

    #[error("invalid lookup endpoint: {details}")]
    InvalidEndpoint { details: String },

    #[error("failed to decode lookup response: {details}")]
    Decode { details: String },

    #[error("app does not exist on {channel}")]
    NotFound { channel: Channel },
}

impl CheckError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidLocalMetadata { .. } => ErrorKind::InvalidLocalMetadata,
            Self::Request { .. } | Self::HttpStatus { .. } | Self::InvalidEndpoint { .. } => {
                ErrorKind::TransportError
            }
            Self::Decode { .. } => ErrorKind::DecodeError,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    pub fn request_from<E>(error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Request {
            details: error.to_string(),
        }
    }

    pub fn decode_from<E>(error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Decode {
            details: error.to_string(),
        }
    }
}
