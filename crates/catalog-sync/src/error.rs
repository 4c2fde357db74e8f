//! Error Types
//!
//! Failures at the configuration and data-source boundaries.

use thiserror::Error;

use crate::models::ItemId;

/// Startup configuration is missing or malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing configuration value {0}")]
    Missing(&'static str),

    #[error("invalid service url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// A read or write against the data source failed
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("data source unavailable: {0}")]
    Unavailable(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// A favorite toggle could not be written; the optimistic patch was reverted
#[derive(Debug, Error)]
pub enum ToggleError {
    #[error("Failed to update favorite. Please try again.")]
    Write {
        item: ItemId,
        #[source]
        source: SourceError,
    },
}

impl ToggleError {
    pub fn item(&self) -> ItemId {
        match self {
            ToggleError::Write { item, .. } => *item,
        }
    }
}
