//! Error taxonomy shared by the catalog client and the sync core.
//!
//! None of these are recovered inside an iteration: an error aborts the current
//! pass and leaves the playlist as the previous successful pass left it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport failure talking to the catalog API.
    #[error("Spotify request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog API answered with a non-success status.
    #[error("Spotify API error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// A catalog record lacked a field or carried a value we cannot interpret.
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// Required settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SyncError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        SyncError::Malformed(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        SyncError::Config(msg.into())
    }

    /// True for failures raised by the catalog API or the network path to it.
    pub fn is_upstream(&self) -> bool {
        matches!(self, SyncError::Http(_) | SyncError::Upstream { .. })
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
