//! Error types for the offline cache.

use thiserror::Error;

/// Errors raised by cache lifecycle and control handling.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A precache resource could not be fetched during installation.
    /// Installation is atomic: one failure aborts it, matching the
    /// all-or-nothing contract of the precache step.
    #[error("Precache fetch failed for '{url}'")]
    Precache { url: String },

    /// A control message did not deserialize into a known action.
    #[error("Invalid control message: {0}")]
    InvalidMessage(#[from] serde_json::Error),
}

impl CacheError {
    pub fn precache(url: impl Into<String>) -> Self {
        Self::Precache { url: url.into() }
    }
}
