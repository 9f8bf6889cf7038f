//! Error types and handling for the application shell.
//!
//! This module defines a unified error type that can represent errors from
//! all domains and external dependencies, providing consistent error handling
//! across the entire application.

use thiserror::Error;

/// A specialized Result type for shell operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the application shell.
///
/// This enum captures all possible error conditions that can occur while
/// the shell runs, including domain-specific errors and host failures.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the pages domain.
    #[error("Page error: {0}")]
    Page(#[from] crate::domains::pages::PageError),

    /// Error originating from the legacy tool-page loader.
    #[error("Loader error: {0}")]
    Loader(#[from] crate::domains::loader::LoaderError),

    /// Error originating from the offline cache.
    #[error("Cache error: {0}")]
    Cache(#[from] crate::domains::cache::CacheError),

    /// Error originating from a host collaborator (network, document).
    #[error("Host error: {0}")]
    Host(#[from] crate::core::host::HostError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
