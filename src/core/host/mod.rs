//! Host abstractions for the browser-side collaborators.
//!
//! The engine never touches a real DOM, network stack, or analytics
//! collector directly; it drives them through the traits in this module.
//! In-memory implementations back the test suite and the default build;
//! a reqwest-based [`Network`] is available behind the `http` feature.

pub mod document;
pub mod network;
pub mod notify;

pub use document::{DocumentHost, InjectedScript, MemoryDocument, ScriptHandle, ScriptKind};
pub use network::{FetchRequest, FetchResponse, MemoryNetwork, Network, ResourceDestination};
pub use notify::{Notifier, NullNotifier, RecordingNotifier};

#[cfg(feature = "http")]
pub use network::HttpNetwork;

use thiserror::Error;

/// Errors surfaced by host implementations.
#[derive(Debug, Error)]
pub enum HostError {
    /// A network fetch failed (connection refused, offline, DNS, ...).
    #[error("Fetch failed: {0}")]
    Fetch(String),

    /// A script failed to execute on the document.
    #[error("Script execution failed: {0}")]
    Script(String),
}

impl HostError {
    /// Create a new fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new script error.
    pub fn script(msg: impl Into<String>) -> Self {
        Self::Script(msg.into())
    }
}
