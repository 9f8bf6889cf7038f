//! Error types for the legacy tool-page loader.

use thiserror::Error;

use crate::core::host::HostError;

/// Errors raised while fetching or activating a legacy tool page.
///
/// All of these are recoverable: the loader degrades to a placeholder or
/// skips the failing script, and navigation still completes.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// Both the absolute and the relative tool-page URL failed.
    #[error("Tool page unavailable for '{tool_id}'")]
    PageUnavailable { tool_id: String },

    /// A script URL could not be resolved against the page base.
    #[error("Invalid script URL '{src}': {source}")]
    InvalidScriptUrl {
        src: String,
        #[source]
        source: url::ParseError,
    },

    /// A host collaborator failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl LoaderError {
    pub fn page_unavailable(tool_id: impl Into<String>) -> Self {
        Self::PageUnavailable {
            tool_id: tool_id.into(),
        }
    }

    pub fn invalid_script_url(src: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidScriptUrl {
            src: src.into(),
            source,
        }
    }
}
