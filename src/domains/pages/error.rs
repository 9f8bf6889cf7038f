//! Page-rendering error types.

use thiserror::Error;

/// Errors that can occur while producing a page fragment.
#[derive(Debug, Error)]
pub enum PageError {
    /// No render function is registered for the requested component.
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// A tool module failed while producing its markup.
    #[error("Tool module failed: {0}")]
    Module(String),
}

impl PageError {
    /// Create a new "unknown component" error.
    pub fn unknown_component(name: impl Into<String>) -> Self {
        Self::UnknownComponent(name.into())
    }

    /// Create a new module failure error.
    pub fn module(msg: impl Into<String>) -> Self {
        Self::Module(msg.into())
    }
}
