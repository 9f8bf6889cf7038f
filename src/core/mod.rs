//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the shell,
//! including error handling, configuration, host seams, and application
//! wiring.

pub mod app;
pub mod config;
pub mod error;
pub mod host;

pub use app::SpaApp;
pub use config::Config;
pub use error::{Error, Result};
