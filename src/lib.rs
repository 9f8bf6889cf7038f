//! Single-Page Application Shell Library
//!
//! This crate provides the headless core of an offline-first tools
//! website: hash routing, typed page components, a legacy tool-page
//! loader, and a versioned offline cache, organized by domains.
//!
//! # Architecture
//!
//! The shell is organized into the following modules:
//!
//! - **core**: Core infrastructure including configuration, error handling, host seams, and application wiring
//! - **domains**: Business logic organized by bounded contexts
//!   - **catalog**: Static tool and category metadata with search
//!   - **pages**: Page components and fragment rendering
//!   - **router**: Hash-fragment navigation and document metadata
//!   - **loader**: Legacy tool-page fetching and script re-hosting
//!   - **cache**: Versioned offline cache with per-class strategies
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use station_spa::core::{Config, SpaApp};
//! use station_spa::core::host::{MemoryDocument, MemoryNetwork, NullNotifier};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let app = SpaApp::new(
//!         config,
//!         Arc::new(MemoryNetwork::new()),
//!         Arc::new(MemoryDocument::new()),
//!         Arc::new(NullNotifier),
//!     );
//!     app.start().await;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Result, SpaApp};
