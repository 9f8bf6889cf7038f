//! Pages domain - the component registry and fragment renderers.
//!
//! ## Architecture
//!
//! - `component.rs` - typed page tags and the `ToolModule` interface
//! - `render.rs` - pure fragment builders over catalog state
//! - `registry.rs` - dispatch from page tag to render function, plus
//!   per-tool module registration
//! - `error.rs` - page-specific error types
//!
//! The registry never performs I/O; the only async surface is the tool
//! modules themselves.

mod component;
mod error;
pub mod render;
mod registry;

pub use component::{Fragment, PageComponent, StaticToolModule, ToolModule};
pub use error::PageError;
pub use registry::ComponentRegistry;
